use crate::utils::time::{hours_between, is_valid_time, round2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configured clock times of the shift windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTimes {
    pub mon_thu_morning_start: String,
    pub mon_thu_morning_end: String,
    pub mon_thu_evening_start: String,
    pub mon_thu_evening_end: String,
    pub fri_sat_morning_start: String,
    pub fri_sat_morning_end: String,
}

impl Default for ShiftTimes {
    fn default() -> Self {
        Self {
            mon_thu_morning_start: "07:45".to_string(),
            mon_thu_morning_end: "12:15".to_string(),
            mon_thu_evening_start: "13:45".to_string(),
            mon_thu_evening_end: "17:15".to_string(),
            fri_sat_morning_start: "07:45".to_string(),
            fri_sat_morning_end: "12:15".to_string(),
        }
    }
}

/// Hours of each shift window for a given configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftHours {
    pub mon_thu_morning: f64,
    pub mon_thu_evening: f64,
    pub mon_thu_full: f64,
    pub fri_sat: f64,
}

impl ShiftTimes {
    /// Compute the hours of every window
    pub fn hours(&self) -> ShiftHours {
        let mon_thu_morning = hours_between(&self.mon_thu_morning_start, &self.mon_thu_morning_end);
        let mon_thu_evening = hours_between(&self.mon_thu_evening_start, &self.mon_thu_evening_end);

        ShiftHours {
            mon_thu_morning,
            mon_thu_evening,
            mon_thu_full: round2(mon_thu_morning + mon_thu_evening),
            fri_sat: hours_between(&self.fri_sat_morning_start, &self.fri_sat_morning_end),
        }
    }

    /// Get one of the six times
    pub fn get(&self, field: ShiftField) -> &str {
        match field {
            ShiftField::MonThuMorningStart => &self.mon_thu_morning_start,
            ShiftField::MonThuMorningEnd => &self.mon_thu_morning_end,
            ShiftField::MonThuEveningStart => &self.mon_thu_evening_start,
            ShiftField::MonThuEveningEnd => &self.mon_thu_evening_end,
            ShiftField::FriSatMorningStart => &self.fri_sat_morning_start,
            ShiftField::FriSatMorningEnd => &self.fri_sat_morning_end,
        }
    }

    /// Replace one of the six times
    pub fn set(&mut self, field: ShiftField, value: impl Into<String>) {
        let slot = match field {
            ShiftField::MonThuMorningStart => &mut self.mon_thu_morning_start,
            ShiftField::MonThuMorningEnd => &mut self.mon_thu_morning_end,
            ShiftField::MonThuEveningStart => &mut self.mon_thu_evening_start,
            ShiftField::MonThuEveningEnd => &mut self.mon_thu_evening_end,
            ShiftField::FriSatMorningStart => &mut self.fri_sat_morning_start,
            ShiftField::FriSatMorningEnd => &mut self.fri_sat_morning_end,
        };
        *slot = value.into();
    }

    /// Fields whose value is not a valid `HH:MM` time
    pub fn invalid_fields(&self) -> Vec<ShiftField> {
        ShiftField::ALL
            .into_iter()
            .filter(|field| !is_valid_time(self.get(*field)))
            .collect()
    }
}

/// Names one of the six configured times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftField {
    MonThuMorningStart,
    MonThuMorningEnd,
    MonThuEveningStart,
    MonThuEveningEnd,
    FriSatMorningStart,
    FriSatMorningEnd,
}

impl ShiftField {
    pub const ALL: [ShiftField; 6] = [
        ShiftField::MonThuMorningStart,
        ShiftField::MonThuMorningEnd,
        ShiftField::MonThuEveningStart,
        ShiftField::MonThuEveningEnd,
        ShiftField::FriSatMorningStart,
        ShiftField::FriSatMorningEnd,
    ];

    /// Stored (camelCase) key of the field
    pub fn key(self) -> &'static str {
        match self {
            ShiftField::MonThuMorningStart => "monThuMorningStart",
            ShiftField::MonThuMorningEnd => "monThuMorningEnd",
            ShiftField::MonThuEveningStart => "monThuEveningStart",
            ShiftField::MonThuEveningEnd => "monThuEveningEnd",
            ShiftField::FriSatMorningStart => "friSatMorningStart",
            ShiftField::FriSatMorningEnd => "friSatMorningEnd",
        }
    }
}

impl fmt::Display for ShiftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ShiftField {
    type Err = String;

    /// Accepts the stored key (`monThuMorningStart`) or its kebab-case form
    /// (`mon-thu-morning-start`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| *c != '-' && *c != '_').collect();
        ShiftField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("Unknown shift time field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hours() {
        let hours = ShiftTimes::default().hours();
        assert_eq!(hours.mon_thu_morning, 4.5);
        assert_eq!(hours.mon_thu_evening, 3.5);
        assert_eq!(hours.mon_thu_full, 8.0);
        assert_eq!(hours.fri_sat, 4.5);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(
            "monThuEveningEnd".parse::<ShiftField>().unwrap(),
            ShiftField::MonThuEveningEnd
        );
        assert_eq!(
            "fri-sat-morning-start".parse::<ShiftField>().unwrap(),
            ShiftField::FriSatMorningStart
        );
        assert!("sunday-start".parse::<ShiftField>().is_err());
    }

    #[test]
    fn test_set_and_validate() {
        let mut times = ShiftTimes::default();
        assert!(times.invalid_fields().is_empty());

        times.set(ShiftField::MonThuEveningEnd, "18:00");
        assert_eq!(times.get(ShiftField::MonThuEveningEnd), "18:00");
        assert_eq!(times.hours().mon_thu_evening, 4.25);

        times.set(ShiftField::FriSatMorningEnd, "noon");
        assert_eq!(times.invalid_fields(), vec![ShiftField::FriSatMorningEnd]);
        assert_eq!(times.hours().fri_sat, 0.0);
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let json = serde_json::to_value(ShiftTimes::default()).unwrap();
        for field in ShiftField::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field);
        }
    }
}
