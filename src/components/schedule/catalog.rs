use super::models::{DaySchedule, ShiftStatus, Weekday};
use super::shift_times::ShiftTimes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Marker of the two-shift Monday to Thursday description
pub const FULL_DAY_MARKER: &str = "فترتان";
/// Marker of a morning-only description
pub const MORNING_MARKER: &str = "صباحية";
/// Marker of an evening-only description
pub const EVENING_MARKER: &str = "مسائية";

/// Abstract daily assignment, independent of concrete clock times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftKey {
    MonThuFull,
    MonThuMorning,
    MonThuEvening,
    FriSatWork,
    Off,
}

impl ShiftKey {
    pub const ALL: [ShiftKey; 5] = [
        ShiftKey::MonThuFull,
        ShiftKey::MonThuMorning,
        ShiftKey::MonThuEvening,
        ShiftKey::FriSatWork,
        ShiftKey::Off,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKey::MonThuFull => "mon-thu-full",
            ShiftKey::MonThuMorning => "mon-thu-morning",
            ShiftKey::MonThuEvening => "mon-thu-evening",
            ShiftKey::FriSatWork => "fri-sat-work",
            ShiftKey::Off => "off",
        }
    }

    /// Parse a key, treating anything unrecognized as a day off
    pub fn parse_or_off(s: &str) -> ShiftKey {
        s.parse().unwrap_or_else(|_| {
            debug!("Unrecognized shift key '{}', using off", s);
            ShiftKey::Off
        })
    }

    /// Keys that can be assigned on a day
    pub fn options_for(day: Weekday) -> &'static [ShiftKey] {
        if day.is_mon_thu() {
            &[
                ShiftKey::Off,
                ShiftKey::MonThuMorning,
                ShiftKey::MonThuEvening,
                ShiftKey::MonThuFull,
            ]
        } else {
            &[ShiftKey::Off, ShiftKey::FriSatWork]
        }
    }

    /// Whether the key can be assigned on a day
    pub fn is_allowed_on(self, day: Weekday) -> bool {
        ShiftKey::options_for(day).contains(&self)
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown shift key: {}", s))
    }
}

/// Resolve a shift key into a concrete day for the configured times.
///
/// Descriptions embed the configured times verbatim and always start with
/// one of the marker words, which is what inference relies on.
pub fn resolve_shift(key: ShiftKey, shift_times: &ShiftTimes) -> DaySchedule {
    let ShiftTimes {
        mon_thu_morning_start,
        mon_thu_morning_end,
        mon_thu_evening_start,
        mon_thu_evening_end,
        fri_sat_morning_start,
        fri_sat_morning_end,
    } = shift_times;
    let hours = shift_times.hours();

    let (hours, shift_description) = match key {
        ShiftKey::MonThuFull => (
            hours.mon_thu_full,
            format!(
                "{}: {}-{} و {}-{}",
                FULL_DAY_MARKER,
                mon_thu_morning_start,
                mon_thu_morning_end,
                mon_thu_evening_start,
                mon_thu_evening_end
            ),
        ),
        ShiftKey::MonThuMorning => (
            hours.mon_thu_morning,
            format!(
                "{}: {}-{}",
                MORNING_MARKER, mon_thu_morning_start, mon_thu_morning_end
            ),
        ),
        ShiftKey::MonThuEvening => (
            hours.mon_thu_evening,
            format!(
                "{}: {}-{}",
                EVENING_MARKER, mon_thu_evening_start, mon_thu_evening_end
            ),
        ),
        ShiftKey::FriSatWork => (
            hours.fri_sat,
            format!(
                "{}: {}-{}",
                MORNING_MARKER, fri_sat_morning_start, fri_sat_morning_end
            ),
        ),
        ShiftKey::Off => return DaySchedule::off(),
    };

    DaySchedule {
        status: ShiftStatus::Work,
        hours,
        shift_description,
        shift_key: Some(key),
    }
}

/// Resolve a raw key string; unknown keys resolve to a day off
pub fn resolve_shift_str(key: &str, shift_times: &ShiftTimes) -> DaySchedule {
    resolve_shift(ShiftKey::parse_or_off(key), shift_times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::REST_LABEL;

    #[test]
    fn test_full_day_with_default_times() {
        let day = resolve_shift(ShiftKey::MonThuFull, &ShiftTimes::default());
        assert_eq!(day.status, ShiftStatus::Work);
        assert_eq!(day.hours, 8.0);
        assert_eq!(day.shift_description, "فترتان: 07:45-12:15 و 13:45-17:15");
        assert_eq!(day.shift_key, Some(ShiftKey::MonThuFull));
    }

    #[test]
    fn test_single_shifts_with_default_times() {
        let times = ShiftTimes::default();

        let morning = resolve_shift(ShiftKey::MonThuMorning, &times);
        assert_eq!(morning.hours, 4.5);
        assert_eq!(morning.shift_description, "صباحية: 07:45-12:15");

        let evening = resolve_shift(ShiftKey::MonThuEvening, &times);
        assert_eq!(evening.hours, 3.5);
        assert_eq!(evening.shift_description, "مسائية: 13:45-17:15");

        let weekend = resolve_shift(ShiftKey::FriSatWork, &times);
        assert_eq!(weekend.hours, 4.5);
        assert_eq!(weekend.shift_description, "صباحية: 07:45-12:15");
    }

    #[test]
    fn test_weekend_uses_its_own_window() {
        let times = ShiftTimes {
            fri_sat_morning_start: "08:00".to_string(),
            fri_sat_morning_end: "14:00".to_string(),
            ..ShiftTimes::default()
        };
        let day = resolve_shift(ShiftKey::FriSatWork, &times);
        assert_eq!(day.hours, 6.0);
        assert_eq!(day.shift_description, "صباحية: 08:00-14:00");
    }

    #[test]
    fn test_off_and_unknown_keys() {
        let times = ShiftTimes::default();
        let off = resolve_shift(ShiftKey::Off, &times);
        assert_eq!(off.status, ShiftStatus::Off);
        assert_eq!(off.hours, 0.0);
        assert_eq!(off.shift_description, REST_LABEL);

        assert_eq!(resolve_shift_str("night-shift", &times), off);
        assert_eq!(resolve_shift_str("", &times), off);
        assert_eq!(
            resolve_shift_str("mon-thu-evening", &times),
            resolve_shift(ShiftKey::MonThuEvening, &times)
        );
    }

    #[test]
    fn test_malformed_times_resolve_to_zero_hours() {
        let times = ShiftTimes {
            mon_thu_morning_end: "later".to_string(),
            ..ShiftTimes::default()
        };
        let day = resolve_shift(ShiftKey::MonThuFull, &times);
        assert_eq!(day.status, ShiftStatus::Work);
        assert_eq!(day.hours, 3.5);
        assert_eq!(day.shift_description, "فترتان: 07:45-later و 13:45-17:15");
    }

    #[test]
    fn test_options_for_day() {
        assert_eq!(ShiftKey::options_for(Weekday::Monday).len(), 4);
        assert!(ShiftKey::MonThuFull.is_allowed_on(Weekday::Thursday));
        assert!(!ShiftKey::MonThuFull.is_allowed_on(Weekday::Friday));
        assert!(ShiftKey::FriSatWork.is_allowed_on(Weekday::Saturday));
        assert!(!ShiftKey::FriSatWork.is_allowed_on(Weekday::Tuesday));
        assert!(ShiftKey::Off.is_allowed_on(Weekday::Saturday));
    }

    #[test]
    fn test_key_strings() {
        for key in ShiftKey::ALL {
            assert_eq!(key.as_str().parse::<ShiftKey>().unwrap(), key);
            assert_eq!(serde_json::to_value(key).unwrap(), key.as_str());
        }
    }
}
