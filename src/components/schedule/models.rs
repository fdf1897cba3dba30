use super::catalog::ShiftKey;
use crate::utils::time::round2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Description used for days off
pub const REST_LABEL: &str = "راحة";

/// Working day of the planning week (Monday to Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All planning days in week order
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Whether the day uses the two-shift Monday to Thursday pattern
    pub fn is_mon_thu(self) -> bool {
        !matches!(self, Weekday::Friday | Weekday::Saturday)
    }

    /// Lowercase English name, as used in stored data
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    /// Arabic day label
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "الإثنين",
            Weekday::Tuesday => "الثلاثاء",
            Weekday::Wednesday => "الأربعاء",
            Weekday::Thursday => "الخميس",
            Weekday::Friday => "الجمعة",
            Weekday::Saturday => "السبت",
        }
    }

    /// Zero-based offset from Monday
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| format!("Unknown day: {}", s))
    }
}

/// Whether an employee works on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    Work,
    Off,
}

/// Concrete outcome of one day for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub status: ShiftStatus,
    pub hours: f64,
    pub shift_description: String,
    /// Shift key the day was resolved from. Schedules coming from the
    /// generator don't carry one until they are reconciled or edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_key: Option<ShiftKey>,
}

impl DaySchedule {
    /// A day off
    pub fn off() -> Self {
        Self {
            status: ShiftStatus::Off,
            hours: 0.0,
            shift_description: REST_LABEL.to_string(),
            shift_key: Some(ShiftKey::Off),
        }
    }

    /// Whether the day is worked
    pub fn is_work(&self) -> bool {
        self.status == ShiftStatus::Work
    }
}

/// Six day entries of one employee's week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self {
            monday: DaySchedule::off(),
            tuesday: DaySchedule::off(),
            wednesday: DaySchedule::off(),
            thursday: DaySchedule::off(),
            friday: DaySchedule::off(),
            saturday: DaySchedule::off(),
        }
    }
}

impl WeekSchedule {
    /// Get the entry for a day
    pub fn get(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    /// Get the mutable entry for a day
    pub fn get_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        }
    }

    /// Iterate over the days in week order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }

    /// Sum of the week's hours, rounded to two decimals
    pub fn total_hours(&self) -> f64 {
        round2(self.iter().map(|(_, entry)| entry.hours).sum())
    }
}

/// One employee's row in a generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSchedule {
    /// `"firstName lastName"` of the employee this row belongs to
    pub employee_name: String,
    pub total_hours: f64,
    pub schedule: WeekSchedule,
}

impl EmployeeSchedule {
    /// Recompute `total_hours` from the days
    pub fn recompute_total(&mut self) {
        self.total_hours = self.schedule.total_hours();
    }
}

/// A full weekly schedule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleData {
    pub employees: Vec<EmployeeSchedule>,
}
