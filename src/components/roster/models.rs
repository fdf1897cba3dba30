use crate::components::schedule::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum weekly target hours of an employee
pub const MAX_TARGET_HOURS: f64 = 40.0;
/// Target hours given to new employees
pub const DEFAULT_TARGET_HOURS: f64 = 38.0;
/// Smallest allowed roster
pub const MIN_EMPLOYEES: usize = 3;
/// Largest allowed roster
pub const MAX_EMPLOYEES: usize = 10;

const DEFAULT_FIRST_NAME: &str = "الموظف";
const DEFAULT_ROLE: &str = "عضو فريق";

/// Part of a day an employee would like to have off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPart {
    Full,
    Morning,
    Evening,
}

impl DayPart {
    pub fn as_str(self) -> &'static str {
        match self {
            DayPart::Full => "full",
            DayPart::Morning => "morning",
            DayPart::Evening => "evening",
        }
    }

    /// Arabic label used in prompts
    pub fn label(self) -> &'static str {
        match self {
            DayPart::Full => "يوم كامل",
            DayPart::Morning => "الفترة الصباحية",
            DayPart::Evening => "الفترة المسائية",
        }
    }
}

/// Preferred rest of an employee: any day, or a (part of a) specific day.
/// Friday and Saturday have a single shift, so only a full day off exists
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PreferredDayOff {
    #[default]
    Any,
    Day(Weekday, DayPart),
}

impl PreferredDayOff {
    /// Build a preference, rejecting half days on Friday and Saturday
    pub fn day(day: Weekday, part: DayPart) -> Option<Self> {
        (day.is_mon_thu() || part == DayPart::Full).then_some(PreferredDayOff::Day(day, part))
    }

    /// Arabic label used in prompts
    pub fn label(self) -> String {
        match self {
            PreferredDayOff::Any => "أي يوم".to_string(),
            PreferredDayOff::Day(day, part) => format!("{} ({})", day.label(), part.label()),
        }
    }
}

impl fmt::Display for PreferredDayOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredDayOff::Any => f.write_str("any"),
            PreferredDayOff::Day(day, part) => write!(f, "{}-{}", day, part.as_str()),
        }
    }
}

impl FromStr for PreferredDayOff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(PreferredDayOff::Any);
        }

        let invalid = || format!("Invalid preferred day off: {}", s);
        let (day, part) = s.split_once('-').ok_or_else(invalid)?;
        let day = day.parse::<Weekday>().map_err(|_| invalid())?;
        let part = match part {
            "full" => DayPart::Full,
            "morning" => DayPart::Morning,
            "evening" => DayPart::Evening,
            _ => return Err(invalid()),
        };

        PreferredDayOff::day(day, part).ok_or_else(invalid)
    }
}

impl TryFrom<String> for PreferredDayOff {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PreferredDayOff> for String {
    fn from(value: PreferredDayOff) -> Self {
        value.to_string()
    }
}

/// A team member to schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Stable identifier, never reused
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub preferred_day_off: PreferredDayOff,
    pub target_hours: f64,
}

impl Employee {
    /// Create an employee with placeholder details
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            first_name: DEFAULT_FIRST_NAME.to_string(),
            last_name: position.to_string(),
            role: DEFAULT_ROLE.to_string(),
            preferred_day_off: PreferredDayOff::Any,
            target_hours: DEFAULT_TARGET_HOURS,
        }
    }

    /// `"firstName lastName"`, the name schedules refer to the employee by
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether both names are non-blank
    pub fn has_valid_name(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }

    /// Clamp target hours into `[0, 40]`
    pub fn clamp_target_hours(&mut self) {
        self.target_hours = if self.target_hours.is_finite() {
            self.target_hours.clamp(0.0, MAX_TARGET_HOURS)
        } else {
            DEFAULT_TARGET_HOURS
        };
    }
}

/// The roster used when nothing valid is stored
pub fn default_employees() -> Vec<Employee> {
    (1..=MIN_EMPLOYEES)
        .map(|i| Employee::new(format!("employee-{}", i), i))
        .collect()
}

/// Find the employee a schedule row refers to
pub fn find_by_name<'a>(employees: &'a [Employee], employee_name: &str) -> Option<&'a Employee> {
    employees.iter().find(|e| e.full_name() == employee_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_day_off_parsing() {
        assert_eq!("any".parse::<PreferredDayOff>().unwrap(), PreferredDayOff::Any);
        assert_eq!(
            "tuesday-evening".parse::<PreferredDayOff>().unwrap(),
            PreferredDayOff::Day(Weekday::Tuesday, DayPart::Evening)
        );
        assert_eq!(
            "saturday-full".parse::<PreferredDayOff>().unwrap(),
            PreferredDayOff::Day(Weekday::Saturday, DayPart::Full)
        );

        assert!("friday-morning".parse::<PreferredDayOff>().is_err());
        assert!("sunday-full".parse::<PreferredDayOff>().is_err());
        assert!("monday".parse::<PreferredDayOff>().is_err());
        assert!("monday-night".parse::<PreferredDayOff>().is_err());
    }

    #[test]
    fn test_preferred_day_off_serde() {
        let pref = PreferredDayOff::Day(Weekday::Monday, DayPart::Morning);
        assert_eq!(serde_json::to_value(pref).unwrap(), "monday-morning");
        let back: PreferredDayOff = serde_json::from_str("\"monday-morning\"").unwrap();
        assert_eq!(back, pref);
        assert!(serde_json::from_str::<PreferredDayOff>("\"friday-evening\"").is_err());
    }

    #[test]
    fn test_preferred_day_off_labels() {
        assert_eq!(PreferredDayOff::Any.label(), "أي يوم");
        assert_eq!(
            PreferredDayOff::Day(Weekday::Monday, DayPart::Morning).label(),
            "الإثنين (الفترة الصباحية)"
        );
    }

    #[test]
    fn test_default_roster() {
        let employees = default_employees();
        assert_eq!(employees.len(), MIN_EMPLOYEES);
        assert_eq!(employees[0].id, "employee-1");
        assert_eq!(employees[2].full_name(), "الموظف 3");
        assert!(employees.iter().all(|e| e.target_hours == DEFAULT_TARGET_HOURS));
    }

    #[test]
    fn test_clamp_target_hours() {
        let mut employee = Employee::new("employee-1", 1);
        employee.target_hours = 55.0;
        employee.clamp_target_hours();
        assert_eq!(employee.target_hours, MAX_TARGET_HOURS);

        employee.target_hours = -3.0;
        employee.clamp_target_hours();
        assert_eq!(employee.target_hours, 0.0);
    }

    #[test]
    fn test_find_by_name() {
        let employees = default_employees();
        assert_eq!(find_by_name(&employees, "الموظف 2").unwrap().id, "employee-2");
        assert!(find_by_name(&employees, "الموظف").is_none());
    }
}
