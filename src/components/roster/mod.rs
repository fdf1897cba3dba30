pub mod models;

pub use models::{
    default_employees, find_by_name, DayPart, Employee, PreferredDayOff, MAX_EMPLOYEES,
    MAX_TARGET_HOURS, MIN_EMPLOYEES,
};

use uuid::Uuid;

/// Generate a fresh employee id
pub fn new_employee_id() -> String {
    format!("employee-{}", Uuid::new_v4())
}
