use crate::components::roster::{Employee, MAX_EMPLOYEES, MAX_TARGET_HOURS, MIN_EMPLOYEES};
use crate::components::schedule::models::REST_LABEL;
use crate::components::schedule::{ScheduleData, ShiftStatus};
use crate::error::{generation_error, validation_error, PlannerResult};
use serde_json::from_str;
use tracing::{error, warn};

/// Check the roster before any request is made
pub fn validate_request(employees: &[Employee]) -> PlannerResult<()> {
    if !(MIN_EMPLOYEES..=MAX_EMPLOYEES).contains(&employees.len()) {
        return Err(validation_error(&t!(
            "employee_count_out_of_bounds",
            min = MIN_EMPLOYEES,
            max = MAX_EMPLOYEES
        )));
    }

    if employees.iter().any(|employee| !employee.has_valid_name()) {
        return Err(validation_error(&t!("employee_name_required")));
    }

    Ok(())
}

/// Attempt to parse the schedule object out of the model response
fn parse_json_from_response(response: &str) -> Option<ScheduleData> {
    match from_str::<ScheduleData>(response.trim()) {
        Ok(schedule) => return Some(schedule),
        Err(e) => warn!("Failed to parse entire response as JSON: {}", e),
    }

    // Fall back to the outermost object, for answers wrapped in prose or fences
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if start >= end {
        return None;
    }
    match from_str::<ScheduleData>(&response[start..=end]) {
        Ok(schedule) => Some(schedule),
        Err(e) => {
            error!("Failed to parse JSON object from response: {}", e);
            None
        }
    }
}

/// Make a received schedule satisfy the day and total invariants
fn normalize(schedule: &mut ScheduleData) {
    for employee in &mut schedule.employees {
        for day in crate::components::schedule::Weekday::ALL {
            let entry = employee.schedule.get_mut(day);
            // Never trust a key the model may have echoed back
            entry.shift_key = None;
            if entry.status == ShiftStatus::Off
                && (entry.hours != 0.0 || entry.shift_description != REST_LABEL)
            {
                warn!(
                    "{} of {} is off but has {} hours / '{}', normalizing",
                    day, employee.employee_name, entry.hours, entry.shift_description
                );
                entry.hours = 0.0;
                entry.shift_description = REST_LABEL.to_string();
            }
        }

        let total = employee.schedule.total_hours();
        if total != employee.total_hours {
            warn!(
                "Total hours of {} reported as {} but days sum to {}",
                employee.employee_name, employee.total_hours, total
            );
            employee.total_hours = total;
        }
        if employee.total_hours > MAX_TARGET_HOURS {
            warn!(
                "{} is scheduled for {} hours, above the weekly maximum",
                employee.employee_name, employee.total_hours
            );
        }
    }
}

/// Parse and validate the model's answer for `employees`.
///
/// Every failure is logged in detail and reported with the same generic
/// message.
pub fn parse_response(response: &str, employees: &[Employee]) -> PlannerResult<ScheduleData> {
    let Some(mut schedule) = parse_json_from_response(response) else {
        error!("Could not extract a valid schedule from response: {}", response);
        return Err(generation_error(&t!("generation_failed")));
    };

    if schedule.employees.len() != employees.len() {
        error!(
            "Generated data has {} employees, expected {}",
            schedule.employees.len(),
            employees.len()
        );
        return Err(generation_error(&t!("generation_failed")));
    }

    for employee in employees {
        let name = employee.full_name();
        if !schedule.employees.iter().any(|row| row.employee_name == name) {
            warn!("Generated schedule has no row named '{}'", name);
        }
    }

    normalize(&mut schedule);
    Ok(schedule)
}
