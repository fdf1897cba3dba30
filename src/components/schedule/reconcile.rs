use super::catalog::resolve_shift;
use super::inference::{effective_shift_key, InferencePolicy};
use super::models::{EmployeeSchedule, ScheduleData, Weekday};
use super::shift_times::ShiftTimes;
use tracing::debug;

/// Re-derive one employee's days and total for new shift times
pub fn reconcile_employee(
    employee: &EmployeeSchedule,
    shift_times: &ShiftTimes,
    policy: InferencePolicy,
) -> EmployeeSchedule {
    let mut reconciled = employee.clone();

    for day in Weekday::ALL {
        let key = effective_shift_key(employee.schedule.get(day), day, policy);
        *reconciled.schedule.get_mut(day) = resolve_shift(key, shift_times);
    }
    reconciled.recompute_total();

    reconciled
}

/// Re-derive a whole schedule for new shift times, keeping every day's
/// assignment (full, morning, evening, work or off) and updating hours,
/// descriptions and totals.
pub fn reconcile_schedule(
    schedule: &ScheduleData,
    shift_times: &ShiftTimes,
    policy: InferencePolicy,
) -> ScheduleData {
    debug!(
        "Reconciling schedule of {} employees with new shift times",
        schedule.employees.len()
    );

    ScheduleData {
        employees: schedule
            .employees
            .iter()
            .map(|employee| reconcile_employee(employee, shift_times, policy))
            .collect(),
    }
}
