use super::catalog::{ShiftKey, EVENING_MARKER, FULL_DAY_MARKER, MORNING_MARKER};
use super::models::{DaySchedule, ShiftStatus, Weekday};
use tracing::warn;

/// How to map a worked Monday to Thursday day whose description matches no
/// known marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferencePolicy {
    pub unmatched_work: ShiftKey,
}

impl Default for InferencePolicy {
    fn default() -> Self {
        Self {
            unmatched_work: ShiftKey::Off,
        }
    }
}

/// Infer the shift key of a day from its status and description
pub fn infer_shift_key(day_schedule: &DaySchedule, day: Weekday) -> ShiftKey {
    infer_shift_key_with(day_schedule, day, InferencePolicy::default())
}

/// Infer the shift key of a day, applying `policy` to unrecognized worked days.
///
/// Markers are checked in order, so a description containing both the
/// full-day and the morning marker is a full day.
pub fn infer_shift_key_with(
    day_schedule: &DaySchedule,
    day: Weekday,
    policy: InferencePolicy,
) -> ShiftKey {
    if day_schedule.status == ShiftStatus::Off {
        return ShiftKey::Off;
    }

    if !day.is_mon_thu() {
        return ShiftKey::FriSatWork;
    }

    let description = &day_schedule.shift_description;
    if description.contains(FULL_DAY_MARKER) {
        ShiftKey::MonThuFull
    } else if description.contains(MORNING_MARKER) {
        ShiftKey::MonThuMorning
    } else if description.contains(EVENING_MARKER) {
        ShiftKey::MonThuEvening
    } else {
        warn!(
            "Worked {} has unrecognized shift description '{}', treating it as {}",
            day, description, policy.unmatched_work
        );
        policy.unmatched_work
    }
}

/// Shift key of a day: the key it was resolved from when known, otherwise
/// inferred from its description
pub fn effective_shift_key(
    day_schedule: &DaySchedule,
    day: Weekday,
    policy: InferencePolicy,
) -> ShiftKey {
    match day_schedule.shift_key {
        Some(key) if key.is_allowed_on(day) => key,
        _ => infer_shift_key_with(day_schedule, day, policy),
    }
}
