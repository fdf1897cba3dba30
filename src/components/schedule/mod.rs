//! Shift catalog, shift key inference, reconciliation and the edit session
//! of a generated weekly schedule.

pub mod catalog;
pub mod inference;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod shift_times;

pub use catalog::{resolve_shift, resolve_shift_str, ShiftKey};
pub use inference::{effective_shift_key, infer_shift_key, infer_shift_key_with, InferencePolicy};
pub use models::{DaySchedule, EmployeeSchedule, ScheduleData, ShiftStatus, WeekSchedule, Weekday};
pub use reconcile::reconcile_schedule;
pub use session::{EditState, ScheduleSession};
pub use shift_times::{ShiftField, ShiftTimes};
