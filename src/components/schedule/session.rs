use super::catalog::{resolve_shift, ShiftKey};
use super::inference::InferencePolicy;
use super::models::{ScheduleData, Weekday};
use super::reconcile::reconcile_schedule;
use super::shift_times::ShiftTimes;
use crate::error::{editing_error, PlannerResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Whether the schedule is being edited
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Viewing,
    Editing {
        /// Copy of the committed schedule receiving the edits
        working: ScheduleData,
    },
}

/// A generated schedule together with its edit state.
///
/// The committed value is the "original" that cancelling returns to; edits
/// go to a working copy taken when editing starts.
#[derive(Debug, Clone)]
pub struct ScheduleSession {
    committed: Arc<ScheduleData>,
    state: EditState,
}

impl ScheduleSession {
    /// Start a session from a freshly generated schedule
    pub fn new(schedule: ScheduleData) -> Self {
        Self {
            committed: Arc::new(schedule),
            state: EditState::Viewing,
        }
    }

    /// The schedule as currently shown, including uncommitted edits
    pub fn live(&self) -> &ScheduleData {
        match &self.state {
            EditState::Viewing => self.committed.as_ref(),
            EditState::Editing { working } => working,
        }
    }

    /// The last committed schedule
    pub fn original(&self) -> &ScheduleData {
        &self.committed
    }

    /// Shared handle to the last committed schedule
    pub fn snapshot(&self) -> Arc<ScheduleData> {
        Arc::clone(&self.committed)
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Enter editing; a no-op when already editing
    pub fn start_edit(&mut self) {
        if !self.is_editing() {
            debug!("Starting schedule edit");
            self.state = EditState::Editing {
                working: (*self.committed).clone(),
            };
        }
    }

    /// Assign `key` to one employee's day in the working copy and recompute
    /// that employee's total
    pub fn change_shift(
        &mut self,
        employee_index: usize,
        day: Weekday,
        key: ShiftKey,
        shift_times: &ShiftTimes,
    ) -> PlannerResult<()> {
        let EditState::Editing { working } = &mut self.state else {
            return Err(editing_error("Schedule is not being edited"));
        };

        if !key.is_allowed_on(day) {
            return Err(editing_error(&format!(
                "Shift {} can't be assigned on {}",
                key, day
            )));
        }

        let employee = working.employees.get_mut(employee_index).ok_or_else(|| {
            editing_error(&format!("No employee at index {}", employee_index))
        })?;

        *employee.schedule.get_mut(day) = resolve_shift(key, shift_times);
        employee.recompute_total();

        debug!(
            "Set {} of {} to {} ({} hours total)",
            day, employee.employee_name, key, employee.total_hours
        );
        Ok(())
    }

    /// Commit the working copy
    pub fn save(&mut self) {
        if let EditState::Editing { working } =
            std::mem::replace(&mut self.state, EditState::Viewing)
        {
            info!("Saving schedule edits");
            self.committed = Arc::new(working);
        }
    }

    /// Discard the working copy
    pub fn cancel(&mut self) {
        if self.is_editing() {
            info!("Discarding schedule edits");
            self.state = EditState::Viewing;
        }
    }

    /// Re-derive the schedule for new shift times.
    ///
    /// Uncommitted edits are folded into the result, which becomes the new
    /// committed value; an open edit continues from it.
    pub fn reconcile(&mut self, shift_times: &ShiftTimes, policy: InferencePolicy) {
        let reconciled = reconcile_schedule(self.live(), shift_times, policy);

        if let EditState::Editing { working } = &mut self.state {
            *working = reconciled.clone();
        }
        self.committed = Arc::new(reconciled);
    }
}
