use crate::components::export::{build_sheets, schedule_to_csv, EmployeeSheet, ExportSettings};
use crate::components::generation::GenerationHandle;
use crate::components::roster::{new_employee_id, Employee, MAX_EMPLOYEES, MIN_EMPLOYEES};
use crate::components::schedule::{
    InferencePolicy, ScheduleData, ScheduleSession, ShiftField, ShiftKey, ShiftTimes, Weekday,
};
use crate::components::storage::{self, KeyValueStore, Preferences};
use crate::error::{editing_error, validation_error, Error, PlannerResult};
use crate::utils::time::{is_valid_date, is_valid_time};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The planner's application state: roster, shift times, export settings
/// and the current schedule. Every change is written to the store.
pub struct AppState {
    store: Arc<dyn KeyValueStore>,
    policy: InferencePolicy,
    employees: Vec<Employee>,
    shift_times: ShiftTimes,
    export_settings: ExportSettings,
    session: Option<ScheduleSession>,
    is_generating: bool,
    error: Option<String>,
}

impl AppState {
    /// Restore preferences from `store`
    pub fn load(store: Arc<dyn KeyValueStore>, policy: InferencePolicy) -> Self {
        let Preferences {
            employees,
            shift_times,
            export_settings,
        } = Preferences::load(store.as_ref());

        Self {
            store,
            policy,
            employees,
            shift_times,
            export_settings,
            session: None,
            is_generating: false,
            error: None,
        }
    }

    /// Bring back the committed schedule kept in the store, as it was saved
    pub fn restore_schedule(&mut self) -> bool {
        match storage::load_schedule(self.store.as_ref()) {
            Some(schedule) => {
                self.session = Some(ScheduleSession::new(schedule));
                true
            }
            None => false,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn shift_times(&self) -> &ShiftTimes {
        &self.shift_times
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    /// The schedule as shown, including uncommitted edits
    pub fn schedule(&self) -> Option<&ScheduleData> {
        self.session.as_ref().map(ScheduleSession::live)
    }

    /// The last committed schedule
    pub fn original_schedule(&self) -> Option<&ScheduleData> {
        self.session.as_ref().map(ScheduleSession::original)
    }

    pub fn is_editing(&self) -> bool {
        self.session.as_ref().is_some_and(ScheduleSession::is_editing)
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Message of the last failed generation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn persist_employees(&self) {
        storage::save_employees(self.store.as_ref(), &self.employees);
    }

    fn persist_schedule(&self) {
        storage::save_schedule(self.store.as_ref(), self.original_schedule());
    }

    /// Append a placeholder employee
    pub fn add_employee(&mut self) -> PlannerResult<&Employee> {
        if self.employees.len() >= MAX_EMPLOYEES {
            return Err(validation_error(&t!("employee_limit_reached", max = MAX_EMPLOYEES)));
        }

        let employee = Employee::new(new_employee_id(), self.employees.len() + 1);
        info!("Adding employee {}", employee.id);
        self.employees.push(employee);
        self.persist_employees();

        let last = self.employees.len() - 1;
        Ok(&self.employees[last])
    }

    /// Remove the employee with `id`
    pub fn remove_employee(&mut self, id: &str) -> PlannerResult<()> {
        if self.employees.len() <= MIN_EMPLOYEES {
            return Err(validation_error(&t!("employee_minimum_reached", min = MIN_EMPLOYEES)));
        }

        let position = self
            .employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or_else(|| validation_error(&t!("employee_not_found", id = id)))?;

        let removed = self.employees.remove(position);
        info!("Removed employee {} ({})", removed.id, removed.full_name());
        self.persist_employees();
        Ok(())
    }

    /// Change one employee through `update`; target hours are clamped to the
    /// weekly bounds afterwards
    pub fn update_employee(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut Employee),
    ) -> PlannerResult<()> {
        let employee = self
            .employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .ok_or_else(|| validation_error(&t!("employee_not_found", id = id)))?;

        update(employee);
        employee.clamp_target_hours();
        self.persist_employees();
        Ok(())
    }

    /// Set one shift time and re-derive the current schedule for it
    pub fn set_shift_time(&mut self, field: ShiftField, value: &str) -> PlannerResult<()> {
        if !is_valid_time(value) {
            return Err(validation_error(&t!("invalid_time", value = value)));
        }

        info!("Setting {} to {}", field, value);
        self.shift_times.set(field, value);
        storage::save_shift_times(self.store.as_ref(), &self.shift_times);

        if let Some(session) = &mut self.session {
            session.reconcile(&self.shift_times, self.policy);
            self.persist_schedule();
        }
        Ok(())
    }

    /// Replace the export settings
    pub fn set_export_settings(&mut self, settings: ExportSettings) -> PlannerResult<()> {
        if !is_valid_date(&settings.week_start_date) {
            return Err(validation_error(&t!(
                "invalid_date",
                value = &settings.week_start_date
            )));
        }

        self.export_settings = settings;
        storage::save_export_settings(self.store.as_ref(), &self.export_settings);
        Ok(())
    }

    /// Generate a new schedule for the roster.
    ///
    /// The previous schedule and any edit are dropped first. On failure no
    /// schedule remains and the message is kept for display.
    pub async fn generate(&mut self, generator: &GenerationHandle) -> PlannerResult<()> {
        if self.is_generating {
            warn!("Generation requested while another one is running");
            return Err(Error::Busy);
        }

        self.is_generating = true;
        self.error = None;
        self.session = None;
        self.persist_schedule();

        let result = generator.generate(&self.employees, &self.shift_times).await;
        self.is_generating = false;

        match result {
            Ok(schedule) => {
                self.session = Some(ScheduleSession::new(schedule));
                self.persist_schedule();
                Ok(())
            }
            Err(e) => {
                error!("Schedule generation failed: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn session_mut(&mut self) -> PlannerResult<&mut ScheduleSession> {
        self.session
            .as_mut()
            .ok_or_else(|| editing_error(&t!("no_schedule")))
    }

    pub fn start_edit(&mut self) -> PlannerResult<()> {
        self.session_mut()?.start_edit();
        Ok(())
    }

    /// Assign a shift in the open edit
    pub fn change_shift(
        &mut self,
        employee_index: usize,
        day: Weekday,
        key: ShiftKey,
    ) -> PlannerResult<()> {
        let shift_times = self.shift_times.clone();
        self.session_mut()?
            .change_shift(employee_index, day, key, &shift_times)
    }

    /// Commit the open edit
    pub fn save_edits(&mut self) -> PlannerResult<()> {
        self.session_mut()?.save();
        self.persist_schedule();
        Ok(())
    }

    /// Discard the open edit
    pub fn cancel_edits(&mut self) -> PlannerResult<()> {
        self.session_mut()?.cancel();
        Ok(())
    }

    /// The shown schedule, or an error when none was generated
    pub fn require_schedule(&self) -> PlannerResult<&ScheduleData> {
        self.schedule()
            .ok_or_else(|| editing_error(&t!("no_schedule")))
    }

    /// CSV export of the shown schedule
    pub fn export_csv(&self) -> PlannerResult<String> {
        Ok(schedule_to_csv(self.require_schedule()?, &self.export_settings))
    }

    /// Printable pages of the shown schedule
    pub fn sheets(&self) -> PlannerResult<Vec<EmployeeSheet>> {
        Ok(build_sheets(
            self.require_schedule()?,
            &self.employees,
            &self.export_settings,
        ))
    }
}
