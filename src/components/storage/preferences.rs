use super::store::{keys, KeyValueStore};
use crate::components::export::{ExportSettings, FontSize};
use crate::components::roster::{default_employees, Employee, MAX_EMPLOYEES, MIN_EMPLOYEES};
use crate::components::schedule::{ScheduleData, ShiftTimes, Weekday};
use crate::utils::time::is_valid_date;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// User preferences restored at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub employees: Vec<Employee>,
    pub shift_times: ShiftTimes,
    pub export_settings: ExportSettings,
}

impl Preferences {
    /// Load every slot independently; a slot that fails to load falls back
    /// to its default without affecting the others
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            employees: load_employees(store),
            shift_times: load_shift_times(store),
            export_settings: load_export_settings(store),
        }
    }
}

fn read_slot(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored {}, using defaults", key);
            return None;
        }
        Err(e) => {
            error!("Failed to load {} from storage: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Failed to parse stored {}: {}", key, e);
            None
        }
    }
}

/// Rewrite the old bare-day preference format (`"monday"`) as a full day
/// off (`"monday-full"`)
fn migrate_employee(mut value: Value) -> Value {
    if let Some(pref) = value.get_mut("preferredDayOff") {
        let migrated = pref
            .as_str()
            .filter(|day| day.parse::<Weekday>().is_ok())
            .map(|day| format!("{}-full", day));
        if let Some(migrated) = migrated {
            debug!("Migrating preferred day off to {}", migrated);
            *pref = Value::String(migrated);
        }
    }
    value
}

fn parse_employees(value: Value) -> Result<Vec<Employee>, String> {
    let Value::Array(items) = value else {
        return Err("not an array".to_string());
    };
    if !(MIN_EMPLOYEES..=MAX_EMPLOYEES).contains(&items.len()) {
        return Err(format!("{} employees stored", items.len()));
    }

    let migrated = Value::Array(items.into_iter().map(migrate_employee).collect());
    let mut employees: Vec<Employee> =
        serde_json::from_value(migrated).map_err(|e| e.to_string())?;

    let mut ids = HashSet::new();
    for employee in &mut employees {
        if employee.id.is_empty()
            || employee.first_name.is_empty()
            || employee.last_name.is_empty()
            || employee.role.is_empty()
        {
            return Err(format!("incomplete employee record {:?}", employee.id));
        }
        if !ids.insert(employee.id.clone()) {
            return Err(format!("duplicate employee id {}", employee.id));
        }
        employee.clamp_target_hours();
    }

    Ok(employees)
}

/// Load the roster, migrating old preference values
pub fn load_employees(store: &dyn KeyValueStore) -> Vec<Employee> {
    let Some(value) = read_slot(store, keys::EMPLOYEES) else {
        return default_employees();
    };

    match parse_employees(value) {
        Ok(employees) => {
            info!("Loaded {} employees", employees.len());
            employees
        }
        Err(e) => {
            warn!("Stored employees are invalid ({}), using defaults", e);
            default_employees()
        }
    }
}

/// Load the shift times; all six must be present and valid
pub fn load_shift_times(store: &dyn KeyValueStore) -> ShiftTimes {
    let Some(value) = read_slot(store, keys::SHIFT_TIMES) else {
        return ShiftTimes::default();
    };

    match serde_json::from_value::<ShiftTimes>(value) {
        Ok(times) if times.invalid_fields().is_empty() => times,
        Ok(times) => {
            warn!(
                "Stored shift times have invalid fields {:?}, using defaults",
                times.invalid_fields()
            );
            ShiftTimes::default()
        }
        Err(e) => {
            warn!("Stored shift times are invalid ({}), using defaults", e);
            ShiftTimes::default()
        }
    }
}

/// Load the export settings.
///
/// Institution and manager names are required. An unknown font size or a
/// malformed week start is dropped and replaced by its default while the
/// rest of the stored settings is kept.
pub fn load_export_settings(store: &dyn KeyValueStore) -> ExportSettings {
    let mut settings = ExportSettings::default();
    let Some(value) = read_slot(store, keys::EXPORT_SETTINGS) else {
        return settings;
    };

    let (Some(institution_name), Some(manager_name)) = (
        value.get("institutionName").and_then(Value::as_str),
        value.get("managerName").and_then(Value::as_str),
    ) else {
        warn!("Stored export settings are invalid, using defaults");
        return settings;
    };
    settings.institution_name = institution_name.to_string();
    settings.manager_name = manager_name.to_string();

    match value.get("fontSize").and_then(Value::as_str) {
        Some(size) => match size.parse::<FontSize>() {
            Ok(size) => settings.font_size = size,
            Err(e) => warn!("{}, using {}", e, settings.font_size),
        },
        None => debug!("No stored font size"),
    }

    match value.get("weekStartDate").and_then(Value::as_str) {
        Some(date) if is_valid_date(date) => settings.week_start_date = date.to_string(),
        Some(date) => warn!("Invalid stored week start date '{}', using today", date),
        None => debug!("No stored week start date"),
    }

    settings
}

/// Load the committed schedule, if one was stored
pub fn load_schedule(store: &dyn KeyValueStore) -> Option<ScheduleData> {
    let value = read_slot(store, keys::SCHEDULE)?;
    serde_json::from_value(value)
        .map_err(|e| warn!("Stored schedule is invalid ({}), ignoring it", e))
        .ok()
}

fn save_slot<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(crate::error::Error::from)
        .and_then(|json| store.set(key, &json));

    if let Err(e) = result {
        error!("Failed to save {} to storage: {}", key, e);
    }
}

/// Persist the roster; failures are only logged
pub fn save_employees(store: &dyn KeyValueStore, employees: &[Employee]) {
    save_slot(store, keys::EMPLOYEES, employees);
}

/// Persist the shift times; failures are only logged
pub fn save_shift_times(store: &dyn KeyValueStore, shift_times: &ShiftTimes) {
    save_slot(store, keys::SHIFT_TIMES, shift_times);
}

/// Persist the export settings; failures are only logged
pub fn save_export_settings(store: &dyn KeyValueStore, settings: &ExportSettings) {
    save_slot(store, keys::EXPORT_SETTINGS, settings);
}

/// Persist or clear the committed schedule; failures are only logged
pub fn save_schedule(store: &dyn KeyValueStore, schedule: Option<&ScheduleData>) {
    match schedule {
        Some(schedule) => save_slot(store, keys::SCHEDULE, schedule),
        None => {
            if let Err(e) = store.remove(keys::SCHEDULE) {
                error!("Failed to clear stored schedule: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::roster::{DayPart, PreferredDayOff};
    use crate::components::storage::store::InMemoryStore;
    use crate::error::{storage_error, PlannerResult};
    use serde_json::json;

    fn employee_json(id: &str, pref: &str) -> Value {
        json!({
            "id": id,
            "firstName": "Sara",
            "lastName": id,
            "role": "Nurse",
            "preferredDayOff": pref,
            "targetHours": 30
        })
    }

    fn store_with(key: &str, value: Value) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.set(key, &value.to_string()).unwrap();
        store
    }

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> PlannerResult<Option<String>> {
            Err(storage_error("disk on fire"))
        }
        fn set(&self, _key: &str, _value: &str) -> PlannerResult<()> {
            Err(storage_error("disk on fire"))
        }
        fn remove(&self, _key: &str) -> PlannerResult<()> {
            Err(storage_error("disk on fire"))
        }
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let prefs = Preferences::load(&InMemoryStore::new());
        assert_eq!(prefs.employees, default_employees());
        assert_eq!(prefs.shift_times, ShiftTimes::default());
        assert_eq!(prefs.export_settings.institution_name, "اسم المؤسسة");
    }

    #[test]
    fn test_broken_store_gives_defaults() {
        let prefs = Preferences::load(&BrokenStore);
        assert_eq!(prefs.employees.len(), 3);
        // Saving must not panic or surface anything
        save_employees(&BrokenStore, &prefs.employees);
        save_schedule(&BrokenStore, None);
    }

    #[test]
    fn test_employees_bare_day_migration() {
        let store = store_with(
            keys::EMPLOYEES,
            json!([
                employee_json("a", "monday"),
                employee_json("b", "saturday"),
                employee_json("c", "wednesday-evening"),
            ]),
        );
        let employees = load_employees(&store);
        assert_eq!(
            employees[0].preferred_day_off,
            PreferredDayOff::Day(Weekday::Monday, DayPart::Full)
        );
        assert_eq!(
            employees[1].preferred_day_off,
            PreferredDayOff::Day(Weekday::Saturday, DayPart::Full)
        );
        assert_eq!(
            employees[2].preferred_day_off,
            PreferredDayOff::Day(Weekday::Wednesday, DayPart::Evening)
        );
    }

    #[test]
    fn test_invalid_employees_fall_back() {
        let cases = [
            json!([]),
            json!({"id": "a"}),
            json!([employee_json("a", "any"), employee_json("b", "any")]),
            json!([employee_json("a", "any"), employee_json("b", "any"), employee_json("c", "sunday")]),
            json!([employee_json("a", "any"), employee_json("a", "any"), employee_json("c", "any")]),
            json!([employee_json("a", "any"), employee_json("b", "any"), {"id": "c", "firstName": "x"}]),
        ];
        for case in cases {
            let store = store_with(keys::EMPLOYEES, case.clone());
            assert_eq!(load_employees(&store), default_employees(), "{}", case);
        }

        let store = InMemoryStore::new();
        store.set(keys::EMPLOYEES, "not json").unwrap();
        assert_eq!(load_employees(&store), default_employees());
    }

    #[test]
    fn test_target_hours_clamped_on_load() {
        let mut big = employee_json("a", "any");
        big["targetHours"] = json!(60);
        let store = store_with(
            keys::EMPLOYEES,
            json!([big, employee_json("b", "any"), employee_json("c", "any")]),
        );
        assert_eq!(load_employees(&store)[0].target_hours, 40.0);
    }

    #[test]
    fn test_shift_times_validation() {
        let mut times = serde_json::to_value(ShiftTimes::default()).unwrap();
        times["monThuEveningEnd"] = json!("18:00");
        let store = store_with(keys::SHIFT_TIMES, times.clone());
        assert_eq!(load_shift_times(&store).mon_thu_evening_end, "18:00");

        times.as_object_mut().unwrap().remove("friSatMorningEnd");
        let store = store_with(keys::SHIFT_TIMES, times.clone());
        assert_eq!(load_shift_times(&store), ShiftTimes::default());

        times["friSatMorningEnd"] = json!("25:99");
        let store = store_with(keys::SHIFT_TIMES, times);
        assert_eq!(load_shift_times(&store), ShiftTimes::default());
    }

    #[test]
    fn test_export_settings_partial_repair() {
        let store = store_with(
            keys::EXPORT_SETTINGS,
            json!({
                "institutionName": "Clinic",
                "managerName": "Dr. Noor",
                "fontSize": "huge",
                "weekStartDate": "2024-03-04"
            }),
        );
        let settings = load_export_settings(&store);
        assert_eq!(settings.institution_name, "Clinic");
        assert_eq!(settings.manager_name, "Dr. Noor");
        assert_eq!(settings.font_size, FontSize::Medium);
        assert_eq!(settings.week_start_date, "2024-03-04");

        let store = store_with(
            keys::EXPORT_SETTINGS,
            json!({
                "institutionName": "Clinic",
                "managerName": "Dr. Noor",
                "fontSize": "large",
                "weekStartDate": "March 4th"
            }),
        );
        let settings = load_export_settings(&store);
        assert_eq!(settings.font_size, FontSize::Large);
        assert_eq!(settings.week_start_date, ExportSettings::default().week_start_date);
    }

    #[test]
    fn test_export_settings_require_names() {
        let store = store_with(keys::EXPORT_SETTINGS, json!({"institutionName": "Clinic"}));
        assert_eq!(load_export_settings(&store).institution_name, "اسم المؤسسة");
    }

    #[test]
    fn test_slots_are_independent() {
        let store = InMemoryStore::new();
        store.set(keys::EMPLOYEES, "garbage").unwrap();
        let times = ShiftTimes {
            fri_sat_morning_end: "13:00".to_string(),
            ..ShiftTimes::default()
        };
        save_shift_times(&store, &times);

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.employees, default_employees());
        assert_eq!(prefs.shift_times, times);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = InMemoryStore::new();
        let mut employees = default_employees();
        employees[1].preferred_day_off = PreferredDayOff::Day(Weekday::Thursday, DayPart::Morning);
        save_employees(&store, &employees);
        assert_eq!(load_employees(&store), employees);

        let schedule = ScheduleData::default();
        save_schedule(&store, Some(&schedule));
        assert_eq!(load_schedule(&store), Some(schedule));
        save_schedule(&store, None);
        assert_eq!(load_schedule(&store), None);
    }
}
