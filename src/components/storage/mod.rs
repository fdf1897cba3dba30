//! Durable preference storage: slot backends plus the validating loaders.

pub mod preferences;
pub mod store;

pub use preferences::{
    load_employees, load_export_settings, load_schedule, load_shift_times, save_employees,
    save_export_settings, save_schedule, save_shift_times, Preferences,
};
pub use store::{keys, FileStore, InMemoryStore, KeyValueStore};
