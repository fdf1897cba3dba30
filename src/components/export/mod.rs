//! Read-only consumers of a finished schedule: CSV text and printable
//! per-employee sheets.

pub mod csv;
pub mod models;
pub mod sheet;

pub use csv::schedule_to_csv;
pub use models::{ExportSettings, FontSize};
pub use sheet::{build_sheets, EmployeeSheet, SheetRow};
