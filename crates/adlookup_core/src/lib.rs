//! Core logic for AD Lookup.
//! Every lookup rule lives here; front ends only collect input and render.

pub mod activity;
pub mod bulk;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod export;
pub mod logging;
pub mod model;
pub mod service;

pub use activity::{ActivityLog, LogEntry, Severity};
pub use bulk::{parse_lookup_entries, read_lookup_file, BulkFileError, Separator};
pub use config::{ConfigError, DirectoryConfig};
pub use directory::{
    map_employee, AttributeSet, DirectoryClient, DirectoryError, DirectoryResult, LdapDirectory,
};
pub use dispatch::{DispatchOutcome, QueryDefinition, SearchSession};
pub use export::{export_employees, export_groups, ExportError, EMPLOYEE_CSV_HEADER};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, SearchAttribute};
pub use service::employee_service::{EmployeeService, LookupError, LookupResult};
pub use service::lookup::LookupField;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
