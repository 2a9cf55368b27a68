//! Uniform execution of user-triggered searches.
//!
//! # Responsibility
//! - Run a search described by a `QueryDefinition` through one code path.
//! - Convert search failures into activity-log entries.
//!
//! # Invariants
//! - A rejected precondition leaves the session untouched.
//! - The result list is replaced in one step after the search returns.
//! - Search errors never propagate past `SearchSession::process_query`.

pub mod queries;

use crate::activity::{ActivityLog, Severity};
use crate::directory::DirectoryClient;
use crate::model::employee::Employee;
use crate::service::employee_service::{EmployeeService, LookupResult};
use log::info;
use std::time::Instant;

/// Search step of a query; may add warnings to the activity log.
pub type SearchFn<'a> =
    Box<dyn FnOnce(&str, &mut ActivityLog) -> LookupResult<Vec<Employee>> + 'a>;

/// One user action: input, precondition, search and result summary.
pub struct QueryDefinition<'a> {
    pub query: String,
    pub can_search: Box<dyn Fn(&str) -> bool + 'a>,
    pub do_search: SearchFn<'a>,
    pub summarize: Box<dyn Fn(&[Employee]) -> String + 'a>,
}

impl<'a> QueryDefinition<'a> {
    pub fn new(
        query: impl Into<String>,
        can_search: impl Fn(&str) -> bool + 'a,
        do_search: impl FnOnce(&str, &mut ActivityLog) -> LookupResult<Vec<Employee>> + 'a,
        summarize: impl Fn(&[Employee]) -> String + 'a,
    ) -> Self {
        Self {
            query: query.into(),
            can_search: Box::new(can_search),
            do_search: Box::new(do_search),
            summarize: Box::new(summarize),
        }
    }
}

/// Result of dispatching one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Precondition rejected the input; nothing ran.
    Skipped,
    Completed { count: usize, status: String },
    Failed { message: String },
}

impl DispatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result list and activity log shared by consecutive searches.
#[derive(Debug, Default)]
pub struct SearchSession {
    employees: Vec<Employee>,
    log: ActivityLog,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Runs `definition` and records its outcome.
    pub fn process_query(&mut self, definition: QueryDefinition<'_>) -> DispatchOutcome {
        let QueryDefinition {
            query,
            can_search,
            do_search,
            summarize,
        } = definition;

        if !can_search(&query) {
            return DispatchOutcome::Skipped;
        }

        self.log.clear();
        self.employees.clear();

        let started_at = Instant::now();
        match do_search(&query, &mut self.log) {
            Ok(employees) => {
                let status = summarize(&employees);
                let count = employees.len();
                self.employees = employees;
                self.log.set_status_bar(&status);
                info!(
                    "event=dispatch module=dispatch status=ok results={} warnings={} duration_ms={}",
                    count,
                    self.log.count(Severity::Warning),
                    started_at.elapsed().as_millis()
                );
                DispatchOutcome::Completed { count, status }
            }
            Err(err) => {
                let message = format!("An error occurred during search: {err}");
                self.log.push_to_panel(Severity::Error, message.clone());
                DispatchOutcome::Failed { message }
            }
        }
    }

    /// Looks up the groups of `employee` for a side panel.
    ///
    /// Failures are posted to the activity log and yield `None`. The result
    /// list is left as is.
    pub fn process_group_lookup<D: DirectoryClient>(
        &mut self,
        service: &EmployeeService<D>,
        employee: &Employee,
    ) -> Option<Vec<String>> {
        match service.groups_for_member(&employee.short_name) {
            Ok(groups) => {
                if !groups.is_empty() {
                    self.log.set_status_bar(format!(
                        "Found {} groups for {}",
                        groups.len(),
                        employee.display_name
                    ));
                }
                Some(groups)
            }
            Err(err) => {
                self.log.push_to_panel(Severity::Error, err.to_string());
                None
            }
        }
    }
}
