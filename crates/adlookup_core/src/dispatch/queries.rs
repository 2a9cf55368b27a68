//! Prebuilt query definitions for the supported search actions.

use super::QueryDefinition;
use crate::activity::{ActivityLog, Severity};
use crate::bulk::{read_lookup_file, Separator};
use crate::directory::DirectoryClient;
use crate::model::employee::Employee;
use crate::service::employee_service::EmployeeService;
use crate::service::lookup::LookupField;

/// Warning text posted when a lookup returns no records.
pub fn not_found_message(entry: &str) -> String {
    format!("Could not find any entries in AD for \"{entry}\"")
}

pub fn log_not_found(log: &mut ActivityLog, entry: &str) {
    log.push_to_panel(Severity::Warning, not_found_message(entry));
}

fn not_blank(input: &str) -> bool {
    !input.trim().is_empty()
}

fn plural<'s>(count: usize, singular: &'s str, plural: &'s str) -> &'s str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Free-text search across short name, display name, e-mail and number.
pub fn simple_search<'a, D: DirectoryClient>(
    service: &'a EmployeeService<D>,
    input: &str,
) -> QueryDefinition<'a> {
    let query = input.trim().to_string();
    let summary_query = query.clone();
    QueryDefinition::new(
        query,
        not_blank,
        move |query, _| service.find_employee(query),
        move |employees: &[Employee]| {
            format!(
                "Found {} {} for query \"{}\"",
                employees.len(),
                plural(employees.len(), "entry", "entries"),
                summary_query
            )
        },
    )
}

/// Single-field search, used for direct lookups outside bulk files.
pub fn field_search<'a, D: DirectoryClient>(
    service: &'a EmployeeService<D>,
    field: LookupField,
    input: &str,
) -> QueryDefinition<'a> {
    let query = input.trim().to_string();
    let summary_query = query.clone();
    QueryDefinition::new(
        query,
        not_blank,
        move |query, log| {
            let employees = field.search(service, query)?;
            if employees.is_empty() {
                log_not_found(log, query);
            }
            Ok(employees)
        },
        move |employees: &[Employee]| {
            format!(
                "Found {} {} for {} \"{}\"",
                employees.len(),
                plural(employees.len(), "entry", "entries"),
                field,
                summary_query
            )
        },
    )
}

/// Looks up every entry of a lookup file with `field`.
///
/// Entries without hits are logged as warnings; entries whose lookup fails
/// are logged as errors. Neither stops the batch.
pub fn file_search<'a, D: DirectoryClient>(
    service: &'a EmployeeService<D>,
    path: &str,
    separator: Separator,
    field: LookupField,
) -> QueryDefinition<'a> {
    let summary_path = path.to_string();
    QueryDefinition::new(
        path,
        not_blank,
        move |path, log| {
            let entries = read_lookup_file(path, separator)?;
            let mut employees = Vec::new();
            for entry in &entries {
                match field.search(service, entry) {
                    Ok(found) if found.is_empty() => log_not_found(log, entry),
                    Ok(found) => employees.extend(found),
                    Err(err) => log.push_to_panel(
                        Severity::Error,
                        format!("Lookup of \"{entry}\" failed: {err}"),
                    ),
                }
            }
            Ok(employees)
        },
        move |employees: &[Employee]| {
            format!(
                "Found {} {} in file \"{}\"",
                employees.len(),
                plural(employees.len(), "match", "matches"),
                summary_path
            )
        },
    )
}

/// Lists the employees that are members of a directory group.
pub fn group_search<'a, D: DirectoryClient>(
    service: &'a EmployeeService<D>,
    group: &str,
) -> QueryDefinition<'a> {
    let query = group.trim().to_string();
    let summary_group = query.clone();
    QueryDefinition::new(
        query,
        not_blank,
        move |group, log| {
            let employees = service.members_in_group(group)?;
            if employees.is_empty() {
                log_not_found(log, group);
            }
            Ok(employees)
        },
        move |employees: &[Employee]| {
            format!(
                "Found {} {} in the AD group \"{}\"",
                employees.len(),
                plural(employees.len(), "member", "members"),
                summary_group
            )
        },
    )
}
