//! Employee search service.
//!
//! # Responsibility
//! - Provide named searches (short name, e-mail, employee number, ...).
//! - Expand group membership into employee records.
//!
//! # Invariants
//! - Service APIs never talk to the directory except through `DirectoryClient`.
//! - Returned records are always fully mapped (`""` for missing attributes).

use crate::bulk::BulkFileError;
use crate::directory::{map_employee, DirectoryClient, DirectoryError};
use crate::model::employee::{Employee, SearchAttribute};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LookupResult<T> = Result<T, LookupError>;

/// Failure raised by a lookup use-case.
#[derive(Debug)]
pub enum LookupError {
    Directory(DirectoryError),
    /// Employee-number lookup input is not a number.
    InvalidEmployeeNumber(String),
    LookupFile(BulkFileError),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory(err) => write!(f, "{err}"),
            Self::InvalidEmployeeNumber(value) => {
                write!(f, "could not parse employee number `{value}`")
            }
            Self::LookupFile(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Directory(err) => Some(err),
            Self::InvalidEmployeeNumber(_) => None,
            Self::LookupFile(err) => Some(err),
        }
    }
}

impl From<DirectoryError> for LookupError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<BulkFileError> for LookupError {
    fn from(value: BulkFileError) -> Self {
        Self::LookupFile(value)
    }
}

/// Employee lookups over a directory client.
pub struct EmployeeService<D: DirectoryClient> {
    directory: D,
}

impl<D: DirectoryClient> EmployeeService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Searches persons by one attribute and maps every hit.
    pub fn employee_entries(
        &self,
        attribute: SearchAttribute,
        value: &str,
    ) -> LookupResult<Vec<Employee>> {
        let entries = self.directory.search_by_attribute(attribute, value)?;
        Ok(entries.iter().map(map_employee).collect())
    }

    pub fn by_short_name(&self, short_name: &str) -> LookupResult<Vec<Employee>> {
        self.employee_entries(SearchAttribute::ShortName, short_name)
    }

    pub fn by_display_name(&self, display_name: &str) -> LookupResult<Vec<Employee>> {
        self.employee_entries(SearchAttribute::DisplayName, display_name)
    }

    pub fn by_email(&self, email: &str) -> LookupResult<Vec<Employee>> {
        self.employee_entries(SearchAttribute::Email, email)
    }

    pub fn by_employee_number(&self, number: u32) -> LookupResult<Vec<Employee>> {
        self.employee_entries(SearchAttribute::EmployeeId, &number.to_string())
    }

    /// Looks up every member of `group`.
    ///
    /// Records are returned in membership order. Members without a matching
    /// person entry are skipped. Unknown groups yield an empty list.
    pub fn members_in_group(&self, group: &str) -> LookupResult<Vec<Employee>> {
        let short_names = self.directory.list_group_members(group)?;
        debug!(
            "event=group_members module=service members={}",
            short_names.len()
        );

        let mut employees = Vec::new();
        for short_name in &short_names {
            employees.extend(self.by_short_name(short_name)?);
        }
        Ok(employees)
    }

    /// Names of the groups `short_name` belongs to, sorted ascending.
    pub fn groups_for_member(&self, short_name: &str) -> LookupResult<Vec<String>> {
        let mut groups = self.directory.list_groups_for_member(short_name)?;
        groups.sort();
        Ok(groups)
    }

    /// Finds employees matching `input` in any identifying field.
    ///
    /// Tries short name, display name, e-mail and, when `input` is numeric,
    /// employee number. The first non-empty result wins.
    pub fn find_employee(&self, input: &str) -> LookupResult<Vec<Employee>> {
        for attribute in [
            SearchAttribute::ShortName,
            SearchAttribute::DisplayName,
            SearchAttribute::Email,
        ] {
            let employees = self.employee_entries(attribute, input)?;
            if !employees.is_empty() {
                return Ok(employees);
            }
        }

        match parse_employee_number(input) {
            Ok(number) => self.by_employee_number(number),
            Err(_) => Ok(Vec::new()),
        }
    }
}

/// Parses a user-entered employee number.
pub fn parse_employee_number(input: &str) -> LookupResult<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| LookupError::InvalidEmployeeNumber(input.to_string()))
}
