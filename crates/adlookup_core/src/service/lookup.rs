//! User-selectable lookup fields for bulk searches.

use super::employee_service::{parse_employee_number, EmployeeService, LookupResult};
use crate::directory::DirectoryClient;
use crate::model::employee::Employee;
use std::fmt::{Display, Formatter};

/// Field each entry of a bulk lookup is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupField {
    #[default]
    ShortName,
    FullName,
    Email,
    EmployeeId,
}

impl LookupField {
    pub const ALL: [LookupField; 4] = [
        Self::ShortName,
        Self::FullName,
        Self::Email,
        Self::EmployeeId,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortName => "short name",
            Self::FullName => "full name",
            Self::Email => "e-mail",
            Self::EmployeeId => "emp.id",
        }
    }

    /// Runs this field's search for one input value.
    ///
    /// `EmployeeId` fails with `LookupError::InvalidEmployeeNumber` when
    /// `value` is not numeric.
    pub fn search<D: DirectoryClient>(
        self,
        service: &EmployeeService<D>,
        value: &str,
    ) -> LookupResult<Vec<Employee>> {
        match self {
            Self::ShortName => service.by_short_name(value),
            Self::FullName => service.by_display_name(value),
            Self::Email => service.by_email(value),
            Self::EmployeeId => service.by_employee_number(parse_employee_number(value)?),
        }
    }
}

impl Display for LookupField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
