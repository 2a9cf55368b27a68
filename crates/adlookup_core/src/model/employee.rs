//! Employee record and searchable attributes.
//!
//! # Responsibility
//! - Define the flat record produced for every directory hit.
//! - Map user-facing search fields onto directory attribute names.
//!
//! # Invariants
//! - Every field is initialized; missing directory data is the empty string.
//! - `SearchAttribute::ldap_name` is stable and matches the AD schema.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One employee's flattened directory attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    /// Login name (`sAMAccountName`).
    pub short_name: String,
    /// User principal name, used as the mail address in AD.
    pub email: String,
    pub department: String,
    pub location: String,
    pub office_phone: String,
    pub fax: String,
    pub mobile: String,
    pub other_phone: String,
    pub title: String,
}

impl Employee {
    /// Creates an empty record with every field set to `""`.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Field an employee search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAttribute {
    EmployeeId,
    FirstName,
    LastName,
    DisplayName,
    ShortName,
    Email,
    Department,
    Location,
    Mobile,
    OfficePhone,
    OtherPhone,
    Fax,
    Title,
}

impl SearchAttribute {
    /// Every searchable attribute.
    pub const ALL: [SearchAttribute; 13] = [
        Self::EmployeeId,
        Self::FirstName,
        Self::LastName,
        Self::DisplayName,
        Self::ShortName,
        Self::Email,
        Self::Department,
        Self::Location,
        Self::OfficePhone,
        Self::Fax,
        Self::Mobile,
        Self::OtherPhone,
        Self::Title,
    ];

    /// Directory attribute name used in search filters and attribute lists.
    pub fn ldap_name(self) -> &'static str {
        match self {
            Self::EmployeeId => "employeeID",
            Self::FirstName => "givenName",
            Self::LastName => "sn",
            Self::DisplayName => "displayName",
            Self::ShortName => "sAMAccountName",
            Self::Email => "userPrincipalName",
            Self::Department => "department",
            Self::Location => "physicalDeliveryOfficeName",
            Self::Mobile => "mobile",
            Self::OfficePhone => "telephoneNumber",
            Self::OtherPhone => "otherTelephone",
            Self::Fax => "facsimileTelephoneNumber",
            Self::Title => "title",
        }
    }

    /// Returns the record field this attribute projects into.
    pub fn field_of(self, employee: &Employee) -> &str {
        match self {
            Self::EmployeeId => &employee.employee_id,
            Self::FirstName => &employee.first_name,
            Self::LastName => &employee.last_name,
            Self::DisplayName => &employee.display_name,
            Self::ShortName => &employee.short_name,
            Self::Email => &employee.email,
            Self::Department => &employee.department,
            Self::Location => &employee.location,
            Self::Mobile => &employee.mobile,
            Self::OfficePhone => &employee.office_phone,
            Self::OtherPhone => &employee.other_phone,
            Self::Fax => &employee.fax,
            Self::Title => &employee.title,
        }
    }

    pub(crate) fn field_of_mut(self, employee: &mut Employee) -> &mut String {
        match self {
            Self::EmployeeId => &mut employee.employee_id,
            Self::FirstName => &mut employee.first_name,
            Self::LastName => &mut employee.last_name,
            Self::DisplayName => &mut employee.display_name,
            Self::ShortName => &mut employee.short_name,
            Self::Email => &mut employee.email,
            Self::Department => &mut employee.department,
            Self::Location => &mut employee.location,
            Self::Mobile => &mut employee.mobile,
            Self::OfficePhone => &mut employee.office_phone,
            Self::OtherPhone => &mut employee.other_phone,
            Self::Fax => &mut employee.fax,
            Self::Title => &mut employee.title,
        }
    }
}

impl Display for SearchAttribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ldap_name())
    }
}
