//! Directory-service boundary.
//!
//! # Responsibility
//! - Define the client contract used by services (`DirectoryClient`).
//! - Carry raw attribute sets and map them onto `Employee` records.
//! - Provide the LDAP-backed client used in production.
//!
//! # Invariants
//! - Attribute names are compared case-insensitively.
//! - Unknown groups or accounts yield empty lists, not errors.

mod attributes;
mod ldap;
mod mapper;

use crate::model::employee::SearchAttribute;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use attributes::AttributeSet;
pub use ldap::LdapDirectory;
pub use mapper::map_employee;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure talking to the directory service.
#[derive(Debug)]
pub enum DirectoryError {
    /// Transport, protocol or timeout failure reported by the LDAP client.
    Ldap(ldap3::LdapError),
    /// The server answered with a non-success result code.
    Rejected {
        operation: &'static str,
        rc: u32,
        message: String,
    },
    /// Failure raised by a non-LDAP client implementation.
    Other(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ldap(err) => write!(f, "{err}"),
            Self::Rejected {
                operation,
                rc,
                message,
            } => {
                if message.is_empty() {
                    write!(f, "directory rejected {operation} (rc={rc})")
                } else {
                    write!(f, "directory rejected {operation} (rc={rc}): {message}")
                }
            }
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ldap(err) => Some(err),
            Self::Rejected { .. } => None,
            Self::Other(_) => None,
        }
    }
}

impl From<ldap3::LdapError> for DirectoryError {
    fn from(value: ldap3::LdapError) -> Self {
        Self::Ldap(value)
    }
}

/// Client contract for the organizational directory.
pub trait DirectoryClient {
    /// Returns person entries whose `attribute` equals `value`.
    fn search_by_attribute(
        &self,
        attribute: SearchAttribute,
        value: &str,
    ) -> DirectoryResult<Vec<AttributeSet>>;

    /// Returns short names of all members of `group`, nested groups included.
    fn list_group_members(&self, group: &str) -> DirectoryResult<Vec<String>>;

    /// Returns names of the groups `short_name` is a direct member of.
    fn list_groups_for_member(&self, short_name: &str) -> DirectoryResult<Vec<String>>;
}

impl<T: DirectoryClient + ?Sized> DirectoryClient for &T {
    fn search_by_attribute(
        &self,
        attribute: SearchAttribute,
        value: &str,
    ) -> DirectoryResult<Vec<AttributeSet>> {
        (**self).search_by_attribute(attribute, value)
    }

    fn list_group_members(&self, group: &str) -> DirectoryResult<Vec<String>> {
        (**self).list_group_members(group)
    }

    fn list_groups_for_member(&self, short_name: &str) -> DirectoryResult<Vec<String>> {
        (**self).list_groups_for_member(short_name)
    }
}
