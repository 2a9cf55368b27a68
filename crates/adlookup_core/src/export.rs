//! CSV export of search results.
//!
//! # Responsibility
//! - Write employee lists and group lists as CSV text.
//!
//! # Invariants
//! - The header line is always written first, also for empty lists.
//! - Fields are written verbatim in a fixed order; no quoting or escaping.

use crate::model::employee::Employee;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const EMPLOYEE_CSV_HEADER: &str =
    "Employee ID,Firstname,Lastname,Shortname,E-mail,Department,Location,Office phone,Mobile phone,Title";

/// CSV export failure.
#[derive(Debug)]
pub enum ExportError {
    Io {
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    /// Group export needs the member's display name for its header.
    MissingDisplayName,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                path: Some(path),
                source,
            } => write!(f, "failed to write `{}`: {source}", path.display()),
            Self::Io { path: None, source } => write!(f, "failed to write csv: {source}"),
            Self::MissingDisplayName => {
                write!(f, "could not find the employee when exporting groups to CSV")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MissingDisplayName => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io {
            path: None,
            source: value,
        }
    }
}

/// Formats one employee as a CSV line (without terminator).
pub fn employee_csv_line(employee: &Employee) -> String {
    [
        employee.employee_id.as_str(),
        employee.first_name.as_str(),
        employee.last_name.as_str(),
        employee.short_name.as_str(),
        employee.email.as_str(),
        employee.department.as_str(),
        employee.location.as_str(),
        employee.office_phone.as_str(),
        employee.mobile.as_str(),
        employee.title.as_str(),
    ]
    .join(",")
}

/// Writes the header and one line per employee.
pub fn write_employees_csv<W: Write>(
    writer: &mut W,
    employees: &[Employee],
) -> Result<(), ExportError> {
    writeln!(writer, "{EMPLOYEE_CSV_HEADER}")?;
    for employee in employees {
        writeln!(writer, "{}", employee_csv_line(employee))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the groups of `employee`, one per line, under a titled header.
pub fn write_groups_csv<W: Write>(
    writer: &mut W,
    employee: &Employee,
    groups: &[String],
) -> Result<(), ExportError> {
    if employee.display_name.is_empty() {
        return Err(ExportError::MissingDisplayName);
    }
    writeln!(
        writer,
        "AD groups which {} is a member of",
        employee.display_name
    )?;
    for group in groups {
        writeln!(writer, "{group}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the employee CSV into it.
pub fn export_employees(path: impl AsRef<Path>, employees: &[Employee]) -> Result<(), ExportError> {
    let path = path.as_ref();
    write_to_path(path, |writer| write_employees_csv(writer, employees))
}

/// Creates (or truncates) `path` and writes the group CSV into it.
pub fn export_groups(
    path: impl AsRef<Path>,
    employee: &Employee,
    groups: &[String],
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if employee.display_name.is_empty() {
        return Err(ExportError::MissingDisplayName);
    }
    write_to_path(path, |writer| write_groups_csv(writer, employee, groups))
}

fn write_to_path<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ExportError>,
{
    let with_path = |source: std::io::Error| ExportError::Io {
        path: Some(path.to_path_buf()),
        source,
    };
    let file = File::create(path).map_err(with_path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(|err| match err {
        ExportError::Io { path: None, source } => with_path(source),
        other => other,
    })
}
