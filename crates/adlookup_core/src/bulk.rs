//! Bulk lookup input files.
//!
//! # Responsibility
//! - Read identifier lists from plain-text files.
//! - Split lines on the user-selected separator.
//!
//! # Invariants
//! - Empty pieces are dropped; other pieces are kept verbatim and in order.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// Separator between identifiers on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }
}

/// Failure reading a lookup file.
#[derive(Debug)]
pub struct BulkFileError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl Display for BulkFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to read lookup file `{}`: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for BulkFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Splits file contents into lookup entries.
pub fn parse_lookup_entries(contents: &str, separator: Separator) -> Vec<String> {
    contents
        .trim_start_matches(UTF8_BOM)
        .lines()
        .flat_map(|line| line.split(separator.as_char()))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a UTF-8 lookup file and splits it into entries.
pub fn read_lookup_file(
    path: impl AsRef<Path>,
    separator: Separator,
) -> Result<Vec<String>, BulkFileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| BulkFileError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lookup_entries(&contents, separator))
}
