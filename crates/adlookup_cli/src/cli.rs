use adlookup_core::{LookupField, Separator};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "adlookup",
    version,
    about = "Look up employees in Active Directory",
    after_help = "Connection settings are read from AD_URL, AD_USER, AD_PASSWORD, AD_DOMAIN \
                  and optionally AD_BASE_DN, AD_SIZE_LIMIT, AD_TIMEOUT_SECS."
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Absolute directory for rolling log files")]
    pub log_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        requires = "log_dir",
        help = "Log level (trace|debug|info|warn|error), needs --log-dir"
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search by short name, full name, e-mail or employee number
    Find {
        query: String,
        #[arg(long, help = "Write the results to this CSV file")]
        export: Option<PathBuf>,
    },
    /// Search one specific field
    Lookup {
        value: String,
        #[arg(long, value_enum, default_value_t = FieldArg::ShortName)]
        field: FieldArg,
        #[arg(long, help = "Write the results to this CSV file")]
        export: Option<PathBuf>,
    },
    /// Look up every identifier listed in a text file
    File {
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = FieldArg::ShortName)]
        field: FieldArg,
        #[arg(long, value_enum, default_value_t = SeparatorArg::Comma)]
        separator: SeparatorArg,
        #[arg(long, help = "Write the results to this CSV file")]
        export: Option<PathBuf>,
    },
    /// List the members of a directory group
    Group {
        name: String,
        #[arg(long, help = "Write the results to this CSV file")]
        export: Option<PathBuf>,
    },
    /// List the groups an account belongs to
    Groups {
        short_name: String,
        #[arg(long, help = "Write the group list to this CSV file")]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    ShortName,
    FullName,
    Email,
    EmpId,
}

impl From<FieldArg> for LookupField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::ShortName => LookupField::ShortName,
            FieldArg::FullName => LookupField::FullName,
            FieldArg::Email => LookupField::Email,
            FieldArg::EmpId => LookupField::EmployeeId,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeparatorArg {
    Comma,
    Semicolon,
}

impl From<SeparatorArg> for Separator {
    fn from(value: SeparatorArg) -> Self {
        match value {
            SeparatorArg::Comma => Separator::Comma,
            SeparatorArg::Semicolon => Separator::Semicolon,
        }
    }
}
