//! `adlookup` command-line front end.
//!
//! # Responsibility
//! - Collect user input and hand it to core query dispatch.
//! - Render results, activity entries and CSV exports.

mod cli;
mod output;

use adlookup_core::dispatch::queries::{field_search, file_search, group_search, simple_search};
use adlookup_core::{
    default_log_level, export_employees, export_groups, init_logging, DirectoryConfig,
    DispatchOutcome, EmployeeService, LdapDirectory, LookupField, QueryDefinition, SearchSession,
};
use clap::Parser;
use cli::{Cli, Commands};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let config = DirectoryConfig::from_env()?;
    info!("event=cli_start module=cli title=\"{}\"", config.title());
    let service = EmployeeService::new(LdapDirectory::new(config));
    let mut session = SearchSession::new();

    match cli.command {
        Commands::Find { query, export } => {
            let definition = simple_search(&service, &query);
            dispatch(&mut session, definition, cli.json, export.as_deref())
        }
        Commands::Lookup {
            value,
            field,
            export,
        } => {
            let definition = field_search(&service, field.into(), &value);
            dispatch(&mut session, definition, cli.json, export.as_deref())
        }
        Commands::File {
            path,
            field,
            separator,
            export,
        } => {
            let path = path.to_string_lossy();
            let definition = file_search(&service, &path, separator.into(), field.into());
            dispatch(&mut session, definition, cli.json, export.as_deref())
        }
        Commands::Group { name, export } => {
            let definition = group_search(&service, &name);
            dispatch(&mut session, definition, cli.json, export.as_deref())
        }
        Commands::Groups { short_name, export } => {
            member_groups(&service, &mut session, &short_name, cli.json, export)
        }
    }
}

fn dispatch(
    session: &mut SearchSession,
    definition: QueryDefinition<'_>,
    json: bool,
    export: Option<&Path>,
) -> Result<ExitCode, Box<dyn Error>> {
    let outcome = session.process_query(definition);

    if !matches!(outcome, DispatchOutcome::Skipped) {
        if json {
            println!("{}", serde_json::to_string_pretty(session.employees())?);
        } else if !session.employees().is_empty() {
            print!("{}", output::render_table(session.employees()));
        }
    }
    output::print_activity(session.log(), &outcome);

    if outcome.is_failed() {
        return Ok(ExitCode::FAILURE);
    }
    if let (Some(path), DispatchOutcome::Completed { .. }) = (export, &outcome) {
        export_employees(path, session.employees())?;
        eprintln!("{} saved successfully", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn member_groups(
    service: &EmployeeService<LdapDirectory>,
    session: &mut SearchSession,
    short_name: &str,
    json: bool,
    export: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn Error>> {
    let outcome = session.process_query(field_search(service, LookupField::ShortName, short_name));
    let Some(employee) = session.employees().first().cloned() else {
        output::print_activity(session.log(), &outcome);
        return Ok(if outcome.is_failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    };

    let Some(groups) = session.process_group_lookup(service, &employee) else {
        output::print_activity(session.log(), &outcome);
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        for group in &groups {
            println!("{group}");
        }
    }
    output::print_activity(session.log(), &outcome);

    if let Some(path) = export {
        export_groups(&path, &employee, &groups)?;
        eprintln!("{} saved successfully", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
