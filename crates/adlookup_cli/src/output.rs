use adlookup_core::{ActivityLog, DispatchOutcome, Employee};

const COLUMNS: [&str; 6] = ["EMPLOYEE ID", "SHORT NAME", "NAME", "E-MAIL", "DEPARTMENT", "TITLE"];

fn row(employee: &Employee) -> [&str; 6] {
    [
        employee.employee_id.as_str(),
        employee.short_name.as_str(),
        employee.display_name.as_str(),
        employee.email.as_str(),
        employee.department.as_str(),
        employee.title.as_str(),
    ]
}

/// Renders employees as an aligned plain-text table.
pub fn render_table(employees: &[Employee]) -> String {
    let mut widths = COLUMNS.map(|title| title.chars().count());
    for employee in employees {
        for (width, cell) in widths.iter_mut().zip(row(employee)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format_line(COLUMNS);
    out.push('\n');
    for employee in employees {
        out.push_str(&format_line(row(employee)));
        out.push('\n');
    }
    out
}

/// Prints the activity panel and status line to stderr.
pub fn print_activity(log: &ActivityLog, outcome: &DispatchOutcome) {
    if let Some(panel) = log.render_panel() {
        eprint!("{panel}");
    }
    match outcome {
        DispatchOutcome::Skipped => eprintln!("Nothing to search for."),
        _ => {
            if let Some(status) = log.status() {
                eprintln!("{status}");
            }
        }
    }
}
