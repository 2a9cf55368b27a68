//! User-facing activity log.
//!
//! # Responsibility
//! - Collect display-panel entries produced while a search runs.
//! - Hold the single status line shown after a search completes.
//!
//! # Invariants
//! - Panel entries keep insertion order.
//! - Every panel entry is mirrored to the `log` facade.

use chrono::Local;
use log::{error, info, warn};
use std::fmt::{Display, Formatter};

const STATUS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of a display-panel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        })
    }
}

/// One display-panel entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

/// Panel entries plus status line for one search session.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    status: Option<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the display panel.
    pub fn push_to_panel(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => {
                info!("event=activity module=activity severity=info message={message}")
            }
            Severity::Warning => {
                warn!("event=activity module=activity severity=warning message={message}")
            }
            Severity::Error => {
                error!("event=activity module=activity severity=error message={message}")
            }
        }
        self.entries.push(LogEntry { severity, message });
    }

    /// Replaces the status line with a timestamped `message`.
    pub fn set_status_bar(&mut self, message: impl AsRef<str>) {
        let stamped = format!(
            "{} - {}",
            Local::now().format(STATUS_TIMESTAMP_FORMAT),
            message.as_ref()
        );
        info!("event=status module=activity message={}", message.as_ref());
        self.status = Some(stamped);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    /// Renders the panel as `Severity: message` lines, `None` when empty.
    pub fn render_panel(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|entry| format!("{}: {}\n", entry.severity, entry.message))
                .collect(),
        )
    }

    /// Drops all panel entries. The status line is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
