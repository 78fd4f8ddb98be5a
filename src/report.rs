//! In-memory run report
//!
//! Every informational and error message produced during a run is collected
//! in a [`RunReport`] so that a failed run can attach its complete log to a
//! single error dump instead of leaving it scattered across the console.
//! The report is an explicit context value threaded through the pipeline;
//! there is no process-global buffer. Entries are also emitted through
//! `tracing` as they are recorded.

use std::fmt;

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLevel::Info => write!(f, "INFO"),
            ReportLevel::Warn => write!(f, "WARN"),
            ReportLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub level: ReportLevel,
    pub message: String,
}

/// Ordered buffer of everything logged during one pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    entries: Vec<ReportEntry>,
    error_count: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an informational message.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.entries.push(ReportEntry {
            level: ReportLevel::Info,
            message,
        });
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.entries.push(ReportEntry {
            level: ReportLevel::Warn,
            message,
        });
    }

    /// Record an error. Errors are counted but do not interrupt the run;
    /// fatal conditions are surfaced through `AppError` instead.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.error_count += 1;
        self.entries.push(ReportEntry {
            level: ReportLevel::Error,
            message,
        });
    }

    /// Fold another report's entries into this one, preserving their order.
    /// Used to recombine the per-match fragments produced by the concurrent
    /// enrichment futures.
    pub fn merge(&mut self, other: RunReport) {
        self.error_count += other.error_count;
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Render the whole buffer as one text block, for attaching to a fatal
    /// error dump.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("[{}] {}\n", entry.level, entry.message));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_collects_entries_in_order() {
        let mut report = RunReport::new();
        report.info("reading cache");
        report.error("dropping invalid bracket");
        report.info("writing cache");

        assert_eq!(report.entries().len(), 3);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.entries()[0].level, ReportLevel::Info);
        assert_eq!(report.entries()[1].level, ReportLevel::Error);
        assert_eq!(report.entries()[1].message, "dropping invalid bracket");
    }

    #[test]
    fn test_report_merge_preserves_counts() {
        let mut main = RunReport::new();
        main.info("start");

        let mut fragment = RunReport::new();
        fragment.error("match details fetch failed");
        fragment.error("game stats fetch failed");

        main.merge(fragment);
        assert_eq!(main.entries().len(), 3);
        assert_eq!(main.error_count(), 2);
    }

    #[test]
    fn test_report_render_contains_levels_and_messages() {
        let mut report = RunReport::new();
        report.info("collected 4 games");
        report.warn("video for unknown game");
        report.error("invalid league");

        let rendered = report.render();
        assert!(rendered.contains("[INFO] collected 4 games"));
        assert!(rendered.contains("[WARN] video for unknown game"));
        assert!(rendered.contains("[ERROR] invalid league"));
    }
}
