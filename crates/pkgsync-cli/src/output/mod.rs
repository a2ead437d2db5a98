//! Terminal output formatting.
//!
//! Logs go to stderr through `tracing`; this module prints the end-of-run
//! summary to stdout.

pub mod colors;
pub mod errors;

use pkgsync_sync::{ListingOutcome, SyncReport};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Handler that never emits escape codes
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print the per-package-type summary of a finished run
    pub fn summary(&self, report: &SyncReport) {
        for line in self.summary_lines(report) {
            println!("{}", line);
        }
    }

    fn summary_lines(&self, report: &SyncReport) -> Vec<String> {
        let mut lines = Vec::with_capacity(report.package_types.len() + 1);

        for type_report in &report.package_types {
            let mut line = format!(
                "{:<10} {} upserted, {} skipped, {} rejected",
                type_report.package_type,
                self.colors.green(&type_report.upserted().to_string()),
                self.colors.yellow(&type_report.skipped().to_string()),
                self.colors.red(&type_report.rejected().to_string()),
            );
            if let ListingOutcome::Aborted { page, status } = type_report.listing {
                line.push_str(&self.colors.red(&format!(" (listing stopped at page {}: HTTP {})", page, status)));
            }
            lines.push(line);
        }

        lines.push(format!(
            "{} {} upserted, {} skipped, {} rejected",
            self.colors.bold("total"),
            report.upserted(),
            report.skipped(),
            report.rejected()
        ));
        lines
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
