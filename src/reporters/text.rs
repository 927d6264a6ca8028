use anyhow::Result;
use std::fmt::Write;

use super::summary::ReportSummary;
use super::traits::{flatten, Reporter};
use crate::core::dispatcher::DirectoryResults;

/// Plain, uncolored lines, one per issue, suitable for piping.
pub struct TextReporter;

impl Reporter for TextReporter {
    fn name(&self) -> &str {
        "text"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn generate(&self, results: &DirectoryResults) -> Result<String> {
        let mut out = String::new();
        for issues in results.values() {
            for issue in issues {
                writeln!(
                    out,
                    "{}:{} [{}] {} ({})",
                    issue.file_path, issue.line_number, issue.severity, issue.description, issue.rule_id
                )?;
            }
        }

        let summary = ReportSummary::new(&flatten(results), None);
        let by_severity = &summary.statistics.by_severity;
        writeln!(
            out,
            "{} issues ({} errors, {} warnings, {} info) in {} files",
            summary.total_issues,
            by_severity["error"],
            by_severity["warning"],
            by_severity["info"],
            summary.statistics.files_affected
        )?;
        writeln!(out, "Compliance score: {:.2}", summary.compliance_score)?;
        Ok(out)
    }
}
