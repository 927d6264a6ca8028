use anyhow::Result;
use colored::*;
use serde::Serialize;

use ts_reviewer::analyzers::{Issue, Severity};
use ts_reviewer::core::DirectoryResults;
use ts_reviewer::fixers::manager::{DirectoryFixResult, FixPreview, FixResult};
use ts_reviewer::fixers::manual::{Priority, Suggestion};
use ts_reviewer::reporters::summary::{ReportSummary, Status};
use ts_reviewer::standards::CodeStandard;

const RULE: usize = 64;

pub struct OutputFormatter {
    format: String,
}

impl OutputFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn display_results(&self, results: &DirectoryResults) -> Result<()> {
        let all: Vec<Issue> = results.values().flatten().cloned().collect();
        let summary = ReportSummary::new(&all, None);
        if self.is_json() {
            return self.print_json(&serde_json::json!({
                "summary": summary,
                "files": results,
            }));
        }

        println!();
        for (file, issues) in results {
            println!("{}", file.cyan().bold());
            for issue in issues {
                println!(
                    "  {:>5}  {}  {} {}",
                    issue.line_number,
                    severity_label(issue.severity),
                    issue.description,
                    format!("({})", issue.rule_id).dimmed()
                );
                if let Some(fix) = &issue.suggested_fix {
                    println!("         {} {}", "Suggestion:".dimmed(), fix.dimmed());
                }
            }
            println!();
        }

        println!("{}", "─".repeat(RULE));
        let score = format!("Compliance score: {:.2}", summary.compliance_score);
        println!("  {}", status_colored(summary.status, &score).bold());
        println!("  {}", summary.status_message);
        let by_severity = &summary.statistics.by_severity;
        println!(
            "  {} issues ({} errors, {} warnings, {} info) in {} files, {} auto-fixable",
            summary.total_issues,
            by_severity["error"],
            by_severity["warning"],
            by_severity["info"],
            summary.statistics.files_affected,
            summary.statistics.auto_fixable
        );
        println!();
        for recommendation in &summary.recommendations {
            println!("  - {recommendation}");
        }
        println!();
        Ok(())
    }

    pub fn display_fix(&self, path: &str, result: &FixResult, file_modified: bool) -> Result<()> {
        if self.is_json() {
            return self.print_json(result);
        }

        println!();
        println!("{}", path.cyan().bold());
        for fix in &result.applied_fixes {
            println!("  {} line {:<5} {}", "FIXED".green(), fix.line_number, fix.description);
        }
        if !result.applied_fixes.is_empty() && !file_modified {
            println!("  {}", "No changes written.".yellow());
        }
        self.display_suggestions(&result.manual_suggestions);

        println!("{}", "─".repeat(RULE));
        println!(
            "  {}% complete, quality improvement {}",
            result.fix_statistics.completion_percentage,
            result.quality_improvement.improvement_score
        );
        for step in &result.next_steps {
            println!("  - {step}");
        }
        println!();
        Ok(())
    }

    pub fn display_preview(&self, path: &str, preview: &FixPreview) -> Result<()> {
        if self.is_json() {
            return self.print_json(preview);
        }

        println!();
        println!("{} {}", "DRY-RUN".cyan(), path.bold());
        if !preview.will_modify_content {
            println!("  {}", "No automated changes.".green());
        }
        for line in &preview.diff_preview {
            println!("  {:>5} {} {}", line.line_number, "-".red(), line.original.red());
            println!("  {:>5} {} {}", line.line_number, "+".green(), line.fixed.green());
        }
        self.display_suggestions(&preview.manual_suggestions);
        println!();
        Ok(())
    }

    pub fn display_directory_fix(&self, result: &DirectoryFixResult) -> Result<()> {
        if self.is_json() {
            return self.print_json(result);
        }

        println!();
        for file in &result.modified_files {
            println!("  {} {}", "FIXED".green(), file);
        }
        for (file, error) in &result.errors {
            println!("  {} {}: {}", "ERROR".red(), file, error);
        }
        println!("{}", "─".repeat(RULE));
        println!(
            "  {} of {} files modified ({}%), {} automated fixes, {} manual suggestions",
            result.files_modified,
            result.files_processed,
            result.summary.modification_rate,
            result.total_automated_fixes,
            result.total_manual_suggestions
        );
        println!();
        Ok(())
    }

    pub fn display_standards(&self, standards: &[&CodeStandard]) -> Result<()> {
        if self.is_json() {
            return self.print_json(&standards);
        }

        println!();
        for standard in standards {
            let fixable = if standard.auto_fixable {
                " auto-fixable".green()
            } else {
                "".normal()
            };
            println!(
                "  {}  {} [{}]{}",
                severity_label(standard.severity),
                standard.rule_id.bold(),
                standard.category,
                fixable
            );
            println!("           {}", standard.description);
        }
        println!();
        println!("  {} standards", standards.len());
        Ok(())
    }

    fn display_suggestions(&self, suggestions: &[Suggestion]) {
        if suggestions.is_empty() {
            return;
        }
        println!();
        println!("  {}", "MANUAL".yellow().bold());
        for suggestion in suggestions {
            let priority = match suggestion.priority {
                Priority::High => "high".red(),
                Priority::Medium => "medium".yellow(),
                Priority::Low => "low".normal(),
            };
            println!(
                "  [{}] {} ({} issue(s), {})",
                priority,
                suggestion.title.bold(),
                suggestion.issue_count,
                suggestion.rule_id.dimmed()
            );
            for step in &suggestion.steps {
                println!("         - {step}");
            }
        }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<7}", severity.to_string());
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warning => label.yellow().bold(),
        Severity::Info => label.blue(),
    }
}

fn status_colored(status: Status, text: &str) -> ColoredString {
    match status {
        Status::Excellent => text.green(),
        Status::Good => text.blue(),
        Status::Fair => text.yellow(),
        Status::NeedsImprovement => text.red(),
    }
}
