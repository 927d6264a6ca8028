use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::auto_fixer::AutoFixer;
use super::manual::{ManualFixer, Priority, Suggestion};
use super::traits::AppliedFix;
use crate::analyzers::{CustomRuleAnalyzer, Issue, Severity};
use crate::core::config::Config;
use crate::core::dispatcher::{FileAnalyzer, ERROR_KEY};
use crate::error::RegistrationError;
use crate::utils::fs::write_backup;

const DIFF_PREVIEW_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixResult {
    pub original_content: String,
    pub fixed_content: String,
    pub content_changed: bool,
    pub applied_fixes: Vec<AppliedFix>,
    pub manual_suggestions: Vec<Suggestion>,
    pub fix_statistics: FixStatistics,
    pub next_steps: Vec<String>,
    pub quality_improvement: QualityImprovement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeverityStats {
    pub total: usize,
    pub auto_fixed: usize,
    pub manual_required: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixStatistics {
    pub total_issues: usize,
    pub auto_fixed: usize,
    pub manual_required: usize,
    pub completion_percentage: f64,
    pub severity_breakdown: BTreeMap<String, SeverityStats>,
    pub fix_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityImprovement {
    pub original_errors: usize,
    pub original_warnings: usize,
    pub fixed_errors: usize,
    pub fixed_warnings: usize,
    pub improvement_score: f64,
    pub remaining_errors: usize,
    pub remaining_warnings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Modified,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub line_number: usize,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub original: String,
    pub fixed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixPreview {
    pub will_modify_content: bool,
    pub automated_fixes_count: usize,
    pub manual_suggestions_count: usize,
    pub diff_preview: Vec<DiffLine>,
    pub applied_fixes: Vec<AppliedFix>,
    pub manual_suggestions: Vec<Suggestion>,
    pub fix_statistics: FixStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFixResult {
    #[serde(flatten)]
    pub result: FixResult,
    pub file_modified: bool,
    pub backup_created: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryFixSummary {
    pub files_analyzed: usize,
    pub files_modified: usize,
    pub modification_rate: f64,
    pub total_automated_fixes: usize,
    pub total_manual_suggestions: usize,
    pub average_fixes_per_file: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryFixResult {
    pub directory: String,
    pub files_processed: usize,
    pub files_modified: usize,
    pub modified_files: Vec<String>,
    pub total_automated_fixes: usize,
    pub total_manual_suggestions: usize,
    pub file_results: BTreeMap<String, FileFixResult>,
    /// Files (or the directory itself, under `"error"`) that could not be fixed.
    pub errors: BTreeMap<String, String>,
    pub summary: DirectoryFixSummary,
}

/// Coordinates automated fixing and manual guidance for one file or a tree.
pub struct FixManager {
    auto_fixer: AutoFixer,
    manual_fixer: ManualFixer,
    analyzer: FileAnalyzer,
}

impl FixManager {
    pub fn new() -> Self {
        Self {
            auto_fixer: AutoFixer::new(),
            manual_fixer: ManualFixer::new(),
            analyzer: FileAnalyzer::default(),
        }
    }

    /// Registers the config's custom rules with both the analyzer and the
    /// fix registry, and its custom suggestions with the manual advisor.
    pub fn with_config(config: Config) -> Result<Self, RegistrationError> {
        let custom = CustomRuleAnalyzer::with_definitions(&config.custom_rules)?;
        let auto_fixer = AutoFixer::with_custom_rules(custom.rules());

        let mut manual_fixer = ManualFixer::new();
        for (rule_id, template) in &config.custom_suggestions {
            manual_fixer.add_custom_suggestion(rule_id, template.clone())?;
        }

        Ok(Self {
            auto_fixer,
            manual_fixer,
            analyzer: FileAnalyzer::with_config(config)?,
        })
    }

    pub fn auto_fixer(&self) -> &AutoFixer {
        &self.auto_fixer
    }

    pub fn manual_fixer(&self) -> &ManualFixer {
        &self.manual_fixer
    }

    pub fn one_click_fix(&self, content: &str, file_path: &str, issues: &[Issue]) -> FixResult {
        let (auto, manual): (Vec<Issue>, Vec<Issue>) =
            issues.iter().cloned().partition(|i| i.auto_fixable);

        let (fixed_content, applied_fixes) = self.auto_fixer.fix_content(content, file_path, &auto);
        let manual_suggestions = self.manual_fixer.get_manual_suggestions(&manual);

        FixResult {
            original_content: content.to_string(),
            content_changed: fixed_content != content,
            fixed_content,
            fix_statistics: fix_statistics(issues, &applied_fixes, &manual_suggestions),
            next_steps: next_steps(&applied_fixes, &manual_suggestions),
            quality_improvement: quality_improvement(issues, &applied_fixes),
            applied_fixes,
            manual_suggestions,
        }
    }

    /// Runs the same fold as [`one_click_fix`](Self::one_click_fix) and
    /// reports what would change.
    pub fn preview_fixes(&self, content: &str, file_path: &str, issues: &[Issue]) -> FixPreview {
        let result = self.one_click_fix(content, file_path, issues);
        FixPreview {
            will_modify_content: result.content_changed,
            automated_fixes_count: result.applied_fixes.len(),
            manual_suggestions_count: result.manual_suggestions.len(),
            diff_preview: diff_preview(content, &result.fixed_content),
            applied_fixes: result.applied_fixes,
            manual_suggestions: result.manual_suggestions,
            fix_statistics: result.fix_statistics,
        }
    }

    /// Analyzes the file when `issues` is `None`. When the content changes a
    /// `.backup` of the original is written first; a failed backup is logged
    /// and the fixed content is still written.
    pub fn fix_file(&self, path: &Path, issues: Option<Vec<Issue>>) -> Result<FileFixResult> {
        let original = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let path_str = path.display().to_string();
        let issues = match issues {
            Some(issues) => issues,
            None => self.analyzer.analyze_file(&path_str, Some(&original)),
        };

        let result = self.one_click_fix(&original, &path_str, &issues);
        if !result.content_changed {
            return Ok(FileFixResult {
                result,
                file_modified: false,
                backup_created: false,
            });
        }

        let backup_created = match write_backup(path, &original) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(path = %path_str, error = %e, "backup failed, writing fixes anyway");
                false
            }
        };
        std::fs::write(path, &result.fixed_content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path_str, fixes = result.applied_fixes.len(), "file fixed");

        Ok(FileFixResult {
            result,
            file_modified: true,
            backup_created,
        })
    }

    pub fn fix_directory(&self, directory: &Path, patterns: Option<&[String]>) -> DirectoryFixResult {
        let mut outcome = DirectoryFixResult {
            directory: directory.display().to_string(),
            ..Default::default()
        };

        for (file_path, issues) in self.analyzer.analyze_directory(directory, patterns) {
            if file_path == ERROR_KEY {
                let message = issues
                    .first()
                    .map_or_else(|| "Directory not found".to_string(), |i| i.description.clone());
                outcome.errors.insert(file_path, message);
                continue;
            }
            match self.fix_file(Path::new(&file_path), Some(issues)) {
                Ok(result) => {
                    outcome.total_automated_fixes += result.result.applied_fixes.len();
                    outcome.total_manual_suggestions += result.result.manual_suggestions.len();
                    if result.file_modified {
                        outcome.modified_files.push(file_path.clone());
                    }
                    outcome.file_results.insert(file_path, result);
                }
                Err(e) => {
                    tracing::warn!(path = %file_path, error = %e, "fix failed");
                    outcome.errors.insert(file_path, format!("{e:#}"));
                }
            }
        }

        outcome.files_processed = outcome.file_results.len();
        outcome.files_modified = outcome.modified_files.len();
        outcome.summary = directory_summary(&outcome.file_results);
        outcome
    }
}

impl Default for FixManager {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn fixed_rule_ids(applied_fixes: &[AppliedFix]) -> HashSet<&str> {
    applied_fixes.iter().map(|f| f.rule_id.as_str()).collect()
}

pub fn fix_statistics(
    issues: &[Issue],
    applied_fixes: &[AppliedFix],
    manual_suggestions: &[Suggestion],
) -> FixStatistics {
    let fixed = fixed_rule_ids(applied_fixes);
    let total_issues = issues.len();
    let completion_percentage = if total_issues == 0 {
        100.0
    } else {
        round1(applied_fixes.len() as f64 / total_issues as f64 * 100.0)
    };

    let mut severity_breakdown = BTreeMap::new();
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let of_severity: Vec<&Issue> = issues.iter().filter(|i| i.severity == severity).collect();
        severity_breakdown.insert(
            severity.as_str().to_string(),
            SeverityStats {
                total: of_severity.len(),
                auto_fixed: of_severity
                    .iter()
                    .filter(|i| i.auto_fixable && fixed.contains(i.rule_id.as_str()))
                    .count(),
                manual_required: manual_suggestions
                    .iter()
                    .filter(|s| s.severity == severity)
                    .count(),
            },
        );
    }

    let mut fix_types = BTreeMap::new();
    for fix in applied_fixes {
        *fix_types.entry(fix.kind.as_str().to_string()).or_insert(0) += 1;
    }

    FixStatistics {
        total_issues,
        auto_fixed: applied_fixes.len(),
        manual_required: manual_suggestions.len(),
        completion_percentage,
        severity_breakdown,
        fix_types,
    }
}

pub fn next_steps(applied_fixes: &[AppliedFix], manual_suggestions: &[Suggestion]) -> Vec<String> {
    let mut steps = Vec::new();

    if !applied_fixes.is_empty() {
        steps.push(format!("{} issues were automatically fixed", applied_fixes.len()));
    }

    let high = manual_suggestions.iter().filter(|s| s.priority == Priority::High).count();
    if high > 0 {
        steps.push(format!("Address {high} high-priority issues manually"));
    }
    let medium = manual_suggestions.iter().filter(|s| s.priority == Priority::Medium).count();
    if medium > 0 {
        steps.push(format!("Consider fixing {medium} medium-priority issues"));
    }

    if applied_fixes.is_empty() && manual_suggestions.is_empty() {
        steps.push("No issues found - code quality looks good!".to_string());
    }
    steps.push("Run tests to ensure fixes don't break functionality".to_string());

    steps
}

/// Errors weigh 3, warnings 1. An issue counts as fixed when a fix was
/// applied under its rule id.
pub fn quality_improvement(issues: &[Issue], applied_fixes: &[AppliedFix]) -> QualityImprovement {
    let fixed = fixed_rule_ids(applied_fixes);
    let count = |severity: Severity, only_fixed: bool| {
        issues
            .iter()
            .filter(|i| i.severity == severity)
            .filter(|i| !only_fixed || fixed.contains(i.rule_id.as_str()))
            .count()
    };

    let original_errors = count(Severity::Error, false);
    let original_warnings = count(Severity::Warning, false);
    let fixed_errors = count(Severity::Error, true);
    let fixed_warnings = count(Severity::Warning, true);

    let total_weight = original_errors * 3 + original_warnings;
    let fixed_weight = fixed_errors * 3 + fixed_warnings;
    let improvement_score = if total_weight == 0 {
        0.0
    } else {
        round1(fixed_weight as f64 / total_weight as f64 * 100.0)
    };

    QualityImprovement {
        original_errors,
        original_warnings,
        fixed_errors,
        fixed_warnings,
        improvement_score,
        remaining_errors: original_errors - fixed_errors,
        remaining_warnings: original_warnings - fixed_warnings,
    }
}

/// Line-by-line comparison, first [`DIFF_PREVIEW_LIMIT`] differences only.
pub fn diff_preview(original: &str, fixed: &str) -> Vec<DiffLine> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let fixed_lines: Vec<&str> = fixed.split('\n').collect();
    let max = original_lines.len().max(fixed_lines.len());

    (0..max)
        .filter_map(|i| {
            let before = original_lines.get(i).copied().unwrap_or("");
            let after = fixed_lines.get(i).copied().unwrap_or("");
            if before == after {
                return None;
            }
            let kind = match (before.is_empty(), after.is_empty()) {
                (false, false) => ChangeKind::Modified,
                (_, false) => ChangeKind::Added,
                _ => ChangeKind::Removed,
            };
            Some(DiffLine {
                line_number: i + 1,
                kind,
                original: before.to_string(),
                fixed: after.to_string(),
            })
        })
        .take(DIFF_PREVIEW_LIMIT)
        .collect()
}

fn directory_summary(file_results: &BTreeMap<String, FileFixResult>) -> DirectoryFixSummary {
    let files = file_results.len();
    let modified = file_results.values().filter(|r| r.file_modified).count();
    let fixes: usize = file_results.values().map(|r| r.result.applied_fixes.len()).sum();
    let suggestions: usize = file_results
        .values()
        .map(|r| r.result.manual_suggestions.len())
        .sum();

    let (modification_rate, average_fixes_per_file) = if files == 0 {
        (0.0, 0.0)
    } else {
        (
            round1(modified as f64 / files as f64 * 100.0),
            round1(fixes as f64 / files as f64),
        )
    };

    DirectoryFixSummary {
        files_analyzed: files,
        files_modified: modified,
        modification_rate,
        total_automated_fixes: fixes,
        total_manual_suggestions: suggestions,
        average_fixes_per_file,
    }
}
