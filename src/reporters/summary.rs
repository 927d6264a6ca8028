use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::{Issue, Severity};

pub const DEFAULT_TOTAL_LINES: usize = 1000;
const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Status {
    pub fn from_counts(errors: usize, warnings: usize) -> Self {
        match (errors, warnings) {
            (0, 0) => Status::Excellent,
            (0, w) if w <= 5 => Status::Good,
            (e, w) if e <= 2 && w <= 10 => Status::Fair,
            _ => Status::NeedsImprovement,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Status::Excellent => "No issues found - excellent code quality!",
            Status::Good => "Good code quality with minor warnings",
            Status::Fair => "Fair code quality - some issues need attention",
            Status::NeedsImprovement => "Code quality needs improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub file: String,
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    /// errors * 3 + warnings
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleStats {
    pub rule_id: String,
    pub count: usize,
    pub severity: Severity,
    pub category: String,
    pub auto_fixable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueStatistics {
    pub total: usize,
    pub by_severity: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub auto_fixable: usize,
    pub files_affected: usize,
    pub most_problematic_files: Vec<FileStats>,
    pub most_common_rules: Vec<RuleStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_issues: usize,
    pub compliance_score: f64,
    pub status: Status,
    pub status_message: String,
    pub statistics: IssueStatistics,
    pub recommendations: Vec<String>,
}

impl ReportSummary {
    /// `total_lines` scales the compliance penalty and defaults to
    /// [`DEFAULT_TOTAL_LINES`].
    pub fn new(issues: &[Issue], total_lines: Option<usize>) -> Self {
        let statistics = issue_statistics(issues);
        let errors = statistics.by_severity["error"];
        let warnings = statistics.by_severity["warning"];
        let status = Status::from_counts(errors, warnings);

        Self {
            total_issues: statistics.total,
            compliance_score: compliance_score(issues, total_lines.unwrap_or(DEFAULT_TOTAL_LINES)),
            status,
            status_message: status.message().to_string(),
            recommendations: recommendations(&statistics),
            statistics,
        }
    }
}

fn weight(severity: Severity) -> usize {
    match severity {
        Severity::Error => 10,
        Severity::Warning => 5,
        Severity::Info => 1,
    }
}

/// 0-100, two decimals. The penalty is capped at half the line count.
pub fn compliance_score(issues: &[Issue], total_lines: usize) -> f64 {
    if issues.is_empty() {
        return 100.0;
    }
    let total_lines = total_lines.max(1) as f64;
    let total_weight: usize = issues.iter().map(|i| weight(i.severity)).sum();
    let penalty = (total_weight as f64).min(total_lines * 0.5);
    let score = (100.0 - penalty / total_lines * 100.0).max(0.0);
    (score * 100.0).round() / 100.0
}

pub fn issue_statistics(issues: &[Issue]) -> IssueStatistics {
    let mut by_severity: BTreeMap<String, usize> = [Severity::Error, Severity::Warning, Severity::Info]
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let mut by_category = BTreeMap::new();
    let mut by_file: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();

    for issue in issues {
        *by_severity.entry(issue.severity.as_str().to_string()).or_insert(0) += 1;
        *by_category.entry(issue.category.clone()).or_insert(0) += 1;
        by_file.entry(issue.file_path.as_str()).or_default().push(issue);
    }

    IssueStatistics {
        total: issues.len(),
        by_severity,
        by_category,
        auto_fixable: issues.iter().filter(|i| i.auto_fixable).count(),
        files_affected: by_file.len(),
        most_problematic_files: most_problematic_files(&by_file),
        most_common_rules: most_common_rules(issues),
    }
}

fn most_problematic_files(by_file: &BTreeMap<&str, Vec<&Issue>>) -> Vec<FileStats> {
    let mut stats: Vec<FileStats> = by_file
        .iter()
        .map(|(file, issues)| {
            let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
            let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
            FileStats {
                file: file.to_string(),
                total_issues: issues.len(),
                errors,
                warnings,
                score: errors * 3 + warnings,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.score.cmp(&a.score));
    stats.truncate(TOP_N);
    stats
}

fn most_common_rules(issues: &[Issue]) -> Vec<RuleStats> {
    let mut rules: Vec<RuleStats> = Vec::new();
    for issue in issues {
        match rules.iter_mut().find(|r| r.rule_id == issue.rule_id) {
            Some(rule) => rule.count += 1,
            None => rules.push(RuleStats {
                rule_id: issue.rule_id.clone(),
                count: 1,
                severity: issue.severity,
                category: issue.category.clone(),
                auto_fixable: issue.auto_fixable,
            }),
        }
    }
    rules.sort_by(|a, b| b.count.cmp(&a.count));
    rules.truncate(TOP_N);
    rules
}

pub fn recommendations(stats: &IssueStatistics) -> Vec<String> {
    let errors = stats.by_severity.get("error").copied().unwrap_or(0);
    let warnings = stats.by_severity.get("warning").copied().unwrap_or(0);
    let mut out = Vec::new();

    if errors > 0 {
        out.push(format!("Fix {errors} critical error(s) immediately"));
    }
    if stats.auto_fixable > 0 {
        out.push(format!(
            "Run auto-fix to resolve {} issue(s) automatically",
            stats.auto_fixable
        ));
    }
    if warnings > 10 {
        out.push("Consider addressing warnings to improve code quality".to_string());
    }
    if stats.files_affected > 5 {
        out.push("Focus on most problematic files first".to_string());
    }
    if out.is_empty() {
        out.push("Great job! Code quality looks excellent".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(rule_id: &str, severity: Severity, file: &str) -> Issue {
        Issue::new(rule_id, severity, "typescript", file, 1, "x")
    }

    #[test]
    fn test_compliance_score() {
        assert_eq!(compliance_score(&[], 1000), 100.0);

        let issues = vec![
            make_issue("a", Severity::Error, "a.ts"),
            make_issue("b", Severity::Warning, "a.ts"),
            make_issue("c", Severity::Info, "a.ts"),
        ];
        // 16 / 1000
        assert_eq!(compliance_score(&issues, 1000), 98.4);
        // capped at half the lines
        assert_eq!(compliance_score(&issues, 10), 50.0);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Status::from_counts(0, 0), Status::Excellent);
        assert_eq!(Status::from_counts(0, 5), Status::Good);
        assert_eq!(Status::from_counts(0, 6), Status::Fair);
        assert_eq!(Status::from_counts(2, 10), Status::Fair);
        assert_eq!(Status::from_counts(3, 0), Status::NeedsImprovement);
        assert_eq!(Status::from_counts(0, 11), Status::NeedsImprovement);
    }

    #[test]
    fn test_statistics() {
        let issues = vec![
            make_issue("a", Severity::Warning, "a.ts"),
            make_issue("a", Severity::Warning, "b.ts"),
            make_issue("b", Severity::Error, "b.ts"),
            make_issue("c", Severity::Info, "c.ts").fixable(),
        ];
        let stats = issue_statistics(&issues);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_severity["warning"], 2);
        assert_eq!(stats.by_category["typescript"], 4);
        assert_eq!(stats.auto_fixable, 1);
        assert_eq!(stats.files_affected, 3);
        assert_eq!(stats.most_problematic_files[0].file, "b.ts");
        assert_eq!(stats.most_problematic_files[0].score, 4);
        assert_eq!(stats.most_common_rules[0].rule_id, "a");
        assert_eq!(stats.most_common_rules[0].count, 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReportSummary::new(&[], None);
        assert_eq!(summary.status, Status::Excellent);
        assert_eq!(summary.compliance_score, 100.0);
        assert_eq!(summary.statistics.by_severity["error"], 0);
        assert_eq!(
            summary.recommendations,
            vec!["Great job! Code quality looks excellent".to_string()]
        );
    }

    #[test]
    fn test_recommendations() {
        let mut issues: Vec<Issue> = (0..12)
            .map(|i| make_issue("w", Severity::Warning, &format!("f{i}.ts")))
            .collect();
        issues.push(make_issue("e", Severity::Error, "f0.ts").fixable());
        let summary = ReportSummary::new(&issues, None);
        assert_eq!(summary.status, Status::NeedsImprovement);
        assert_eq!(
            summary.recommendations,
            vec![
                "Fix 1 critical error(s) immediately".to_string(),
                "Run auto-fix to resolve 1 issue(s) automatically".to_string(),
                "Consider addressing warnings to improve code quality".to_string(),
                "Focus on most problematic files first".to_string(),
            ]
        );
        assert_eq!(summary.statistics.most_problematic_files.len(), 10);
    }
}
