use glob::Pattern;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::analyzers::traits::{Analyzer, Issue, Severity, SourceFile};
use crate::analyzers::{CucumberAnalyzer, CustomRuleAnalyzer, PlaywrightAnalyzer, TypeScriptAnalyzer};
use crate::core::config::Config;
use crate::error::RegistrationError;
use crate::utils::fs::walk_files;

pub const DEFAULT_PATTERNS: &[&str] = &[
    "*.ts",
    "*.js",
    "*.spec.ts",
    "*.test.ts",
    "*.feature",
    "*steps.ts",
    "*step.ts",
];

/// Key used in directory results when the directory itself is missing.
pub const ERROR_KEY: &str = "error";

/// File path to its issues. Files without issues are never present.
pub type DirectoryResults = BTreeMap<String, Vec<Issue>>;

/// Routes each file to the analyzers that understand it and merges their
/// findings. Holds no per-file state, so one instance can serve any number
/// of files.
pub struct FileAnalyzer {
    analyzers: Vec<Box<dyn Analyzer>>,
    config: Config,
}

impl FileAnalyzer {
    pub fn new(analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        Self {
            analyzers,
            config: Config::default(),
        }
    }

    /// Built-in analyzers plus any custom rules from `config`.
    pub fn with_config(config: Config) -> Result<Self, RegistrationError> {
        let mut analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(TypeScriptAnalyzer),
            Box::new(PlaywrightAnalyzer),
            Box::new(CucumberAnalyzer),
        ];
        if config.custom_rules_enabled() {
            analyzers.push(Box::new(CustomRuleAnalyzer::with_definitions(
                &config.custom_rules,
            )?));
        }
        Ok(Self { analyzers, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn select_analyzers(&self, file: &SourceFile) -> Vec<&dyn Analyzer> {
        self.analyzers
            .iter()
            .filter(|a| a.applies_to(file))
            .map(|a| a.as_ref())
            .collect()
    }

    /// Reads the file when `content` is `None`. A read failure comes back as
    /// a single `file-read-error` issue rather than an error.
    pub fn analyze_file(&self, file_path: &str, content: Option<&str>) -> Vec<Issue> {
        let owned;
        let content = match content {
            Some(c) => c,
            None => match std::fs::read_to_string(file_path) {
                Ok(c) => {
                    owned = c;
                    owned.as_str()
                }
                Err(e) => {
                    tracing::warn!(path = file_path, error = %e, "could not read file");
                    return vec![Issue::new(
                        "file-read-error",
                        Severity::Error,
                        "system",
                        file_path,
                        1,
                        format!("Could not read file: {e}"),
                    )];
                }
            },
        };

        let file = SourceFile::new(file_path, content);
        let selected = self.select_analyzers(&file);
        tracing::debug!(
            path = file_path,
            analyzers = ?selected.iter().map(|a| a.name()).collect::<Vec<_>>(),
            "selected analyzers"
        );

        let threshold = self.config.threshold();
        selected
            .into_iter()
            .flat_map(|a| a.analyze(&file))
            .filter(|i| !self.config.is_rule_ignored(&i.rule_id))
            .filter(|i| threshold.is_none_or(|t| i.severity >= t))
            .collect()
    }

    /// Walks `directory` and analyzes every file whose name matches one of
    /// `patterns` (defaults to [`DEFAULT_PATTERNS`], or the config's
    /// `patterns`). Each file is analyzed once however many patterns match.
    pub fn analyze_directory(&self, directory: &Path, patterns: Option<&[String]>) -> DirectoryResults {
        let mut results = DirectoryResults::new();

        if !directory.is_dir() {
            let path = directory.display().to_string();
            results.insert(
                ERROR_KEY.to_string(),
                vec![Issue::new(
                    "directory-not-found",
                    Severity::Error,
                    "system",
                    &path,
                    1,
                    format!("Directory not found: {path}"),
                )],
            );
            return results;
        }

        let files = self.collect_files(directory, patterns);
        let analyzed = files.len();

        for path in files {
            let path_str = path.display().to_string();
            let issues = self.analyze_file(&path_str, None);
            if !issues.is_empty() {
                results.insert(path_str, issues);
            }
        }

        tracing::info!(
            directory = %directory.display(),
            analyzed,
            with_issues = results.len(),
            "directory analyzed"
        );
        results
    }

    /// Files under `directory` whose name matches a pattern and whose path
    /// is not ignored by config, in walk order.
    pub fn collect_files(&self, directory: &Path, patterns: Option<&[String]>) -> Vec<PathBuf> {
        let patterns = self.compile_patterns(patterns);
        walk_files(directory)
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|name| patterns.iter().any(|p| p.matches(&name)))
            })
            .filter(|path| {
                let ignored = self.config.is_path_ignored(&path.display().to_string());
                if ignored {
                    tracing::debug!(path = %path.display(), "ignored by config");
                }
                !ignored
            })
            .collect()
    }

    fn compile_patterns(&self, patterns: Option<&[String]>) -> Vec<Pattern> {
        let raw: Vec<String> = match patterns.or(self.config.patterns.as_deref()) {
            Some(p) => p.to_vec(),
            None => DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        };
        raw.iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "skipping invalid file pattern");
                    None
                }
            })
            .collect()
    }
}

impl Default for FileAnalyzer {
    fn default() -> Self {
        Self::new(vec![
            Box::new(TypeScriptAnalyzer),
            Box::new(PlaywrightAnalyzer),
            Box::new(CucumberAnalyzer),
            Box::new(CustomRuleAnalyzer::new()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub total_files_analyzed: usize,
    pub total_issues: usize,
    pub severity_breakdown: BTreeMap<String, usize>,
    pub category_breakdown: BTreeMap<String, usize>,
    pub files_with_issues: usize,
    pub auto_fixable_issues: usize,
}

pub fn get_analysis_summary(results: &DirectoryResults) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total_files_analyzed: results.len(),
        files_with_issues: results.values().filter(|v| !v.is_empty()).count(),
        ..Default::default()
    };
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        summary.severity_breakdown.insert(severity.as_str().to_string(), 0);
    }

    for issue in results.values().flatten() {
        summary.total_issues += 1;
        *summary
            .severity_breakdown
            .entry(issue.severity.as_str().to_string())
            .or_default() += 1;
        *summary
            .category_breakdown
            .entry(issue.category.clone())
            .or_default() += 1;
        if issue.auto_fixable {
            summary.auto_fixable_issues += 1;
        }
    }

    summary
}

pub fn issues_by_severity(issues: &[Issue], severity: Severity) -> Vec<&Issue> {
    issues.iter().filter(|i| i.severity == severity).collect()
}

pub fn issues_by_category<'a>(issues: &'a [Issue], category: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|i| i.category == category).collect()
}

pub fn auto_fixable_issues(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|i| i.auto_fixable).collect()
}

pub fn issues_for_file<'a>(issues: &'a [Issue], file_path: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|i| i.file_path == file_path).collect()
}
