use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info = 0,
    Warning = 50,
    Error = 100,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// One finding. The serialized field set is the wire format shared by every
/// renderer, so fields must not be renamed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub rule_id: String,
    pub description: String,
    pub severity: Severity,
    /// 1-based.
    pub line_number: usize,
    /// 0-based.
    pub column: usize,
    pub file_path: String,
    pub suggested_fix: Option<String>,
    pub auto_fixable: bool,
    pub category: String,
}

impl Issue {
    pub fn new(
        rule_id: &str,
        severity: Severity,
        category: &str,
        file_path: &str,
        line_number: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            description: description.into(),
            severity,
            line_number: line_number.max(1),
            column: 0,
            file_path: file_path.to_string(),
            suggested_fix: None,
            auto_fixable: false,
            category: category.to_string(),
        }
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    pub fn fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}

/// The text under analysis together with the path it came from.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

impl<'a> SourceFile<'a> {
    pub fn new(path: &'a str, content: &'a str) -> Self {
        Self { path, content }
    }

    /// Lines split on `\n`; line `n` is at index `n - 1`.
    pub fn lines(&self) -> Vec<&'a str> {
        self.content.split('\n').collect()
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(self.path)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
    }

    pub fn file_name(&self) -> String {
        Path::new(self.path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn is_script(&self) -> bool {
        matches!(self.extension().as_deref(), Some(".ts") | Some(".js"))
    }

    pub fn is_feature(&self) -> bool {
        self.extension().as_deref() == Some(".feature")
    }

    pub fn is_test_file(&self) -> bool {
        self.path.contains(".spec.ts") || self.path.contains(".test.ts")
    }
}

/// A scanner for one source dialect. Implementations hold no per-call state,
/// so one instance can serve any number of files.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn applies_to(&self, file: &SourceFile) -> bool;
    fn analyze(&self, file: &SourceFile) -> Vec<Issue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_issue_wire_format() {
        let issue = Issue::new("ts-no-any", Severity::Warning, "type-safety", "a.ts", 3, "Avoid any")
            .at_column(7);
        let value = serde_json::to_value(&issue).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        let mut expected = vec![
            "rule_id",
            "description",
            "severity",
            "line_number",
            "column",
            "file_path",
            "suggested_fix",
            "auto_fixable",
            "category",
        ];
        let mut actual = keys.clone();
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["suggested_fix"], serde_json::Value::Null);
        assert_eq!(value["column"], 7);
    }

    #[test]
    fn test_issue_line_is_at_least_one() {
        let issue = Issue::new("x", Severity::Info, "misc", "a.ts", 0, "d");
        assert_eq!(issue.line_number, 1);
    }

    #[test]
    fn test_source_file_kinds() {
        let spec = SourceFile::new("tests/login.spec.ts", "");
        assert!(spec.is_script());
        assert!(spec.is_test_file());
        assert_eq!(spec.extension().as_deref(), Some(".ts"));
        assert_eq!(spec.file_name(), "login.spec.ts");

        let feature = SourceFile::new("features/Login.FEATURE", "");
        assert!(feature.is_feature());
        assert!(!feature.is_script());
    }
}
