use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::traits::{Analyzer, Issue, Severity, SourceFile};
use crate::error::RegistrationError;

/// Extra acceptance test run on a regex match, for rules the regex crate
/// cannot express on its own (it has no look-around).
type MatchGuard = fn(&str, usize, usize) -> bool;

struct BuiltinRule {
    id: &'static str,
    pattern: &'static str,
    message: &'static str,
    severity: Severity,
    category: &'static str,
    auto_fixable: bool,
    suggestion: &'static str,
    guard: Option<MatchGuard>,
}

const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        id: "pw-no-hardcoded-selectors",
        pattern: r#"page\.locator\(["'][^"']*#[^"']*["']"#,
        message: "Avoid hardcoded CSS ID selectors, use data-testid instead",
        severity: Severity::Warning,
        category: "playwright",
        auto_fixable: false,
        suggestion: "Use page.getByTestId(\"element-id\") instead",
        guard: None,
    },
    BuiltinRule {
        id: "pw-no-sleep-in-tests",
        pattern: r"(sleep|setTimeout|delay)\s*\(",
        message: "Avoid sleep/setTimeout in tests, use Playwright waiting methods",
        severity: Severity::Error,
        category: "playwright",
        auto_fixable: false,
        suggestion: "Use page.waitForSelector() or expect().toBeVisible()",
        guard: None,
    },
    BuiltinRule {
        id: "pw-consistent-test-structure",
        pattern: r#"test\s*\(\s*["'][^"']{1,10}["']"#,
        message: "Test names should be descriptive (more than 10 characters)",
        severity: Severity::Warning,
        category: "playwright",
        auto_fixable: false,
        suggestion: "Use descriptive test names like \"should login with valid credentials\"",
        guard: None,
    },
    BuiltinRule {
        id: "ts-no-magic-numbers",
        pattern: r"\d{2,}",
        message: "Avoid magic numbers, use named constants",
        severity: Severity::Warning,
        category: "typescript",
        auto_fixable: false,
        suggestion: "Define constants: const MAX_RETRIES = 3",
        guard: Some(standalone_number),
    },
    BuiltinRule {
        id: "ts-consistent-error-handling",
        pattern: r"catch\s*\(\s*\w+\s*\)\s*\{\s*\}",
        message: "Empty catch blocks should be avoided",
        severity: Severity::Error,
        category: "typescript",
        auto_fixable: false,
        suggestion: "Add proper error handling or logging",
        guard: None,
    },
    BuiltinRule {
        id: "ts-no-console-log",
        pattern: r"console\.log\s*\(",
        message: "Remove console.log statements before committing",
        severity: Severity::Warning,
        category: "typescript",
        auto_fixable: true,
        suggestion: "Use proper logging or remove debug statements",
        guard: None,
    },
    BuiltinRule {
        id: "pw-no-console-in-tests",
        pattern: r"console\.(log|warn|error|info|debug)\s*\(",
        message: "Avoid using console statements in Playwright tests. Use `test.step` or `reporter` for debugging/logging.",
        severity: Severity::Warning,
        category: "playwright",
        auto_fixable: true,
        suggestion: "Replace with test.step() for debugging or remove console statements",
        guard: None,
    },
    BuiltinRule {
        id: "cucumber-step-length",
        pattern: r"(Given|When|Then|And|But)\s+.{100,}",
        message: "Gherkin steps should be concise (under 100 characters)",
        severity: Severity::Warning,
        category: "cucumber",
        auto_fixable: false,
        suggestion: "Break long steps into multiple shorter steps",
        guard: None,
    },
    BuiltinRule {
        id: "cucumber-no-technical-details",
        pattern: r"(Given|When|Then|And|But).*\b(API|HTTP|JSON|XML|database|DB)\b",
        message: "Avoid technical implementation details in Gherkin steps",
        severity: Severity::Warning,
        category: "cucumber",
        auto_fixable: false,
        suggestion: "Focus on business behavior, not technical implementation",
        guard: None,
    },
    BuiltinRule {
        id: "project-todo-comments",
        pattern: r"(TODO|FIXME|HACK|XXX):",
        message: "TODO/FIXME comments should be tracked in issue tracker",
        severity: Severity::Info,
        category: "maintenance",
        auto_fixable: false,
        suggestion: "Create tickets for TODO items and reference them",
        guard: None,
    },
    BuiltinRule {
        id: "project-no-sensitive-data",
        pattern: r#"(password|secret|key|token)\s*[:=]\s*["'][^"']+["']"#,
        message: "Potential sensitive data in code",
        severity: Severity::Error,
        category: "security",
        auto_fixable: false,
        suggestion: "Use environment variables for sensitive data",
        guard: None,
    },
    BuiltinRule {
        id: "project-consistent-naming",
        pattern: r"(test|spec).*\.(js|ts)$",
        message: "Test files should follow consistent naming convention",
        severity: Severity::Info,
        category: "naming",
        auto_fixable: false,
        suggestion: "Use .spec.ts or .test.ts consistently",
        guard: None,
    },
];

/// `\d{2,}` only counts when it is not glued to a word character or a dot.
fn standalone_number(line: &str, start: usize, end: usize) -> bool {
    let glued = |c: char| c.is_alphanumeric() || c == '_' || c == '.';
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    !before.is_some_and(glued) && !after.is_some_and(glued)
}

/// A rule as written by a user, in config or through `add_custom_rule`.
/// Every field is optional here so that validation can report all the
/// missing ones at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub id: Option<String>,
    pub pattern: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub auto_fixable: bool,
    pub suggestion: Option<String>,
    /// Replacement template (`$1`, `${name}`) applied to the matched span.
    pub fix: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CustomRule {
    pub id: String,
    pattern: Regex,
    pub message: String,
    pub severity: Severity,
    pub category: String,
    pub auto_fixable: bool,
    pub suggestion: Option<String>,
    pub fix: Option<String>,
    guard: Option<MatchGuard>,
}

impl CustomRule {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn from_builtin(rule: &BuiltinRule) -> Self {
        Self {
            id: rule.id.to_string(),
            pattern: compile(rule.pattern).unwrap_or_else(|e| panic!("built-in rule {}: {e}", rule.id)),
            message: rule.message.to_string(),
            severity: rule.severity,
            category: rule.category.to_string(),
            auto_fixable: rule.auto_fixable,
            suggestion: Some(rule.suggestion.to_string()),
            fix: None,
            guard: rule.guard,
        }
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        match self.category.as_str() {
            "playwright" => file.is_test_file(),
            "typescript" => {
                file.is_script() && !(self.id == "ts-no-console-log" && file.is_test_file())
            }
            "cucumber" => file.is_feature(),
            _ => true,
        }
    }

    fn describe(&self, caps: &Captures) -> (String, Option<String>) {
        if self.id == "pw-no-console-in-tests" {
            let method = caps.get(1).map_or("log", |m| m.as_str());
            return (
                format!(
                    "Avoid using console.{method}() in Playwright tests. Use `test.step()` or `reporter` for debugging/logging."
                ),
                Some(format!(
                    "Replace console.{method}() with test.step() or remove for production"
                )),
            );
        }
        (self.message.clone(), self.suggestion.clone())
    }
}

impl TryFrom<RuleDefinition> for CustomRule {
    type Error = RegistrationError;

    fn try_from(def: RuleDefinition) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        if def.id.is_none() {
            missing.push("id");
        }
        if def.pattern.is_none() {
            missing.push("pattern");
        }
        if def.message.is_none() {
            missing.push("message");
        }
        if def.severity.is_none() {
            missing.push("severity");
        }
        if def.category.is_none() {
            missing.push("category");
        }
        if def.auto_fixable && def.fix.is_none() {
            missing.push("fix");
        }

        let (Some(id), Some(pattern), Some(message), Some(severity), Some(category)) =
            (def.id, def.pattern, def.message, def.severity, def.category)
        else {
            return Err(RegistrationError::MissingFields {
                kind: "custom rule",
                missing,
            });
        };
        if !missing.is_empty() {
            return Err(RegistrationError::MissingFields {
                kind: "custom rule",
                missing,
            });
        }

        let severity = severity
            .parse::<Severity>()
            .map_err(|_| RegistrationError::InvalidField {
                rule_id: id.clone(),
                field: "severity",
                value: severity.clone(),
            })?;
        let pattern = compile(&pattern).map_err(|source| RegistrationError::InvalidPattern {
            rule_id: id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            pattern,
            message,
            severity,
            category,
            auto_fixable: def.auto_fixable,
            suggestion: def.suggestion,
            fix: def.fix,
            guard: None,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleStatistics {
    pub total_rules: usize,
    pub categories: BTreeMap<String, usize>,
    pub severities: BTreeMap<String, usize>,
    pub auto_fixable: usize,
    pub manual_fix_required: usize,
}

/// Project linter: a table of case-insensitive line patterns, scoped by
/// category to the files they make sense for.
pub struct CustomRuleAnalyzer {
    rules: Vec<CustomRule>,
}

impl CustomRuleAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: BUILTIN_RULES.iter().map(CustomRule::from_builtin).collect(),
        }
    }

    pub fn with_definitions(definitions: &[RuleDefinition]) -> Result<Self, RegistrationError> {
        let mut analyzer = Self::new();
        for def in definitions {
            analyzer.add_custom_rule(def.clone())?;
        }
        Ok(analyzer)
    }

    pub fn add_custom_rule(&mut self, def: RuleDefinition) -> Result<(), RegistrationError> {
        let rule = CustomRule::try_from(def)?;
        self.rules.retain(|r| r.id != rule.id);
        self.rules.push(rule);
        Ok(())
    }

    pub fn remove_custom_rule(&mut self, rule_id: &str) {
        self.rules.retain(|r| r.id != rule_id);
    }

    pub fn rules(&self) -> &[CustomRule] {
        &self.rules
    }

    pub fn rules_by_category(&self, category: &str) -> Vec<&CustomRule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    pub fn rule_statistics(&self) -> RuleStatistics {
        let mut stats = RuleStatistics {
            total_rules: self.rules.len(),
            ..Default::default()
        };
        for rule in &self.rules {
            *stats.categories.entry(rule.category.clone()).or_default() += 1;
            *stats
                .severities
                .entry(rule.severity.as_str().to_string())
                .or_default() += 1;
            if rule.auto_fixable {
                stats.auto_fixable += 1;
            }
        }
        stats.manual_fix_required = stats.total_rules - stats.auto_fixable;
        stats
    }
}

impl Default for CustomRuleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for CustomRuleAnalyzer {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn description(&self) -> &'static str {
        "Project-specific pattern rules"
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        file.is_script() || file.is_feature()
    }

    fn analyze(&self, file: &SourceFile) -> Vec<Issue> {
        let lines = file.lines();
        let mut issues = Vec::new();

        for rule in self.rules.iter().filter(|r| r.applies_to(file)) {
            for (idx, line) in lines.iter().enumerate() {
                for caps in rule.pattern.captures_iter(line) {
                    let Some(m) = caps.get(0) else {
                        continue;
                    };
                    if in_comment(line, m.start()) {
                        continue;
                    }
                    if rule.guard.is_some_and(|guard| !guard(line, m.start(), m.end())) {
                        continue;
                    }

                    let (message, suggestion) = rule.describe(&caps);
                    let mut issue = Issue::new(
                        &rule.id,
                        rule.severity,
                        &rule.category,
                        file.path,
                        idx + 1,
                        message,
                    )
                    .at_column(m.start());
                    issue.suggested_fix = suggestion;
                    issue.auto_fixable = rule.auto_fixable;
                    issues.push(issue);
                }
            }
        }

        issues
    }
}

fn in_comment(line: &str, position: usize) -> bool {
    if let Some(start) = line.find("//") {
        if position > start {
            return true;
        }
    }
    line[..position].contains("/*")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(path: &str, content: &str) -> Vec<Issue> {
        CustomRuleAnalyzer::new().analyze(&SourceFile::new(path, content))
    }

    fn with_rule<'a>(issues: &'a [Issue], rule_id: &str) -> Vec<&'a Issue> {
        issues.iter().filter(|i| i.rule_id == rule_id).collect()
    }

    #[test]
    fn test_console_in_spec_files() {
        let content = "console.log('a');\nconsole.warn('b');\nconsole.log('c');";
        let issues = analyze("tests/login.spec.ts", content);
        let console = with_rule(&issues, "pw-no-console-in-tests");
        assert_eq!(console.len(), 3);
        assert!(console.iter().all(|i| i.auto_fixable));
        assert!(console[1].description.contains("console.warn()"));
        assert!(with_rule(&issues, "ts-no-console-log").is_empty());
    }

    #[test]
    fn test_console_log_in_source_files() {
        let issues = analyze("src/app.ts", "console.log(value);");
        assert_eq!(with_rule(&issues, "ts-no-console-log").len(), 1);
        assert!(with_rule(&issues, "pw-no-console-in-tests").is_empty());
    }

    #[test]
    fn test_magic_numbers() {
        let issues = analyze("src/app.ts", "const t = 5000; const v = 1.25; const id = a123; retry(7);");
        let magic = with_rule(&issues, "ts-no-magic-numbers");
        assert_eq!(magic.len(), 1);
        assert_eq!(magic[0].column, 10);
    }

    #[test]
    fn test_matches_in_comments_are_ignored() {
        let issues = analyze("src/app.ts", "// console.log('x');\nfoo(); /* console.log('y') */");
        assert!(with_rule(&issues, "ts-no-console-log").is_empty());
    }

    #[test]
    fn test_sensitive_data_is_case_insensitive() {
        let issues = analyze("src/app.ts", "let apiKey = \"abc\";");
        let secrets = with_rule(&issues, "project-no-sensitive-data");
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].severity, Severity::Error);
        assert_eq!(secrets[0].category, "security");
    }

    #[test]
    fn test_cucumber_rules_only_in_features() {
        let content = "Given I call the API endpoint";
        assert_eq!(
            with_rule(&analyze("a.feature", content), "cucumber-no-technical-details").len(),
            1
        );
        assert!(with_rule(&analyze("a.ts", content), "cucumber-no-technical-details").is_empty());
    }

    #[test]
    fn test_add_custom_rule_requires_fields() {
        let mut analyzer = CustomRuleAnalyzer::new();
        let err = analyzer
            .add_custom_rule(RuleDefinition {
                id: Some("no-debugger".to_string()),
                message: Some("Remove debugger".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        match err {
            RegistrationError::MissingFields { missing, .. } => {
                assert_eq!(missing, vec!["pattern", "severity", "category"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fixable_rule_requires_fix_template() {
        let mut analyzer = CustomRuleAnalyzer::new();
        let err = analyzer
            .add_custom_rule(RuleDefinition {
                id: Some("no-debugger".to_string()),
                pattern: Some(r"debugger;".to_string()),
                message: Some("Remove debugger".to_string()),
                severity: Some("warning".to_string()),
                category: Some("maintenance".to_string()),
                auto_fixable: true,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, RegistrationError::MissingFields { ref missing, .. } if missing == &vec!["fix"]));
    }

    #[test]
    fn test_invalid_pattern_and_severity() {
        let base = RuleDefinition {
            id: Some("bad".to_string()),
            pattern: Some("(".to_string()),
            message: Some("m".to_string()),
            severity: Some("warning".to_string()),
            category: Some("style".to_string()),
            ..Default::default()
        };
        let mut analyzer = CustomRuleAnalyzer::new();
        assert!(matches!(
            analyzer.add_custom_rule(base.clone()),
            Err(RegistrationError::InvalidPattern { .. })
        ));
        let bad_severity = RuleDefinition {
            pattern: Some("x".to_string()),
            severity: Some("fatal".to_string()),
            ..base
        };
        assert!(matches!(
            analyzer.add_custom_rule(bad_severity),
            Err(RegistrationError::InvalidField { field: "severity", .. })
        ));
    }

    #[test]
    fn test_registered_rule_runs_everywhere_for_unknown_category() {
        let mut analyzer = CustomRuleAnalyzer::new();
        analyzer
            .add_custom_rule(RuleDefinition {
                id: Some("no-debugger".to_string()),
                pattern: Some(r"debugger;".to_string()),
                message: Some("Remove debugger statements".to_string()),
                severity: Some("error".to_string()),
                category: Some("style".to_string()),
                ..Default::default()
            })
            .unwrap();
        let issues = analyzer.analyze(&SourceFile::new("a.js", "  debugger;"));
        let found = with_rule(&issues, "no-debugger");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].column, 2);
    }

    #[test]
    fn test_rule_statistics() {
        let stats = CustomRuleAnalyzer::new().rule_statistics();
        assert_eq!(stats.total_rules, 12);
        assert_eq!(stats.auto_fixable, 2);
        assert_eq!(stats.manual_fix_required, 10);
        assert_eq!(stats.categories["playwright"], 4);
    }
}
