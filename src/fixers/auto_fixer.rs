use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::registry::FixRegistry;
use super::traits::{AppliedFix, FixAttempt, FixKind};
use crate::analyzers::custom::CustomRule;
use crate::analyzers::Issue;

static PROPERTY_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*:\s*(\w+)").unwrap());
static ASSIGNMENT_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*(\w+)").unwrap());
static CALL_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*\(\s*(\w+)").unwrap());
static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());

/// Applies registered line-local transforms for auto-fixable issues, one
/// issue at a time against the progressively rewritten content.
pub struct AutoFixer {
    registry: FixRegistry,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixableCounts {
    pub auto_fixable: usize,
    pub pattern_fixable: usize,
    pub linter_fixable: usize,
    pub manual_only: usize,
}

impl AutoFixer {
    pub fn new() -> Self {
        Self::with_registry(FixRegistry::builtin())
    }

    pub fn with_registry(registry: FixRegistry) -> Self {
        Self { registry }
    }

    /// Built-in transforms plus the templates of auto-fixable custom rules.
    pub fn with_custom_rules(rules: &[CustomRule]) -> Self {
        let mut registry = FixRegistry::builtin();
        for rule in rules {
            registry.register_custom_rule(rule);
        }
        Self::with_registry(registry)
    }

    pub fn registry(&self) -> &FixRegistry {
        &self.registry
    }

    /// Issues not flagged `auto_fixable` are never touched. Fixes that do not
    /// apply are dropped; the rest are recorded in application order.
    pub fn fix_content(&self, content: &str, file_path: &str, issues: &[Issue]) -> (String, Vec<AppliedFix>) {
        issues.iter().filter(|i| i.auto_fixable).fold(
            (content.to_string(), Vec::new()),
            |(current, mut applied), issue| match self.apply_issue_fix(&current, issue) {
                (FixAttempt::Applied { content, description }, kind) => {
                    applied.push(AppliedFix {
                        kind,
                        rule_id: issue.rule_id.clone(),
                        description,
                        line_number: issue.line_number,
                    });
                    (content, applied)
                }
                (FixAttempt::Skipped { reason }, _) => {
                    tracing::debug!(
                        path = file_path,
                        rule_id = %issue.rule_id,
                        line = issue.line_number,
                        %reason,
                        "fix skipped"
                    );
                    (current, applied)
                }
            },
        )
    }

    pub fn apply_issue_fix(&self, content: &str, issue: &Issue) -> (FixAttempt, FixKind) {
        match self.registry.find(&issue.rule_id) {
            Some(pattern) => {
                let attempt = rewrite_line(content, issue.line_number, |line| {
                    pattern.apply(line, content).ok_or("Pattern not found or condition not met")
                });
                let attempt = match attempt {
                    FixAttempt::Applied { content, .. } => FixAttempt::Applied {
                        content,
                        description: format!("Applied pattern fix for {}", issue.rule_id),
                    },
                    skipped => skipped,
                };
                (attempt, FixKind::PatternFix)
            }
            None => (generic_fix(content, issue), FixKind::GenericFix),
        }
    }

    pub fn fixable_issue_counts(&self, issues: &[Issue]) -> FixableCounts {
        let mut counts = FixableCounts::default();
        for issue in issues {
            if issue.auto_fixable {
                counts.auto_fixable += 1;
            } else if self.registry.contains(&issue.rule_id) {
                counts.pattern_fixable += 1;
            } else if matches!(issue.category.as_str(), "eslint" | "prettier") {
                counts.linter_fixable += 1;
            } else {
                counts.manual_only += 1;
            }
        }
        counts
    }
}

impl Default for AutoFixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `edit` on line `line_number` (1-based) and splices the result back.
fn rewrite_line<F>(content: &str, line_number: usize, edit: F) -> FixAttempt
where
    F: FnOnce(&str) -> Result<String, &'static str>,
{
    let lines: Vec<&str> = content.split('\n').collect();
    let Some(index) = line_number.checked_sub(1).filter(|i| *i < lines.len()) else {
        return FixAttempt::skipped(format!("Line {line_number} is out of range"));
    };

    match edit(lines[index]) {
        Ok(new_line) => {
            let rebuilt: Vec<&str> = lines
                .iter()
                .enumerate()
                .map(|(i, line)| if i == index { new_line.as_str() } else { *line })
                .collect();
            FixAttempt::Applied {
                content: rebuilt.join("\n"),
                description: String::new(),
            }
        }
        Err(reason) => FixAttempt::skipped(reason),
    }
}

/// Keyword fallback for fixable issues without a registered transform.
fn generic_fix(content: &str, issue: &Issue) -> FixAttempt {
    let description = issue.description.to_lowercase();
    let (label, edit): (&str, fn(&str) -> Result<String, &'static str>) =
        if description.contains("unused") && description.contains("import") {
            ("Commented out unused import", comment_out_import)
        } else if description.contains("semicolon") {
            ("Added missing semicolon", add_semicolon)
        } else if description.contains("spacing") {
            ("Fixed spacing issues", fix_spacing)
        } else if description.contains("quote") {
            ("Fixed quote style", single_quotes)
        } else {
            return FixAttempt::skipped("No generic fix available");
        };

    match rewrite_line(content, issue.line_number, edit) {
        FixAttempt::Applied { content, .. } => FixAttempt::Applied {
            content,
            description: label.to_string(),
        },
        skipped => skipped,
    }
}

fn comment_out_import(line: &str) -> Result<String, &'static str> {
    if line.trim().starts_with("import") {
        Ok(format!("// {line}"))
    } else {
        Err("Could not fix unused import")
    }
}

fn add_semicolon(line: &str) -> Result<String, &'static str> {
    let trimmed = line.trim_end();
    if trimmed.ends_with(';') {
        Err("Could not add semicolon")
    } else {
        Ok(format!("{trimmed};"))
    }
}

fn fix_spacing(line: &str) -> Result<String, &'static str> {
    let fixed = PROPERTY_SPACING.replace_all(line, "$1: $2");
    let fixed = ASSIGNMENT_SPACING.replace_all(&fixed, "$1 = $2");
    let fixed = CALL_SPACING.replace_all(&fixed, "$1($2").into_owned();
    if fixed == line {
        Err("Could not fix spacing")
    } else {
        Ok(fixed)
    }
}

fn single_quotes(line: &str) -> Result<String, &'static str> {
    let fixed = DOUBLE_QUOTED.replace_all(line, "'$1'").into_owned();
    if fixed == line {
        Err("Could not fix quotes")
    } else {
        Ok(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::Severity;

    fn make_issue(rule_id: &str, line: usize, description: &str, auto_fixable: bool) -> Issue {
        let issue = Issue::new(rule_id, Severity::Warning, "test", "src/a.ts", line, description);
        if auto_fixable {
            issue.fixable()
        } else {
            issue
        }
    }

    #[test]
    fn test_prefer_const_fix() {
        let fixer = AutoFixer::new();
        let issues = vec![make_issue("ts-prefer-const", 1, "Use const", true)];
        let (content, applied) = fixer.fix_content("let apiKey = \"abc\";", "src/a.ts", &issues);
        assert_eq!(content, "const apiKey = \"abc\";");
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].kind, FixKind::PatternFix);
        assert_eq!(applied[0].rule_id, "ts-prefer-const");
        assert_eq!(applied[0].description, "Applied pattern fix for ts-prefer-const");
        assert_eq!(applied[0].line_number, 1);
    }

    #[test]
    fn test_non_fixable_issues_are_ignored() {
        let fixer = AutoFixer::new();
        let issues = vec![make_issue("ts-prefer-const", 1, "Use const", false)];
        let (content, applied) = fixer.fix_content("let a = 1;", "src/a.ts", &issues);
        assert_eq!(content, "let a = 1;");
        assert!(applied.is_empty());
    }

    #[test]
    fn test_fixes_are_sequential() {
        let fixer = AutoFixer::new();
        let issues = vec![
            make_issue("ts-naming-camelcase", 1, "Variable 'user_name' should use camelCase", true),
            make_issue("ts-prefer-const", 1, "Use const", true),
        ];
        let (content, applied) = fixer.fix_content("let user_name = 'x';", "src/a.ts", &issues);
        assert_eq!(content, "const userName = 'x';");
        assert_eq!(applied.len(), 2);
    }

    #[test]
    fn test_failed_fix_is_dropped() {
        let fixer = AutoFixer::new();
        let issues = vec![
            make_issue("ts-prefer-const", 1, "Use const", true),
            make_issue("ts-prefer-const", 9, "Use const", true),
        ];
        let content = "let count = 0;\ncount = 1;";
        let (fixed, applied) = fixer.fix_content(content, "src/a.ts", &issues);
        assert_eq!(fixed, content);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_generic_unused_import_is_commented_out() {
        let fixer = AutoFixer::new();
        let issues = vec![make_issue("ts-no-unused-imports", 1, "Unused import: foo", true)];
        let (content, applied) =
            fixer.fix_content("import { foo } from './foo';\nbar();", "src/a.ts", &issues);
        assert_eq!(content, "// import { foo } from './foo';\nbar();");
        assert_eq!(applied[0].kind, FixKind::GenericFix);
        assert_eq!(applied[0].description, "Commented out unused import");
    }

    #[test]
    fn test_generic_fallbacks() {
        let fixer = AutoFixer::new();
        let cases = [
            ("Missing semicolon", "const a = 1", "const a = 1;"),
            ("Inconsistent spacing", "const obj = { a :b }", "const obj = { a: b }"),
            ("Prefer single quote", "const a = \"x\";", "const a = 'x';"),
        ];
        for (description, input, expected) in cases {
            let issues = vec![make_issue("style", 1, description, true)];
            let (content, applied) = fixer.fix_content(input, "src/a.ts", &issues);
            assert_eq!(content, expected, "{description}");
            assert_eq!(applied.len(), 1);
        }

        let issues = vec![make_issue("style", 1, "Something else entirely", true)];
        let (_, applied) = fixer.fix_content("x", "src/a.ts", &issues);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_fixable_issue_counts() {
        let fixer = AutoFixer::new();
        let mut eslint = make_issue("no-unused-vars", 1, "x", false);
        eslint.category = "eslint".to_string();
        let issues = vec![
            make_issue("ts-prefer-const", 1, "x", true),
            make_issue("pw-stable-locators", 1, "x", false),
            eslint,
            make_issue("pw-explicit-waits", 1, "x", false),
        ];
        let counts = fixer.fixable_issue_counts(&issues);
        assert_eq!(
            counts,
            FixableCounts {
                auto_fixable: 1,
                pattern_fixable: 1,
                linter_fixable: 1,
                manual_only: 1,
            }
        );
    }
}
