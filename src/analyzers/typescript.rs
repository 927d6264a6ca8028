use regex::Regex;
use std::sync::LazyLock;

use super::heuristics::{extract_functions, function_body, is_all_caps, Convention};
use super::traits::{Analyzer, Issue, Severity, SourceFile};

const MAX_FUNCTION_LENGTH: usize = 50;
const NULLABLE_HINTS: &[&str] = &["user.", "data.", "response."];

static VARIABLE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:let|const|var)\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());
static FUNCTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:function\s+|async\s+function\s+)([a-zA-Z_][a-zA-Z0-9_]*)").unwrap()
});
static TYPE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:class|interface)\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());
static ANY_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*any\b").unwrap());
static FUNCTION_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+\w+\s*\(([^)]+)\)").unwrap());
static PROPERTY_ACCESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\.\w+").unwrap());
static LET_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blet\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*=").unwrap());
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"import\s+(?:\{([^}]+)\}|\*\s+as\s+(\w+)|(\w+))").unwrap()
});

/// General TypeScript/JavaScript checks: naming, typing, structure, imports
/// and async error handling.
pub struct TypeScriptAnalyzer;

impl Analyzer for TypeScriptAnalyzer {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn description(&self) -> &'static str {
        "Naming, type safety, structure, import and error-handling checks"
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        file.is_script()
    }

    fn analyze(&self, file: &SourceFile) -> Vec<Issue> {
        let lines = file.lines();
        let mut issues = Vec::new();
        check_naming(file, &lines, &mut issues);
        check_type_safety(file, &lines, &mut issues);
        check_structure(file, &lines, &mut issues);
        check_imports(file, &lines, &mut issues);
        check_error_handling(file, &lines, &mut issues);
        issues
    }
}

fn check_naming(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        for caps in VARIABLE_DECL.captures_iter(line) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            let var = name.as_str();
            if line.contains("const") && is_all_caps(var) {
                if !Convention::UpperSnakeCase.matches(var) {
                    issues.push(
                        Issue::new(
                            "ts-naming-constants",
                            Severity::Warning,
                            "naming",
                            file.path,
                            line_number,
                            format!("Constant \"{var}\" should use UPPER_SNAKE_CASE"),
                        )
                        .at_column(name.start())
                        .fixable(),
                    );
                }
            } else if !is_all_caps(var) && !Convention::CamelCase.matches(var) {
                issues.push(
                    Issue::new(
                        "ts-naming-camelcase",
                        Severity::Warning,
                        "naming",
                        file.path,
                        line_number,
                        format!("Variable \"{var}\" should use camelCase"),
                    )
                    .at_column(name.start())
                    .fixable(),
                );
            }
        }

        for caps in FUNCTION_NAME.captures_iter(line) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            if !Convention::CamelCase.matches(name.as_str()) {
                issues.push(
                    Issue::new(
                        "ts-naming-camelcase",
                        Severity::Warning,
                        "naming",
                        file.path,
                        line_number,
                        format!("Function \"{}\" should use camelCase", name.as_str()),
                    )
                    .at_column(name.start())
                    .fixable(),
                );
            }
        }

        for caps in TYPE_DECL.captures_iter(line) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            if !Convention::PascalCase.matches(name.as_str()) {
                issues.push(
                    Issue::new(
                        "ts-naming-pascalcase-classes",
                        Severity::Warning,
                        "naming",
                        file.path,
                        line_number,
                        format!("Class/Interface \"{}\" should use PascalCase", name.as_str()),
                    )
                    .at_column(name.start())
                    .fixable(),
                );
            }
        }
    }
}

fn check_type_safety(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        if let Some(m) = ANY_TYPE.find(line) {
            issues.push(
                Issue::new(
                    "ts-no-any",
                    Severity::Warning,
                    "type-safety",
                    file.path,
                    line_number,
                    "Avoid using \"any\" type, use specific types instead",
                )
                .at_column(m.start()),
            );
        }

        for caps in FUNCTION_PARAMS.captures_iter(line) {
            let params = caps[1].trim();
            let untyped = !params.is_empty() && !params.contains(':') && !params.starts_with("...");
            if untyped {
                issues.push(
                    Issue::new(
                        "ts-explicit-types",
                        Severity::Error,
                        "type-safety",
                        file.path,
                        line_number,
                        "Function parameters should have explicit types",
                    )
                    .at_column(caps.get(0).map(|m| m.start()).unwrap_or(0)),
                );
            }
        }

        // `?.` or `??` anywhere on the line counts as handled.
        if let Some(m) = PROPERTY_ACCESS.find(line) {
            let guarded = line.contains("?.") || line.contains("??");
            if !guarded && NULLABLE_HINTS.iter().any(|hint| line.contains(hint)) {
                issues.push(
                    Issue::new(
                        "ts-strict-null-checks",
                        Severity::Warning,
                        "type-safety",
                        file.path,
                        line_number,
                        "Consider using optional chaining (?.) or nullish coalescing (??)",
                    )
                    .at_column(m.start())
                    .with_fix("Use optional chaining: obj?.property"),
                );
            }
        }
    }
}

fn check_structure(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for function in extract_functions(lines) {
        if function.length > MAX_FUNCTION_LENGTH {
            issues.push(Issue::new(
                "ts-max-function-length",
                Severity::Warning,
                "structure",
                file.path,
                function.line_number,
                format!(
                    "Function is too long ({} lines). Consider breaking it down.",
                    function.length
                ),
            ));
        }
    }

    for (idx, line) in lines.iter().enumerate() {
        if line.contains("++") || line.contains("--") || line.contains("for") {
            continue;
        }
        for caps in LET_DECL.captures_iter(line) {
            let var = &caps[1];
            issues.push(
                Issue::new(
                    "ts-prefer-const",
                    Severity::Warning,
                    "structure",
                    file.path,
                    idx + 1,
                    format!("Variable \"{var}\" is never reassigned, use const instead of let"),
                )
                .at_column(caps.get(0).map(|m| m.start()).unwrap_or(0))
                .with_fix(format!("const {var}"))
                .fixable(),
            );
        }
    }
}

/// Substring heuristic: a named import counts as used when its text appears
/// anywhere else in the file once the import line itself is removed.
fn check_imports(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().starts_with("import ") {
            continue;
        }
        let Some(caps) = IMPORT.captures(line) else {
            continue;
        };
        let Some(named) = caps.get(1) else {
            continue;
        };

        let rest = file.content.replacen(line, "", 1);
        for name in named.as_str().split(',').map(str::trim) {
            if !rest.contains(name) {
                issues.push(
                    Issue::new(
                        "ts-no-unused-imports",
                        Severity::Warning,
                        "imports",
                        file.path,
                        idx + 1,
                        format!("Unused import: {name}"),
                    )
                    .fixable(),
                );
            }
        }
    }
}

fn check_error_handling(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if !(line.contains("async ") && line.contains("function")) {
            continue;
        }
        let body = function_body(lines, idx);
        if body.contains("await") && !body.contains("try") {
            issues.push(
                Issue::new(
                    "ts-proper-error-handling",
                    Severity::Error,
                    "error-handling",
                    file.path,
                    idx + 1,
                    "Async function with await should include proper error handling",
                )
                .with_fix("Wrap await calls in try-catch blocks"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(path: &str, content: &str) -> Vec<Issue> {
        TypeScriptAnalyzer.analyze(&SourceFile::new(path, content))
    }

    fn rule_ids(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.rule_id.as_str()).collect()
    }

    #[test]
    fn test_applies_to_scripts_only() {
        assert!(TypeScriptAnalyzer.applies_to(&SourceFile::new("a.ts", "")));
        assert!(TypeScriptAnalyzer.applies_to(&SourceFile::new("a.js", "")));
        assert!(!TypeScriptAnalyzer.applies_to(&SourceFile::new("a.feature", "")));
    }

    #[test]
    fn test_prefer_const_on_let() {
        let issues = analyze("src/app.ts", "let apiKey = \"abc\";");
        let issue = issues.iter().find(|i| i.rule_id == "ts-prefer-const").unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert!(issue.auto_fixable);
        assert_eq!(issue.line_number, 1);
        assert_eq!(issue.suggested_fix.as_deref(), Some("const apiKey"));
    }

    #[test]
    fn test_prefer_const_skips_loops_and_increments() {
        let issues = analyze("a.ts", "for (let i = 0; i < n; i++) {}\nlet x = 1; x++;");
        assert!(!rule_ids(&issues).contains(&"ts-prefer-const"));
    }

    #[test]
    fn test_snake_case_variable() {
        let issues = analyze("a.ts", "const user_name = \"john\";");
        let issue = issues.iter().find(|i| i.rule_id == "ts-naming-camelcase").unwrap();
        assert_eq!(issue.column, 6);
        assert!(issue.description.contains("user_name"));
    }

    #[test]
    fn test_constant_with_leading_underscore() {
        let issues = analyze("a.ts", "const _MAX = 3;");
        assert!(rule_ids(&issues).contains(&"ts-naming-constants"));
        let issues = analyze("a.ts", "const MAX_RETRIES = 3;");
        assert!(!rule_ids(&issues).contains(&"ts-naming-constants"));
    }

    #[test]
    fn test_class_naming() {
        let issues = analyze("a.ts", "class userService {}");
        assert!(rule_ids(&issues).contains(&"ts-naming-pascalcase-classes"));
    }

    #[test]
    fn test_any_and_untyped_params() {
        let issues = analyze("a.ts", "function process(user, id) {\n  const d: any = 1;\n}");
        let ids = rule_ids(&issues);
        assert!(ids.contains(&"ts-explicit-types"));
        assert!(ids.contains(&"ts-no-any"));
        let explicit = issues.iter().find(|i| i.rule_id == "ts-explicit-types").unwrap();
        assert_eq!(explicit.severity, Severity::Error);
        assert!(!explicit.auto_fixable);
    }

    #[test]
    fn test_partially_typed_params_are_not_flagged() {
        let issues = analyze("a.ts", "function process(user, id: number) {}");
        assert!(!rule_ids(&issues).contains(&"ts-explicit-types"));
    }

    #[test]
    fn test_issue_descriptions() {
        let issues = analyze("a.ts", "const n = data.items.length;");
        let null_check = issues.iter().find(|i| i.rule_id == "ts-strict-null-checks").unwrap();
        assert_eq!(
            null_check.description,
            "Consider using optional chaining (?.) or nullish coalescing (??)"
        );

        let issues = analyze("a.ts", "async function load() {\n  const r = await fetch(url);\n}");
        let handling = issues.iter().find(|i| i.rule_id == "ts-proper-error-handling").unwrap();
        assert_eq!(
            handling.description,
            "Async function with await should include proper error handling"
        );
    }

    #[test]
    fn test_rest_params_are_not_flagged() {
        let issues = analyze("a.ts", "function log(...args) {}");
        assert!(!rule_ids(&issues).contains(&"ts-explicit-types"));
    }

    #[test]
    fn test_null_checks() {
        let issues = analyze("a.ts", "const n = user.name.toUpperCase();");
        assert!(rule_ids(&issues).contains(&"ts-strict-null-checks"));
        let issues = analyze("a.ts", "const n = user?.name ?? \"\";");
        assert!(!rule_ids(&issues).contains(&"ts-strict-null-checks"));
    }

    #[test]
    fn test_long_function() {
        let mut source = String::from("function big() {\n");
        for _ in 0..55 {
            source.push_str("  step();\n");
        }
        source.push_str("}\n");
        let issues = analyze("a.ts", &source);
        let issue = issues.iter().find(|i| i.rule_id == "ts-max-function-length").unwrap();
        assert_eq!(issue.line_number, 1);
        assert!(issue.description.contains("57 lines"));
    }

    #[test]
    fn test_unused_imports() {
        let content = "import { used, unused } from './mod';\nused();";
        let issues = analyze("a.ts", content);
        let unused: Vec<_> = issues
            .iter()
            .filter(|i| i.rule_id == "ts-no-unused-imports")
            .collect();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].description, "Unused import: unused");
        assert!(unused[0].auto_fixable);
    }

    #[test]
    fn test_async_without_try() {
        let content = "async function load() {\n  await fetch(url);\n}";
        let issues = analyze("a.ts", content);
        let issue = issues
            .iter()
            .find(|i| i.rule_id == "ts-proper-error-handling")
            .unwrap();
        assert_eq!(issue.severity, Severity::Error);

        let content = "async function load() {\n  try {\n    await fetch(url);\n  } catch (e) {}\n}";
        let issues = analyze("a.ts", content);
        assert!(!rule_ids(&issues).contains(&"ts-proper-error-handling"));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let content = "let user_name = data.value;\nfunction Bad(x) { return x; }";
        assert_eq!(analyze("a.ts", content), analyze("a.ts", content));
    }
}
