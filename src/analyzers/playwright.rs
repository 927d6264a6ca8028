use regex::Regex;
use std::sync::LazyLock;

use super::heuristics::line_and_column;
use super::traits::{Analyzer, Issue, Severity, SourceFile};

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());
static DIRECT_INTERACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page\.(click|fill|type|selectOption)\s*\(").unwrap());
static CSS_LOCATORS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"page\.locator\(["'][.#][^"']*["']"#).unwrap(),
        Regex::new(r#"page\.locator\(["'][^"']*\[[^"']*\][^"']*["']"#).unwrap(),
    ]
});
static XPATH_LOCATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"page\.locator\(["']//[^"']*["']"#).unwrap());
static LONG_LOCATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"page\.locator\(["']([^"']{30,})["']"#).unwrap());
static HARD_WAIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page\.waitForTimeout\s*\(").unwrap());
static SLEEP_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(sleep|setTimeout)\s*\(").unwrap());
static TEST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btest\s*\(\s*["']([^"']+)["']"#).unwrap());
static GENERIC_ASSERT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bassert\s*\(").unwrap());
static BOOLEAN_ASSERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"expect\([^)]+\)\.toBe\(true\)").unwrap());

const BEHAVIOR_KEYWORDS: &[&str] = &["should", "when", "given"];
const MIN_TEST_NAME_LENGTH: usize = 10;

/// Playwright test-automation checks: page objects, locators, waits, test
/// structure, assertions and browser usage.
pub struct PlaywrightAnalyzer;

impl Analyzer for PlaywrightAnalyzer {
    fn name(&self) -> &'static str {
        "playwright"
    }

    fn description(&self) -> &'static str {
        "Page object, locator, wait, assertion and test-structure checks"
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        if !file.is_script() {
            return false;
        }
        let name = file.file_name();
        name.contains(".spec.")
            || name.contains(".test.")
            || file.content.to_lowercase().contains("playwright")
            || file.content.contains("page.")
    }

    fn analyze(&self, file: &SourceFile) -> Vec<Issue> {
        let lines = file.lines();
        let mut issues = Vec::new();
        check_page_objects(file, &lines, &mut issues);
        check_locators(file, &lines, &mut issues);
        check_waits(file, &lines, &mut issues);
        check_test_structure(file, &lines, &mut issues);
        check_assertions(file, &lines, &mut issues);
        check_performance(file, &mut issues);
        issues
    }
}

fn check_page_objects(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    if file.path.to_lowercase().contains("page") {
        for caps in CLASS_DECL.captures_iter(file.content) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            if name.as_str().ends_with("Page") {
                continue;
            }
            let (line_number, column) = line_and_column(file.content, name.start());
            issues.push(
                Issue::new(
                    "pw-page-object-naming",
                    Severity::Warning,
                    "naming",
                    file.path,
                    line_number,
                    format!("Page object class \"{}\" should end with \"Page\"", name.as_str()),
                )
                .at_column(column)
                .with_fix(format!("{}Page", name.as_str()))
                .fixable(),
            );
        }
    }

    if file.is_test_file() {
        for (idx, line) in lines.iter().enumerate() {
            if let Some(m) = DIRECT_INTERACTION.find(line) {
                issues.push(
                    Issue::new(
                        "pw-page-object-pattern",
                        Severity::Warning,
                        "architecture",
                        file.path,
                        idx + 1,
                        "Consider using Page Object Model instead of direct page interactions",
                    )
                    .at_column(m.start()),
                );
            }
        }
    }
}

fn check_locators(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        for pattern in CSS_LOCATORS.iter() {
            if let Some(m) = pattern.find(line) {
                issues.push(
                    Issue::new(
                        "pw-stable-locators",
                        Severity::Error,
                        "locators",
                        file.path,
                        line_number,
                        "Use stable locators (data-testid, role, text) instead of CSS selectors",
                    )
                    .at_column(m.start())
                    .with_fix("Use page.getByTestId(), page.getByRole(), or page.getByText()"),
                );
            }
        }

        if let Some(m) = XPATH_LOCATOR.find(line) {
            issues.push(
                Issue::new(
                    "pw-no-xpath",
                    Severity::Warning,
                    "locators",
                    file.path,
                    line_number,
                    "Avoid XPath locators, use Playwright locators instead",
                )
                .at_column(m.start())
                .with_fix("Use page.getByRole() or page.getByTestId()"),
            );
        }

        if let Some(m) = LONG_LOCATOR.find(line) {
            issues.push(
                Issue::new(
                    "pw-locator-variables",
                    Severity::Warning,
                    "locators",
                    file.path,
                    line_number,
                    "Complex locators should be stored in variables for reusability",
                )
                .at_column(m.start()),
            );
        }
    }
}

fn check_waits(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if let Some(m) = HARD_WAIT.find(line) {
            issues.push(
                Issue::new(
                    "pw-explicit-waits",
                    Severity::Error,
                    "waits",
                    file.path,
                    idx + 1,
                    "Avoid hard waits (waitForTimeout), use explicit waits instead",
                )
                .at_column(m.start())
                .with_fix("Use page.waitForSelector() or expect().toBeVisible()"),
            );
        }

        if let Some(m) = SLEEP_CALL.find(line) {
            issues.push(
                Issue::new(
                    "pw-explicit-waits",
                    Severity::Error,
                    "waits",
                    file.path,
                    idx + 1,
                    "Avoid sleep/setTimeout in tests, use Playwright auto-waiting",
                )
                .at_column(m.start()),
            );
        }
    }
}

fn check_test_structure(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        for caps in TEST_NAME.captures_iter(line) {
            let name = &caps[1];
            let lower = name.to_lowercase();
            let descriptive = name.chars().count() >= MIN_TEST_NAME_LENGTH
                && BEHAVIOR_KEYWORDS.iter().any(|k| lower.contains(k));
            if !descriptive {
                issues.push(
                    Issue::new(
                        "pw-descriptive-test-names",
                        Severity::Warning,
                        "test-structure",
                        file.path,
                        idx + 1,
                        format!("Test name \"{name}\" should be more descriptive"),
                    )
                    .at_column(caps.get(0).map(|m| m.start()).unwrap_or(0))
                    .with_fix("Use names like \"should login successfully when credentials are valid\""),
                );
            }
        }
    }

    if file.content.contains("beforeAll") && file.content.to_lowercase().contains("login") {
        issues.push(Issue::new(
            "pw-test-isolation",
            Severity::Error,
            "test-structure",
            file.path,
            1,
            "Avoid sharing login state across tests in beforeAll, each test should be isolated",
        ));
    }
}

fn check_assertions(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if let Some(m) = GENERIC_ASSERT.find(line) {
            if !line.contains("expect") {
                issues.push(
                    Issue::new(
                        "pw-proper-assertions",
                        Severity::Warning,
                        "assertions",
                        file.path,
                        idx + 1,
                        "Use Playwright assertions (expect) instead of generic assertions",
                    )
                    .at_column(m.start())
                    .with_fix("await expect(locator).toBeVisible()")
                    .fixable(),
                );
            }
        }

        if let Some(m) = BOOLEAN_ASSERT.find(line) {
            issues.push(
                Issue::new(
                    "pw-proper-assertions",
                    Severity::Warning,
                    "assertions",
                    file.path,
                    idx + 1,
                    "Use a specific matcher instead of toBe(true)",
                )
                .at_column(m.start())
                .with_fix("Use toBeVisible(), toBeEnabled(), toBeChecked() or similar"),
            );
        }
    }
}

fn check_performance(file: &SourceFile, issues: &mut Vec<Issue>) {
    if file.content.contains("browser.newPage()") && !file.content.contains("context") {
        issues.push(Issue::new(
            "pw-browser-context",
            Severity::Warning,
            "performance",
            file.path,
            1,
            "Use browser contexts for test isolation instead of new browser pages",
        ));
    }

    if file.path.contains(".spec.ts") && !file.content.contains("test.describe.configure") {
        issues.push(Issue::new(
            "pw-parallel-execution",
            Severity::Info,
            "performance",
            file.path,
            1,
            "Consider configuring tests for parallel execution",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(path: &str, content: &str) -> Vec<Issue> {
        PlaywrightAnalyzer.analyze(&SourceFile::new(path, content))
    }

    fn count(issues: &[Issue], rule_id: &str) -> usize {
        issues.iter().filter(|i| i.rule_id == rule_id).count()
    }

    #[test]
    fn test_applies_to_test_files_and_page_usage() {
        assert!(PlaywrightAnalyzer.applies_to(&SourceFile::new("login.spec.ts", "")));
        assert!(PlaywrightAnalyzer.applies_to(&SourceFile::new("util.ts", "await page.goto(url)")));
        assert!(PlaywrightAnalyzer.applies_to(&SourceFile::new(
            "util.ts",
            "import { test } from '@Playwright/test'"
        )));
        assert!(!PlaywrightAnalyzer.applies_to(&SourceFile::new("util.ts", "const x = 1;")));
        assert!(!PlaywrightAnalyzer.applies_to(&SourceFile::new("login.spec.feature", "")));
    }

    #[test]
    fn test_hard_wait_is_error() {
        let issues = analyze("tests/login.spec.ts", "await page.waitForTimeout(5000);");
        let wait = issues.iter().find(|i| i.rule_id == "pw-explicit-waits").unwrap();
        assert_eq!(wait.severity, Severity::Error);
        assert!(!wait.auto_fixable);
        assert_eq!(count(&issues, "pw-explicit-waits"), 1);
    }

    #[test]
    fn test_css_selectors() {
        let issues = analyze("a.spec.ts", "page.locator('#submit');\npage.locator('.btn[type=x]');");
        // the second line matches both the class and the attribute pattern
        assert_eq!(count(&issues, "pw-stable-locators"), 3);
    }

    #[test]
    fn test_xpath_and_long_locator() {
        let content = "page.locator('//div/span');\npage.locator('section main article div.card span');";
        let issues = analyze("a.spec.ts", content);
        assert_eq!(count(&issues, "pw-no-xpath"), 1);
        assert_eq!(count(&issues, "pw-locator-variables"), 1);
    }

    #[test]
    fn test_test_names() {
        let content = "test('login', async () => {});\ntest('should show dashboard when logged in', async () => {});";
        let issues = analyze("a.spec.ts", content);
        assert_eq!(count(&issues, "pw-descriptive-test-names"), 1);
    }

    #[test]
    fn test_direct_interactions_in_tests() {
        let issues = analyze("a.spec.ts", "await page.click('text=Go');");
        assert_eq!(count(&issues, "pw-page-object-pattern"), 1);
        let issues = analyze("helpers.ts", "await page.click('text=Go');");
        assert_eq!(count(&issues, "pw-page-object-pattern"), 0);
    }

    #[test]
    fn test_page_object_naming_uses_content_offset() {
        let content = "import x from 'y';\n\nexport class Login {\n}";
        let issues = analyze("pages/login.ts", content);
        let issue = issues.iter().find(|i| i.rule_id == "pw-page-object-naming").unwrap();
        assert_eq!(issue.line_number, 3);
        assert_eq!(issue.column, 13);
        assert_eq!(issue.suggested_fix.as_deref(), Some("LoginPage"));
        assert!(issue.auto_fixable);
    }

    #[test]
    fn test_assertions() {
        let content = "assert(await page.isVisible('#a'));\nexpect(isShown).toBe(true);";
        let issues = analyze("a.spec.ts", content);
        let assertions: Vec<_> = issues
            .iter()
            .filter(|i| i.rule_id == "pw-proper-assertions")
            .collect();
        assert_eq!(assertions.len(), 2);
        assert!(assertions[0].auto_fixable);
        assert!(!assertions[1].auto_fixable);
    }

    #[test]
    fn test_file_level_checks() {
        let content = "test.beforeAll(async () => { await login(); });\nconst p = await browser.newPage();";
        let issues = analyze("a.spec.ts", content);
        assert_eq!(count(&issues, "pw-test-isolation"), 1);
        assert_eq!(count(&issues, "pw-browser-context"), 1);
        assert_eq!(count(&issues, "pw-parallel-execution"), 1);
        let isolation = issues.iter().find(|i| i.rule_id == "pw-test-isolation").unwrap();
        assert_eq!(isolation.line_number, 1);
    }
}
