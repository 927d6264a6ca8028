use super::{CodeStandard, RuleExample};
use crate::analyzers::Severity;

pub const STANDARDS: &[CodeStandard] = &[
    CodeStandard {
        rule_id: "pw-page-object-pattern",
        description: "Use Page Object Model pattern for page interactions",
        severity: Severity::Warning,
        category: "architecture",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "await page.click(\"#login-button\");",
            good: "await loginPage.clickLoginButton();",
        }),
    },
    CodeStandard {
        rule_id: "pw-page-object-naming",
        description: "Page objects should end with \"Page\" suffix",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "class Login {}",
            good: "class LoginPage {}",
        }),
    },
    CodeStandard {
        rule_id: "pw-stable-locators",
        description: "Use stable locators (data-testid, role, text) over CSS selectors",
        severity: Severity::Error,
        category: "locators",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "page.locator(\".btn-primary\")",
            good: "page.getByTestId(\"submit-button\")",
        }),
    },
    CodeStandard {
        rule_id: "pw-no-xpath",
        description: "Avoid XPath locators, use Playwright locators instead",
        severity: Severity::Warning,
        category: "locators",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "page.locator(\"//button[@class='submit']\")",
            good: "page.getByRole(\"button\", { name: \"Submit\" })",
        }),
    },
    CodeStandard {
        rule_id: "pw-locator-variables",
        description: "Store complex locators in variables for reusability",
        severity: Severity::Warning,
        category: "locators",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-explicit-waits",
        description: "Use explicit waits instead of hard waits (sleep)",
        severity: Severity::Error,
        category: "waits",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "await page.waitForTimeout(5000);",
            good: "await page.waitForSelector(\"[data-testid='result']\");",
        }),
    },
    CodeStandard {
        rule_id: "pw-auto-waiting",
        description: "Leverage Playwright auto-waiting capabilities",
        severity: Severity::Info,
        category: "waits",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-proper-assertions",
        description: "Use Playwright assertions (expect) instead of generic assertions",
        severity: Severity::Warning,
        category: "assertions",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "assert(await page.isVisible(\"#element\"));",
            good: "await expect(page.locator(\"#element\")).toBeVisible();",
        }),
    },
    CodeStandard {
        rule_id: "pw-test-isolation",
        description: "Each test should be independent and isolated",
        severity: Severity::Error,
        category: "test-structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-setup-teardown",
        description: "Use proper setup and teardown in beforeEach/afterEach",
        severity: Severity::Warning,
        category: "test-structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-descriptive-test-names",
        description: "Test names should be descriptive and follow Given-When-Then pattern",
        severity: Severity::Warning,
        category: "test-structure",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "test(\"login test\", async () => {})",
            good: "test(\"should login successfully with valid credentials\", async () => {})",
        }),
    },
    CodeStandard {
        rule_id: "pw-parallel-execution",
        description: "Configure tests for parallel execution when possible",
        severity: Severity::Info,
        category: "performance",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-browser-context",
        description: "Use browser contexts for test isolation instead of new browser instances",
        severity: Severity::Warning,
        category: "performance",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-screenshot-on-failure",
        description: "Capture screenshots on test failures for debugging",
        severity: Severity::Warning,
        category: "debugging",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-video-recording",
        description: "Enable video recording for failed tests",
        severity: Severity::Info,
        category: "debugging",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-config-best-practices",
        description: "Follow Playwright configuration best practices",
        severity: Severity::Warning,
        category: "configuration",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "pw-environment-specific-config",
        description: "Use environment-specific configurations",
        severity: Severity::Warning,
        category: "configuration",
        auto_fixable: false,
        examples: None,
    },
];
