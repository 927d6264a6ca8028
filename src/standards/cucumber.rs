use super::{CodeStandard, RuleExample};
use crate::analyzers::Severity;

pub const STANDARDS: &[CodeStandard] = &[
    CodeStandard {
        rule_id: "cucumber-feature-structure",
        description: "Feature files should follow proper Gherkin structure",
        severity: Severity::Error,
        category: "structure",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "Feature: Login\nI want to login",
            good: "Feature: User Login\n  As a user\n  I want to login to the system\n  So that I can access my account",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-scenario-naming",
        description: "Scenarios should have descriptive names in business language",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "Scenario: Test login",
            good: "Scenario: User successfully logs in with valid credentials",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-given-when-then",
        description: "Use proper Given-When-Then structure in scenarios",
        severity: Severity::Error,
        category: "gherkin",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "When I am on login page\nWhen I enter credentials",
            good: "Given I am on the login page\nWhen I enter valid credentials\nThen I should be logged in",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-imperative-mood",
        description: "Write steps in imperative mood from user perspective",
        severity: Severity::Warning,
        category: "gherkin",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "Given the login page is displayed",
            good: "Given I am on the login page",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-no-ui-details",
        description: "Avoid UI implementation details in feature files",
        severity: Severity::Warning,
        category: "gherkin",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "When I click the button with id \"submit-btn\"",
            good: "When I submit the login form",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-step-reusability",
        description: "Create reusable step definitions",
        severity: Severity::Warning,
        category: "step-definitions",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-step-parameters",
        description: "Use parameters in step definitions for flexibility",
        severity: Severity::Warning,
        category: "step-definitions",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "Given(\"I enter username john\", async () => {})",
            good: "Given(\"I enter username {string}\", async (username) => {})",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-step-organization",
        description: "Organize step definitions by domain/feature",
        severity: Severity::Warning,
        category: "step-definitions",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-data-tables",
        description: "Use data tables for structured test data",
        severity: Severity::Info,
        category: "data",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "Given I have user john with email john@test.com",
            good: "Given I have the following users:\n  | name | email |\n  | john | john@test.com |",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-scenario-outline",
        description: "Use Scenario Outline for data-driven tests",
        severity: Severity::Info,
        category: "data",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-external-data",
        description: "Keep test data external to feature files when appropriate",
        severity: Severity::Warning,
        category: "data",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-meaningful-tags",
        description: "Use meaningful tags for test organization",
        severity: Severity::Warning,
        category: "organization",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "@test1 @temp",
            good: "@smoke @login @critical",
        }),
    },
    // The fixer lowercases tags, so the catalog agrees with the analyzer here.
    CodeStandard {
        rule_id: "cucumber-tag-conventions",
        description: "Follow consistent tag naming conventions",
        severity: Severity::Warning,
        category: "organization",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "@SmokeTest",
            good: "@smoketest",
        }),
    },
    CodeStandard {
        rule_id: "cucumber-background-usage",
        description: "Use Background for common setup steps",
        severity: Severity::Info,
        category: "structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-background-limit",
        description: "Keep Background steps minimal and relevant to all scenarios",
        severity: Severity::Warning,
        category: "structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-feature-description",
        description: "Provide clear feature descriptions with business value",
        severity: Severity::Warning,
        category: "documentation",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-scenario-comments",
        description: "Add comments for complex business logic",
        severity: Severity::Info,
        category: "documentation",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-no-duplicate-scenarios",
        description: "Avoid duplicate scenarios across feature files",
        severity: Severity::Warning,
        category: "maintenance",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "cucumber-scenario-independence",
        description: "Scenarios should be independent and not rely on execution order",
        severity: Severity::Error,
        category: "maintenance",
        auto_fixable: false,
        examples: None,
    },
];
