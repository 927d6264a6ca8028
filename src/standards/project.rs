use super::{CodeStandard, RuleExample};
use crate::analyzers::Severity;

/// Repository-wide conventions covering layout, naming, documentation,
/// configuration and testing. No analyzer reports these rule ids.
pub const STANDARDS: &[CodeStandard] = &[
    CodeStandard {
        rule_id: "project-file-structure",
        description: "Follow consistent file and folder structure",
        severity: Severity::Warning,
        category: "organization",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "tests/login.spec.ts, pages/login.ts",
            good: "tests/auth/login.spec.ts, pages/auth/LoginPage.ts",
        }),
    },
    CodeStandard {
        rule_id: "project-naming-conventions",
        description: "Follow consistent naming conventions across all file types",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: true,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-readme-updated",
        description: "Keep README.md updated with current setup instructions",
        severity: Severity::Info,
        category: "documentation",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-code-comments",
        description: "Add meaningful comments for complex business logic",
        severity: Severity::Warning,
        category: "documentation",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-config-consistency",
        description: "Maintain consistent configuration across environments",
        severity: Severity::Error,
        category: "configuration",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-env-variables",
        description: "Use environment variables for configuration",
        severity: Severity::Warning,
        category: "configuration",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-test-coverage",
        description: "Maintain adequate test coverage for critical paths",
        severity: Severity::Warning,
        category: "testing",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "project-test-data-management",
        description: "Implement proper test data management strategy",
        severity: Severity::Warning,
        category: "testing",
        auto_fixable: false,
        examples: None,
    },
];
