use super::{CodeStandard, RuleExample};
use crate::analyzers::Severity;

pub const STANDARDS: &[CodeStandard] = &[
    CodeStandard {
        rule_id: "ts-naming-camelcase",
        description: "Variables and functions should use camelCase",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "const user_name = \"john\";",
            good: "const userName = \"john\";",
        }),
    },
    CodeStandard {
        rule_id: "ts-naming-pascalcase-classes",
        description: "Classes and interfaces should use PascalCase",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "class userService {}",
            good: "class UserService {}",
        }),
    },
    CodeStandard {
        rule_id: "ts-naming-constants",
        description: "Constants should use UPPER_SNAKE_CASE",
        severity: Severity::Warning,
        category: "naming",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "const maxRetries = 3;",
            good: "const MAX_RETRIES = 3;",
        }),
    },
    CodeStandard {
        rule_id: "ts-explicit-types",
        description: "Function parameters and return types should be explicitly typed",
        severity: Severity::Error,
        category: "type-safety",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "function processUser(user) { return user.name; }",
            good: "function processUser(user: User): string { return user.name; }",
        }),
    },
    CodeStandard {
        rule_id: "ts-no-any",
        description: "Avoid using \"any\" type, use specific types instead",
        severity: Severity::Warning,
        category: "type-safety",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "const data: any = response.data;",
            good: "const data: UserData = response.data;",
        }),
    },
    CodeStandard {
        rule_id: "ts-strict-null-checks",
        description: "Handle null and undefined values explicitly",
        severity: Severity::Error,
        category: "type-safety",
        auto_fixable: false,
        examples: Some(RuleExample {
            bad: "const name = user.name.toUpperCase();",
            good: "const name = user.name?.toUpperCase() ?? \"\";",
        }),
    },
    CodeStandard {
        rule_id: "ts-single-responsibility",
        description: "Functions should have a single responsibility",
        severity: Severity::Warning,
        category: "structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "ts-max-function-length",
        description: "Functions should not exceed 50 lines",
        severity: Severity::Warning,
        category: "structure",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "ts-prefer-const",
        description: "Use const for variables that are never reassigned",
        severity: Severity::Warning,
        category: "structure",
        auto_fixable: true,
        examples: Some(RuleExample {
            bad: "let userName = \"john\";",
            good: "const userName = \"john\";",
        }),
    },
    CodeStandard {
        rule_id: "ts-import-order",
        description: "Imports should be ordered: external libraries, internal modules, relative imports",
        severity: Severity::Warning,
        category: "imports",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "ts-no-unused-imports",
        description: "Remove unused imports",
        severity: Severity::Warning,
        category: "imports",
        auto_fixable: true,
        examples: None,
    },
    CodeStandard {
        rule_id: "ts-proper-error-handling",
        description: "Use proper error handling with try-catch blocks",
        severity: Severity::Error,
        category: "error-handling",
        auto_fixable: false,
        examples: None,
    },
    CodeStandard {
        rule_id: "ts-custom-error-types",
        description: "Use custom error types instead of generic Error",
        severity: Severity::Warning,
        category: "error-handling",
        auto_fixable: false,
        examples: None,
    },
];
