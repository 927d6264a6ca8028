//! Guidance for issues that cannot be rewritten mechanically. Issues are
//! grouped by rule id and each group becomes one [`Suggestion`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::analyzers::{Issue, Severity};
use crate::error::RegistrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    fn escalate(self) -> Self {
        match self {
            Effort::Low => Effort::Medium,
            Effort::Medium | Effort::High => Effort::High,
        }
    }

    fn score(self) -> u32 {
        match self {
            Effort::Low => 1,
            Effort::Medium => 3,
            Effort::High => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixExample {
    pub before: String,
    pub after: String,
}

/// A manual-fix template. Config files may add these under
/// `custom_suggestions`, keyed by rule id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionTemplate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Option<Vec<String>>,
    pub example: Option<FixExample>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedLine {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub rule_id: String,
    pub title: String,
    pub description: String,
    pub affected_files: Vec<String>,
    pub affected_lines: Vec<AffectedLine>,
    pub issue_count: usize,
    pub severity: Severity,
    pub steps: Vec<String>,
    pub example: Option<FixExample>,
    pub resources: Vec<String>,
    pub estimated_effort: Effort,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixPlan {
    pub total_manual_issues: usize,
    pub total_suggestions: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub recommended_order: Vec<Suggestion>,
    pub estimated_total_effort: Effort,
    pub quick_wins: Vec<Suggestion>,
    pub major_refactoring: Vec<Suggestion>,
}

struct Template {
    rule_id: &'static str,
    title: &'static str,
    description: &'static str,
    steps: &'static [&'static str],
    example: Option<(&'static str, &'static str)>,
    resources: &'static [&'static str],
}

const TEMPLATES: &[Template] = &[
    Template {
        rule_id: "ts-explicit-types",
        title: "Add Explicit Type Annotations",
        description: "Function parameters and return types should be explicitly typed",
        steps: &[
            "Identify the expected parameter types",
            "Add type annotations to function parameters",
            "Add return type annotation to the function",
            "Consider creating interfaces for complex types",
        ],
        example: Some((
            "function processUser(user) { return user.name; }",
            "function processUser(user: User): string { return user.name; }",
        )),
        resources: &[
            "https://www.typescriptlang.org/docs/handbook/2/functions.html",
            "TypeScript Handbook: Function Types",
        ],
    },
    Template {
        rule_id: "ts-no-any",
        title: "Replace \"any\" with Specific Types",
        description: "Avoid using \"any\" type for better type safety",
        steps: &[
            "Analyze the actual data structure being used",
            "Create specific interfaces or types",
            "Use union types if multiple types are possible",
            "Consider using generics for reusable components",
        ],
        example: Some((
            "const data: any = response.data;",
            "interface ApiResponse { id: number; name: string; }\nconst data: ApiResponse = response.data;",
        )),
        resources: &["https://www.typescriptlang.org/docs/handbook/2/everyday-types.html#any"],
    },
    Template {
        rule_id: "ts-single-responsibility",
        title: "Refactor for Single Responsibility",
        description: "Functions should have a single, well-defined responsibility",
        steps: &[
            "Identify the different responsibilities in the function",
            "Extract each responsibility into separate functions",
            "Create clear, descriptive names for each function",
            "Ensure each function has a single purpose",
        ],
        example: Some((
            "// Function that validates, transforms, and saves user data",
            "// Split into: validateUser(), transformUserData(), saveUser()",
        )),
        resources: &[],
    },
    Template {
        rule_id: "pw-page-object-pattern",
        title: "Implement Page Object Model",
        description: "Use Page Object Model pattern for better test maintainability",
        steps: &[
            "Create a page class for each page in your application",
            "Move locators and page interactions to the page class",
            "Create methods for common page actions",
            "Use the page object in your tests",
        ],
        example: Some((
            "await page.click(\"#login-button\");",
            "class LoginPage {\n  async clickLoginButton() {\n    await this.page.click(\"#login-button\");\n  }\n}",
        )),
        resources: &["https://playwright.dev/docs/pom", "Playwright Page Object Model Guide"],
    },
    Template {
        rule_id: "pw-stable-locators",
        title: "Use Stable Locators",
        description: "Replace CSS selectors with stable, semantic locators",
        steps: &[
            "Add data-testid attributes to elements",
            "Use getByRole() for semantic elements",
            "Use getByText() for text-based selection",
            "Avoid CSS class and ID selectors",
        ],
        example: Some((
            "page.locator(\".btn-primary\")",
            "page.getByTestId(\"submit-button\") or page.getByRole(\"button\", { name: \"Submit\" })",
        )),
        resources: &[],
    },
    Template {
        rule_id: "pw-test-isolation",
        title: "Ensure Test Isolation",
        description: "Each test should be independent and not rely on other tests",
        steps: &[
            "Move shared setup to beforeEach hooks",
            "Clean up test data after each test",
            "Avoid dependencies between tests",
            "Use fresh browser contexts for each test",
        ],
        example: Some((
            "beforeAll(() => { /* shared login */ })",
            "beforeEach(() => { /* fresh login for each test */ })",
        )),
        resources: &[],
    },
    Template {
        rule_id: "cucumber-given-when-then",
        title: "Fix Given-When-Then Structure",
        description: "Scenarios should follow proper Given-When-Then flow",
        steps: &[
            "Start with Given steps for setup/context",
            "Use When steps for actions",
            "Use Then steps for assertions",
            "Avoid mixing step types inappropriately",
        ],
        example: Some((
            "When I am on login page\nWhen I enter credentials",
            "Given I am on the login page\nWhen I enter valid credentials\nThen I should be logged in",
        )),
        resources: &[],
    },
    Template {
        rule_id: "cucumber-imperative-mood",
        title: "Write Steps in Imperative Mood",
        description: "Steps should be written from the user's perspective",
        steps: &[
            "Start steps with \"I\" or \"User\"",
            "Use active voice",
            "Focus on user actions and outcomes",
            "Avoid passive voice and system perspective",
        ],
        example: Some(("Given the login page is displayed", "Given I am on the login page")),
        resources: &[],
    },
    Template {
        rule_id: "cucumber-no-ui-details",
        title: "Remove UI Implementation Details",
        description: "Focus on business behavior, not UI elements",
        steps: &[
            "Replace UI element references with business actions",
            "Use business language instead of technical terms",
            "Focus on what the user wants to achieve",
            "Keep scenarios technology-agnostic",
        ],
        example: Some(("When I click the submit button", "When I submit the form")),
        resources: &[],
    },
    Template {
        rule_id: "pw-performance",
        title: "Optimize Test Performance",
        description: "Improve test execution speed and reliability",
        steps: &[
            "Use browser contexts instead of new browsers",
            "Configure parallel execution",
            "Optimize waiting strategies",
            "Minimize unnecessary actions",
        ],
        example: None,
        resources: &["https://playwright.dev/docs/test-parallel"],
    },
    Template {
        rule_id: "project-test-coverage",
        title: "Improve Test Coverage",
        description: "Ensure adequate test coverage for critical paths",
        steps: &[
            "Identify critical user journeys",
            "Create test scenarios for edge cases",
            "Add negative test cases",
            "Monitor and measure test coverage",
        ],
        example: None,
        resources: &[],
    },
];

const GENERIC_STEPS: &[&str] = &[
    "Review the specific issue description",
    "Analyze the code context",
    "Apply appropriate fixes based on best practices",
    "Test the changes thoroughly",
];

const LEARNING_RESOURCES: &[(&str, &[&str])] = &[
    (
        "typescript",
        &[
            "https://www.typescriptlang.org/docs/",
            "https://basarat.gitbook.io/typescript/",
            "TypeScript Deep Dive",
        ],
    ),
    (
        "playwright",
        &[
            "https://playwright.dev/docs/intro",
            "https://playwright.dev/docs/best-practices",
            "Playwright Testing Best Practices",
        ],
    ),
    (
        "cucumber",
        &[
            "https://cucumber.io/docs/gherkin/",
            "https://cucumber.io/docs/bdd/",
            "BDD with Cucumber Best Practices",
        ],
    ),
    (
        "testing",
        &[
            "https://martinfowler.com/articles/practical-test-pyramid.html",
            "Test Automation Pyramid",
            "Clean Code Testing Principles",
        ],
    ),
];

/// A template that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedTemplate {
    title: String,
    description: String,
    steps: Vec<String>,
    example: Option<FixExample>,
    resources: Vec<String>,
}

impl From<&Template> for ResolvedTemplate {
    fn from(t: &Template) -> Self {
        Self {
            title: t.title.to_string(),
            description: t.description.to_string(),
            steps: t.steps.iter().map(|s| s.to_string()).collect(),
            example: t.example.map(|(before, after)| FixExample {
                before: before.to_string(),
                after: after.to_string(),
            }),
            resources: t.resources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn base_effort(rule_id: &str) -> Effort {
    match rule_id {
        "ts-single-responsibility" | "pw-page-object-pattern" => Effort::High,
        "pw-stable-locators" | "cucumber-given-when-then" | "cucumber-imperative-mood" => Effort::Low,
        _ => Effort::Medium,
    }
}

pub struct ManualFixer {
    templates: HashMap<String, ResolvedTemplate>,
}

impl ManualFixer {
    pub fn new() -> Self {
        Self {
            templates: TEMPLATES
                .iter()
                .map(|t| (t.rule_id.to_string(), ResolvedTemplate::from(t)))
                .collect(),
        }
    }

    /// One suggestion per distinct rule id among the non-fixable issues, in
    /// order of first appearance.
    pub fn get_manual_suggestions(&self, issues: &[Issue]) -> Vec<Suggestion> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Issue>> = HashMap::new();
        for issue in issues.iter().filter(|i| !i.auto_fixable) {
            let group = groups.entry(issue.rule_id.as_str()).or_default();
            if group.is_empty() {
                order.push(issue.rule_id.as_str());
            }
            group.push(issue);
        }

        order
            .into_iter()
            .filter_map(|rule_id| {
                let group = groups.get(rule_id)?;
                Some(self.create_suggestion(rule_id, group))
            })
            .collect()
    }

    fn create_suggestion(&self, rule_id: &str, issues: &[&Issue]) -> Suggestion {
        let affected_files: BTreeSet<&str> = issues.iter().map(|i| i.file_path.as_str()).collect();
        let affected_lines = issues
            .iter()
            .map(|i| AffectedLine {
                file: i.file_path.clone(),
                line: i.line_number,
            })
            .collect();
        let severity = issues.first().map_or(Severity::Warning, |i| i.severity);

        let (title, description, steps, example, resources) = match self.templates.get(rule_id) {
            Some(t) => (
                t.title.clone(),
                t.description.clone(),
                t.steps.clone(),
                t.example.clone(),
                t.resources.clone(),
            ),
            None => (
                format!("Address {rule_id} Issues"),
                issues
                    .first()
                    .map_or_else(|| "Manual review required".to_string(), |i| i.description.clone()),
                GENERIC_STEPS.iter().map(|s| s.to_string()).collect(),
                None,
                Vec::new(),
            ),
        };

        Suggestion {
            rule_id: rule_id.to_string(),
            title,
            description,
            affected_files: affected_files.into_iter().map(String::from).collect(),
            affected_lines,
            issue_count: issues.len(),
            severity,
            steps,
            example,
            resources,
            estimated_effort: estimate_effort(rule_id, issues.len()),
            priority: calculate_priority(issues),
        }
    }

    pub fn generate_fix_plan(&self, suggestions: &[Suggestion]) -> FixPlan {
        let by_priority = |p: Priority| -> Vec<Suggestion> {
            suggestions.iter().filter(|s| s.priority == p).cloned().collect()
        };
        let high = by_priority(Priority::High);
        let medium = by_priority(Priority::Medium);
        let low = by_priority(Priority::Low);

        let total_score: u32 = suggestions.iter().map(|s| s.estimated_effort.score()).sum();
        let estimated_total_effort = match total_score {
            0..=5 => Effort::Low,
            6..=15 => Effort::Medium,
            _ => Effort::High,
        };

        FixPlan {
            total_manual_issues: suggestions.iter().map(|s| s.issue_count).sum(),
            total_suggestions: suggestions.len(),
            priority_breakdown: PriorityBreakdown {
                high: high.len(),
                medium: medium.len(),
                low: low.len(),
            },
            recommended_order: high.into_iter().chain(medium).chain(low).collect(),
            estimated_total_effort,
            quick_wins: suggestions
                .iter()
                .filter(|s| s.estimated_effort == Effort::Low)
                .cloned()
                .collect(),
            major_refactoring: suggestions
                .iter()
                .filter(|s| s.estimated_effort == Effort::High)
                .cloned()
                .collect(),
        }
    }

    pub fn get_suggestion_by_rule(&self, rule_id: &str) -> Option<SuggestionTemplate> {
        self.templates.get(rule_id).map(|t| SuggestionTemplate {
            title: Some(t.title.clone()),
            description: Some(t.description.clone()),
            steps: Some(t.steps.clone()),
            example: t.example.clone(),
            resources: t.resources.clone(),
        })
    }

    /// Replaces any existing template for `rule_id`.
    pub fn add_custom_suggestion(
        &mut self,
        rule_id: &str,
        template: SuggestionTemplate,
    ) -> Result<(), RegistrationError> {
        let mut missing = Vec::new();
        if template.title.is_none() {
            missing.push("title");
        }
        if template.description.is_none() {
            missing.push("description");
        }
        if template.steps.is_none() {
            missing.push("steps");
        }
        let (Some(title), Some(description), Some(steps)) =
            (template.title, template.description, template.steps)
        else {
            return Err(RegistrationError::MissingFields {
                kind: "suggestion",
                missing,
            });
        };

        self.templates.insert(
            rule_id.to_string(),
            ResolvedTemplate {
                title,
                description,
                steps,
                example: template.example,
                resources: template.resources,
            },
        );
        Ok(())
    }

    /// Unknown categories are left out of the result.
    pub fn get_learning_resources(&self, categories: &[&str]) -> BTreeMap<String, Vec<String>> {
        categories
            .iter()
            .filter_map(|cat| {
                LEARNING_RESOURCES
                    .iter()
                    .find(|(name, _)| name == cat)
                    .map(|(name, links)| {
                        (name.to_string(), links.iter().map(|l| l.to_string()).collect())
                    })
            })
            .collect()
    }
}

impl Default for ManualFixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Base effort for the rule, one tier higher when more than ten issues share it.
pub fn estimate_effort(rule_id: &str, issue_count: usize) -> Effort {
    let base = base_effort(rule_id);
    if issue_count > 10 {
        base.escalate()
    } else {
        base
    }
}

pub fn calculate_priority(issues: &[&Issue]) -> Priority {
    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
    if errors > 0 {
        Priority::High
    } else if warnings > 5 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(rule_id: &str, severity: Severity, line: usize) -> Issue {
        Issue::new(rule_id, severity, "test", "tests/login.spec.ts", line, format!("{rule_id} found"))
    }

    #[test]
    fn test_one_suggestion_per_rule() {
        let fixer = ManualFixer::new();
        let issues = vec![
            make_issue("pw-explicit-waits", Severity::Error, 3),
            make_issue("ts-no-any", Severity::Warning, 5),
            make_issue("pw-explicit-waits", Severity::Error, 9),
        ];
        let suggestions = fixer.get_manual_suggestions(&issues);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].rule_id, "pw-explicit-waits");
        assert_eq!(suggestions[0].issue_count, 2);
        assert_eq!(suggestions[0].affected_lines.len(), 2);
        assert_eq!(suggestions[0].affected_files, vec!["tests/login.spec.ts".to_string()]);
        assert_eq!(suggestions[1].title, "Replace \"any\" with Specific Types");
    }

    #[test]
    fn test_generic_suggestion() {
        let fixer = ManualFixer::new();
        let issues = vec![make_issue("pw-explicit-waits", Severity::Error, 3)];
        let suggestion = &fixer.get_manual_suggestions(&issues)[0];
        assert_eq!(suggestion.title, "Address pw-explicit-waits Issues");
        assert_eq!(suggestion.description, "pw-explicit-waits found");
        assert_eq!(suggestion.steps.len(), 4);
        assert_eq!(suggestion.priority, Priority::High);
        assert_eq!(suggestion.estimated_effort, Effort::Medium);
    }

    #[test]
    fn test_auto_fixable_issues_are_skipped() {
        let fixer = ManualFixer::new();
        let issues = vec![make_issue("ts-prefer-const", Severity::Warning, 1).fixable()];
        assert!(fixer.get_manual_suggestions(&issues).is_empty());
    }

    #[test]
    fn test_effort_escalation() {
        assert_eq!(estimate_effort("pw-stable-locators", 10), Effort::Low);
        assert_eq!(estimate_effort("pw-stable-locators", 11), Effort::Medium);
        assert_eq!(estimate_effort("ts-no-any", 11), Effort::High);
        assert_eq!(estimate_effort("pw-page-object-pattern", 50), Effort::High);
        assert_eq!(estimate_effort("unknown-rule", 1), Effort::Medium);
    }

    #[test]
    fn test_priority() {
        let error = make_issue("a", Severity::Error, 1);
        let warning = make_issue("a", Severity::Warning, 1);
        let info = make_issue("a", Severity::Info, 1);
        assert_eq!(calculate_priority(&[&warning, &error]), Priority::High);
        assert_eq!(calculate_priority(&[&warning; 6]), Priority::Medium);
        assert_eq!(calculate_priority(&[&warning; 5]), Priority::Low);
        assert_eq!(calculate_priority(&[&info; 20]), Priority::Low);
    }

    #[test]
    fn test_fix_plan() {
        let fixer = ManualFixer::new();
        let mut issues = vec![make_issue("ts-single-responsibility", Severity::Warning, 1)];
        issues.push(make_issue("pw-stable-locators", Severity::Error, 2));
        issues.push(make_issue("ts-no-any", Severity::Warning, 3));
        let suggestions = fixer.get_manual_suggestions(&issues);
        let plan = fixer.generate_fix_plan(&suggestions);

        assert_eq!(plan.total_manual_issues, 3);
        assert_eq!(plan.total_suggestions, 3);
        assert_eq!(plan.priority_breakdown.high, 1);
        assert_eq!(plan.priority_breakdown.low, 2);
        assert_eq!(plan.recommended_order[0].rule_id, "pw-stable-locators");
        // 5 + 1 + 3
        assert_eq!(plan.estimated_total_effort, Effort::Medium);
        assert_eq!(plan.quick_wins.len(), 1);
        assert_eq!(plan.major_refactoring[0].rule_id, "ts-single-responsibility");
    }

    #[test]
    fn test_add_custom_suggestion() {
        let mut fixer = ManualFixer::new();
        let err = fixer
            .add_custom_suggestion(
                "pw-explicit-waits",
                SuggestionTemplate {
                    title: Some("Wait for state".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::MissingFields { ref missing, .. } if missing == &vec!["description", "steps"]
        ));

        fixer
            .add_custom_suggestion(
                "pw-explicit-waits",
                SuggestionTemplate {
                    title: Some("Wait for state".into()),
                    description: Some("Wait on conditions, not time".into()),
                    steps: Some(vec!["Use expect(locator).toBeVisible()".into()]),
                    ..Default::default()
                },
            )
            .unwrap();
        let issues = vec![make_issue("pw-explicit-waits", Severity::Error, 3)];
        assert_eq!(fixer.get_manual_suggestions(&issues)[0].title, "Wait for state");
        assert!(fixer.get_suggestion_by_rule("pw-explicit-waits").is_some());
    }

    #[test]
    fn test_learning_resources() {
        let fixer = ManualFixer::new();
        let resources = fixer.get_learning_resources(&["playwright", "cobol"]);
        assert_eq!(resources.len(), 1);
        assert!(resources["playwright"][0].starts_with("https://playwright.dev"));
    }
}
