//! Static rule catalogs. Each entry documents a class of issue; the analyzers
//! emit issues under the same rule ids.

pub mod cucumber;
pub mod playwright;
pub mod project;
pub mod typescript;

use crate::analyzers::Severity;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleExample {
    pub bad: &'static str,
    pub good: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeStandard {
    pub rule_id: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub category: &'static str,
    pub auto_fixable: bool,
    pub examples: Option<RuleExample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    TypeScript,
    Playwright,
    Cucumber,
    Project,
}

impl Catalog {
    pub const ALL: [Catalog; 4] = [
        Catalog::TypeScript,
        Catalog::Playwright,
        Catalog::Cucumber,
        Catalog::Project,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Catalog::TypeScript => "TypeScript",
            Catalog::Playwright => "Playwright",
            Catalog::Cucumber => "Cucumber",
            Catalog::Project => "Project",
        }
    }

    pub fn standards(&self) -> &'static [CodeStandard] {
        match self {
            Catalog::TypeScript => typescript::STANDARDS,
            Catalog::Playwright => playwright::STANDARDS,
            Catalog::Cucumber => cucumber::STANDARDS,
            Catalog::Project => project::STANDARDS,
        }
    }

    pub fn get_standard(&self, rule_id: &str) -> Option<&'static CodeStandard> {
        self.standards().iter().find(|s| s.rule_id == rule_id)
    }

    pub fn get_standards_by_category(&self, category: &str) -> Vec<&'static CodeStandard> {
        self.standards()
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    pub fn get_auto_fixable_standards(&self) -> Vec<&'static CodeStandard> {
        self.standards().iter().filter(|s| s.auto_fixable).collect()
    }
}

/// Query surface across every catalog. Catalogs are searched in
/// `Catalog::ALL` order, so lookups by id return the first hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectStandards;

impl ProjectStandards {
    pub fn new() -> Self {
        Self
    }

    fn iter(&self) -> impl Iterator<Item = &'static CodeStandard> {
        Catalog::ALL.into_iter().flat_map(|c| c.standards().iter())
    }

    pub fn get_all_standards(&self) -> Vec<&'static CodeStandard> {
        self.iter().collect()
    }

    pub fn get_standards_by_category(&self, category: &str) -> Vec<&'static CodeStandard> {
        self.iter().filter(|s| s.category == category).collect()
    }

    pub fn get_standards_by_severity(&self, severity: Severity) -> Vec<&'static CodeStandard> {
        self.iter().filter(|s| s.severity == severity).collect()
    }

    pub fn get_auto_fixable_standards(&self) -> Vec<&'static CodeStandard> {
        self.iter().filter(|s| s.auto_fixable).collect()
    }

    pub fn get_rule_categories(&self) -> BTreeSet<&'static str> {
        self.iter().map(|s| s.category).collect()
    }

    pub fn get_standard_by_id(&self, rule_id: &str) -> Option<&'static CodeStandard> {
        Catalog::ALL.iter().find_map(|c| c.get_standard(rule_id))
    }

    /// `extension` is a suffix such as `.ts`, `.spec.ts` or `.feature`.
    /// Project standards are always included.
    pub fn get_standards_for_file_type(&self, extension: &str) -> Vec<&'static CodeStandard> {
        let mut standards: Vec<&'static CodeStandard> = Vec::new();

        if matches!(extension, ".ts" | ".js") {
            standards.extend(typescript::STANDARDS);
        }
        if matches!(extension, ".spec.ts" | ".test.ts") || extension.contains("playwright") {
            standards.extend(playwright::STANDARDS);
        }
        if extension == ".feature" {
            standards.extend(cucumber::STANDARDS);
        }
        standards.extend(project::STANDARDS);

        standards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Catalog::TypeScript.standards().len(), 13);
        assert_eq!(Catalog::Playwright.standards().len(), 17);
        assert_eq!(Catalog::Cucumber.standards().len(), 19);
        assert_eq!(Catalog::Project.standards().len(), 8);
        assert_eq!(ProjectStandards::new().get_all_standards().len(), 57);
    }

    #[test]
    fn test_rule_ids_unique_within_catalog() {
        for catalog in Catalog::ALL {
            let ids: HashSet<_> = catalog.standards().iter().map(|s| s.rule_id).collect();
            assert_eq!(ids.len(), catalog.standards().len(), "{}", catalog.name());
        }
    }

    #[test]
    fn test_get_standard_by_id() {
        let standards = ProjectStandards::new();
        let rule = standards.get_standard_by_id("pw-no-xpath").unwrap();
        assert_eq!(rule.severity, Severity::Warning);
        assert_eq!(rule.category, "locators");
        assert!(rule.examples.is_some());
        assert!(standards.get_standard_by_id("no-such-rule").is_none());
    }

    #[test]
    fn test_auto_fixable_standards() {
        let fixable: Vec<_> = ProjectStandards::new()
            .get_auto_fixable_standards()
            .iter()
            .map(|s| s.rule_id)
            .collect();
        assert!(fixable.contains(&"ts-prefer-const"));
        assert!(fixable.contains(&"cucumber-tag-conventions"));
        assert!(!fixable.contains(&"ts-no-any"));
    }

    #[test]
    fn test_rule_categories() {
        let categories = ProjectStandards::new().get_rule_categories();
        assert!(categories.contains("naming"));
        assert!(categories.contains("locators"));
        assert!(categories.contains("gherkin"));
        assert!(categories.contains("testing"));
    }

    #[test]
    fn test_standards_by_category_and_severity() {
        let standards = ProjectStandards::new();
        let naming = standards.get_standards_by_category("naming");
        assert!(naming.iter().any(|s| s.rule_id == "ts-naming-camelcase"));
        assert!(naming.iter().any(|s| s.rule_id == "cucumber-scenario-naming"));

        let errors = standards.get_standards_by_severity(Severity::Error);
        assert!(errors.iter().all(|s| s.severity == Severity::Error));
        assert!(errors.iter().any(|s| s.rule_id == "pw-explicit-waits"));
    }

    #[test]
    fn test_project_catalog_contents() {
        let project = Catalog::Project.standards();
        let categories: HashSet<_> = project.iter().map(|s| s.category).collect();
        for category in ["organization", "naming", "documentation", "configuration", "testing"] {
            assert!(categories.contains(category), "{category}");
        }
        assert!(project.iter().all(|s| s.rule_id.starts_with("project-")));
    }

    #[test]
    fn test_standards_for_file_type() {
        let standards = ProjectStandards::new();
        assert_eq!(standards.get_standards_for_file_type(".ts").len(), 13 + 8);
        assert_eq!(standards.get_standards_for_file_type(".spec.ts").len(), 17 + 8);
        assert_eq!(standards.get_standards_for_file_type(".feature").len(), 19 + 8);
        assert_eq!(standards.get_standards_for_file_type(".md").len(), 8);
    }
}
