pub mod cucumber;
pub mod custom;
pub mod heuristics;
pub mod playwright;
pub mod traits;
pub mod typescript;

pub use cucumber::CucumberAnalyzer;
pub use custom::{CustomRule, CustomRuleAnalyzer, RuleDefinition};
pub use playwright::PlaywrightAnalyzer;
pub use traits::{Analyzer, Issue, Severity, SourceFile};
pub use typescript::TypeScriptAnalyzer;
