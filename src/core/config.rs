use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::analyzers::{RuleDefinition, Severity};
use crate::fixers::manual::SuggestionTemplate;

pub const CONFIG_FILE_NAME: &str = ".ts-reviewer.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub severity_threshold: Option<String>,
    pub ignore: Option<IgnoreConfig>,
    pub patterns: Option<Vec<String>>,
    pub custom_rules_enabled: Option<bool>,
    #[serde(default)]
    pub custom_rules: Vec<RuleDefinition>,
    #[serde(default)]
    pub custom_suggestions: BTreeMap<String, SuggestionTemplate>,
    pub linters: Option<LinterConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    pub paths: Option<Vec<String>>,
    pub rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    #[serde(default)]
    pub eslint: bool,
    #[serde(default)]
    pub prettier: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            eslint: false,
            prettier: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Self {
        let config_path = project_path.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Config::default();
        }
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_yaml::from_str::<Config>(&content) {
                Ok(config) => {
                    tracing::debug!(path = %config_path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), error = %e, "ignoring unparsable config");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "could not read config");
                Config::default()
            }
        }
    }

    /// Unknown values are treated as unset.
    pub fn threshold(&self) -> Option<Severity> {
        self.severity_threshold.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn custom_rules_enabled(&self) -> bool {
        self.custom_rules_enabled.unwrap_or(true)
    }

    pub fn linters(&self) -> LinterConfig {
        self.linters.clone().unwrap_or_default()
    }

    pub fn ignored_paths(&self) -> &[String] {
        self.ignore
            .as_ref()
            .and_then(|i| i.paths.as_deref())
            .unwrap_or(&[])
    }

    pub fn ignored_rules(&self) -> &[String] {
        self.ignore
            .as_ref()
            .and_then(|i| i.rules.as_deref())
            .unwrap_or(&[])
    }

    pub fn is_path_ignored(&self, path: &str) -> bool {
        self.ignored_paths().iter().any(|p| path.contains(p.as_str()))
    }

    pub fn is_rule_ignored(&self, rule_id: &str) -> bool {
        self.ignored_rules().iter().any(|r| r == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path());
        assert!(config.severity_threshold.is_none());
        assert!(config.ignore.is_none());
        assert!(config.custom_rules_enabled());
        assert!(!config.linters().eslint);
        assert_eq!(config.linters().timeout_secs, 30);
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let yaml = "\
severity_threshold: warning
ignore:
  paths:
    - generated/
  rules:
    - ts-no-any
patterns:
  - \"*.ts\"
linters:
  eslint: true
";
        fs::write(tmp.path().join(CONFIG_FILE_NAME), yaml).unwrap();
        let config = Config::load(tmp.path());
        assert_eq!(config.threshold(), Some(Severity::Warning));
        assert!(config.is_rule_ignored("ts-no-any"));
        assert!(!config.is_rule_ignored("ts-no-console-log"));
        assert!(config.is_path_ignored("src/generated/api.ts"));
        assert_eq!(config.patterns.unwrap(), vec!["*.ts".to_string()]);
        let linters = config.linters.unwrap();
        assert!(linters.eslint);
        assert!(!linters.prettier);
        assert_eq!(linters.timeout_secs, 30);
    }

    #[test]
    fn test_custom_rules_in_config() {
        let tmp = TempDir::new().unwrap();
        let yaml = "\
custom_rules_enabled: false
custom_rules:
  - id: no-debugger
    pattern: \"\\\\bdebugger\\\\b\"
    message: Debugger statement left in code
    severity: error
    category: typescript
";
        fs::write(tmp.path().join(CONFIG_FILE_NAME), yaml).unwrap();
        let config = Config::load(tmp.path());
        assert!(!config.custom_rules_enabled());
        assert_eq!(config.custom_rules.len(), 1);
        assert_eq!(config.custom_rules[0].id.as_deref(), Some("no-debugger"));
    }

    #[test]
    fn test_unparsable_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "ignore: [unclosed").unwrap();
        let config = Config::load(tmp.path());
        assert!(config.ignore.is_none());
    }

    #[test]
    fn test_unknown_threshold_is_unset() {
        let config = Config {
            severity_threshold: Some("high".to_string()),
            ..Default::default()
        };
        assert!(config.threshold().is_none());
    }
}
