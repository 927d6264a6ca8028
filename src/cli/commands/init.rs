use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use ts_reviewer::core::config::CONFIG_FILE_NAME;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to the project (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: &InitArgs) -> Result<()> {
    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("Path not found: {}", args.path.display()))?;
    let config_path = path.join(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists. Use {} to overwrite.",
            "SKIP".yellow(),
            CONFIG_FILE_NAME,
            "--force".bold()
        );
        return Ok(());
    }

    std::fs::write(&config_path, generate_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("  {} {} created", "DONE".green(), CONFIG_FILE_NAME);
    println!(
        "  Edit {} to customize rules and thresholds.",
        config_path.display()
    );

    Ok(())
}

fn generate_config() -> String {
    r#"# ts-reviewer configuration

# Minimum severity to report (info, warning, error)
severity_threshold: info

# Files and rules to ignore
ignore:
  paths:
    - node_modules/
    - dist/
    - coverage/
  rules: []
    # - ts-no-magic-numbers

# File name patterns used when analyzing a directory
patterns:
  - "*.ts"
  - "*.js"
  - "*.feature"

# Project-specific rules, matched line by line
custom_rules_enabled: true
custom_rules: []
  # - id: no-only
  #   pattern: '\b(test|describe)\.only\('
  #   message: Focused tests must not be committed
  #   severity: error
  #   category: playwright
  #   suggestion: Remove .only

# Extra manual-fix guidance keyed by rule id
custom_suggestions: {}

# External tools, run by `analyze --with-linters` or when enabled here
linters:
  eslint: false
  prettier: false
  timeout_secs: 30
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use ts_reviewer::core::Config;

    #[tokio::test]
    async fn test_init_creates_config_file() {
        let tmp = TempDir::new().unwrap();
        let args = InitArgs {
            path: tmp.path().to_path_buf(),
            force: false,
        };
        execute(&args).await.unwrap();
        assert!(tmp.path().join(CONFIG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_init_skips_existing_without_force() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "existing").unwrap();
        let args = InitArgs {
            path: tmp.path().to_path_buf(),
            force: false,
        };
        execute(&args).await.unwrap();
        let content = fs::read_to_string(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(content, "existing");
    }

    #[tokio::test]
    async fn test_init_overwrites_with_force() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "old").unwrap();
        let args = InitArgs {
            path: tmp.path().to_path_buf(),
            force: true,
        };
        execute(&args).await.unwrap();
        let content = fs::read_to_string(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(content.contains("severity_threshold"));
    }

    #[test]
    fn test_generated_config_loads() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), generate_config()).unwrap();
        let config = Config::load(tmp.path());
        assert_eq!(config.severity_threshold.as_deref(), Some("info"));
        assert!(config.custom_rules_enabled());
        assert!(config.is_path_ignored("web/node_modules/x.ts"));
        assert_eq!(config.linters().timeout_secs, 30);
        assert_eq!(config.patterns.map(|p| p.len()), Some(3));
    }
}
