use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::load_config;
use crate::cli::output::OutputFormatter;
use crate::cli::progress::Spinner;
use ts_reviewer::analyzers::Issue;
use ts_reviewer::core::{Config, DirectoryResults, FileAnalyzer};
use ts_reviewer::linters::LinterManager;
use ts_reviewer::reporters::{JsonReporter, Reporter, TextReporter};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File or directory to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// File name patterns for directory walks (comma-separated, e.g. *.ts,*.feature)
    #[arg(long, value_delimiter = ',')]
    pub patterns: Option<Vec<String>>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Minimum severity to report, overriding the config file
    #[arg(long, value_parser = ["info", "warning", "error"])]
    pub severity: Option<String>,

    /// Also run ESLint and Prettier when they are installed
    #[arg(long)]
    pub with_linters: bool,

    /// Write the report to a file instead of the console
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: &AnalyzeArgs) -> Result<()> {
    let mut config = load_config(&args.path);
    if args.severity.is_some() {
        config.severity_threshold = args.severity.clone();
    }
    let results = collect(args, config).await?;

    match &args.output {
        Some(output_path) => {
            let reporter: Box<dyn Reporter> = match args.format.as_str() {
                "json" => Box::new(JsonReporter),
                _ => Box::new(TextReporter),
            };
            std::fs::write(output_path, reporter.generate(&results)?)?;
            println!(
                "  {} {} report written to {}",
                "DONE".green(),
                reporter.name(),
                output_path.display()
            );
            Ok(())
        }
        None => OutputFormatter::new(&args.format).display_results(&results),
    }
}

async fn collect(args: &AnalyzeArgs, config: Config) -> Result<DirectoryResults> {
    let mut linter_config = config.linters();
    if args.with_linters {
        linter_config.eslint = true;
        linter_config.prettier = true;
    }
    let linters = LinterManager::from_config(&linter_config);
    let analyzer = FileAnalyzer::with_config(config)?;

    if args.path.is_file() {
        let path = args.path.display().to_string();
        let mut issues = analyzer.analyze_file(&path, None);
        issues.extend(lint(&linters, &args.path).await);

        let mut results = DirectoryResults::new();
        if !issues.is_empty() {
            results.insert(path, issues);
        }
        return Ok(results);
    }

    if !args.path.is_dir() {
        bail!("Path not found: {}", args.path.display());
    }

    let spinner = Spinner::new("Analyzing...");
    let mut results = analyzer.analyze_directory(&args.path, args.patterns.as_deref());
    if !linters.is_empty() {
        for file in analyzer.collect_files(&args.path, args.patterns.as_deref()) {
            spinner.set_message(format!("Linting {}", file.display()));
            let found = lint(&linters, &file).await;
            if !found.is_empty() {
                results
                    .entry(file.display().to_string())
                    .or_default()
                    .extend(found);
            }
        }
    }
    spinner.finish();

    Ok(results)
}

async fn lint(linters: &LinterManager, path: &Path) -> Vec<Issue> {
    if linters.is_empty() {
        return Vec::new();
    }
    match tokio::fs::read_to_string(path).await {
        Ok(content) => linters.lint(&content, &path.display().to_string()).await,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping linters");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_args(path: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            path,
            patterns: None,
            format: "json".to_string(),
            severity: None,
            with_linters: false,
            output: None,
        }
    }

    #[tokio::test]
    async fn test_collect_single_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.ts");
        fs::write(&file, "let apiKey = \"abc\";\n").unwrap();

        let results = collect(&make_args(file), Config::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        let issues = results.values().next().unwrap();
        assert!(issues.iter().any(|i| i.rule_id == "ts-prefer-const"));
    }

    #[tokio::test]
    async fn test_collect_missing_path() {
        let args = make_args(PathBuf::from("/no/such/path"));
        assert!(collect(&args, Config::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_severity_flag_overrides_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.ts"), "let apiKey = \"abc\";\n").unwrap();
        let report = tmp.path().join("report.json");

        let mut args = make_args(tmp.path().to_path_buf());
        args.severity = Some("error".to_string());
        args.output = Some(report.clone());
        execute(&args).await.unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(parsed["summary"]["statistics"]["by_severity"]["warning"], 0);
    }
}
