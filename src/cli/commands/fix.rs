use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::load_config;
use crate::cli::output::OutputFormatter;
use crate::cli::progress::Spinner;
use ts_reviewer::core::FileAnalyzer;
use ts_reviewer::fixers::FixManager;

#[derive(Args, Debug)]
pub struct FixArgs {
    /// File or directory to fix (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Print what would be fixed without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// File name patterns for directory walks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub patterns: Option<Vec<String>>,
}

pub async fn execute(args: &FixArgs) -> Result<()> {
    let config = load_config(&args.path);
    let formatter = OutputFormatter::new(&args.format);

    if args.path.is_file() {
        let path = args.path.display().to_string();
        if args.dry_run {
            let content = std::fs::read_to_string(&args.path)
                .with_context(|| format!("Failed to read {path}"))?;
            let issues = FileAnalyzer::with_config(config.clone())?.analyze_file(&path, Some(&content));
            let manager = FixManager::with_config(config)?;
            return formatter.display_preview(&path, &manager.preview_fixes(&content, &path, &issues));
        }
        let manager = FixManager::with_config(config)?;
        let result = manager.fix_file(&args.path, None)?;
        return formatter.display_fix(&path, &result.result, result.file_modified);
    }

    if !args.path.is_dir() {
        bail!("Path not found: {}", args.path.display());
    }

    if args.dry_run {
        let analyzer = FileAnalyzer::with_config(config.clone())?;
        let manager = FixManager::with_config(config)?;
        for (path, issues) in analyzer.analyze_directory(&args.path, args.patterns.as_deref()) {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            formatter.display_preview(&path, &manager.preview_fixes(&content, &path, &issues))?;
        }
        return Ok(());
    }

    let manager = FixManager::with_config(config)?;
    let spinner = Spinner::new("Fixing...");
    let result = manager.fix_directory(&args.path, args.patterns.as_deref());
    spinner.finish();
    formatter.display_directory_fix(&result)
}
