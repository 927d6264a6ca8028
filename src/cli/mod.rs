pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::Path;

use ts_reviewer::core::Config;

#[derive(Parser, Debug)]
#[command(
    name = "ts-reviewer",
    version,
    about = "Review and auto-fix TypeScript, Playwright and Cucumber sources"
)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a file or directory against the rule catalogs
    Analyze(commands::analyze::AnalyzeArgs),
    /// Apply automated fixes and list what needs manual work
    Fix(commands::fix::FixArgs),
    /// List the coding standards
    Standards(commands::standards::StandardsArgs),
    /// Write a starter .ts-reviewer.yml
    Init(commands::init::InitArgs),
}

/// Config lives next to a file argument, or inside a directory argument.
pub fn load_config(path: &Path) -> Config {
    let root = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    };
    Config::load(root)
}
