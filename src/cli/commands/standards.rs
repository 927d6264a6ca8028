use anyhow::Result;
use clap::Args;

use crate::cli::output::OutputFormatter;
use ts_reviewer::analyzers::Severity;
use ts_reviewer::standards::{CodeStandard, ProjectStandards};

#[derive(Args, Debug)]
pub struct StandardsArgs {
    /// Only list standards in this category (e.g. naming, reliability)
    #[arg(long)]
    pub category: Option<String>,

    /// Only list standards of this severity
    #[arg(long, value_parser = ["info", "warning", "error"])]
    pub severity: Option<String>,

    /// Only list auto-fixable standards
    #[arg(long)]
    pub fixable: bool,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

pub async fn execute(args: &StandardsArgs) -> Result<()> {
    OutputFormatter::new(&args.format).display_standards(&select(args))
}

fn select(args: &StandardsArgs) -> Vec<&'static CodeStandard> {
    let catalog = ProjectStandards::new();
    let mut standards = match &args.category {
        Some(category) => catalog.get_standards_by_category(category),
        None => catalog.get_all_standards(),
    };
    if let Some(severity) = args.severity.as_deref().and_then(|s| s.parse::<Severity>().ok()) {
        standards.retain(|s| s.severity == severity);
    }
    if args.fixable {
        standards.retain(|s| s.auto_fixable);
    }
    standards
}
