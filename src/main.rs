mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

const LOG_ENV: &str = "TS_REVIEWER_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Analyze(args) => {
            cli::commands::analyze::execute(args).await?;
        }
        Commands::Fix(args) => {
            cli::commands::fix::execute(args).await?;
        }
        Commands::Standards(args) => {
            cli::commands::standards::execute(args).await?;
        }
        Commands::Init(args) => {
            cli::commands::init::execute(args).await?;
        }
    }

    Ok(())
}
