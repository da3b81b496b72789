use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use assist_application::TriageSessionFactory;
use assist_infrastructure::ConfigService;

mod bootstrap;
mod repl;

#[derive(Parser, Debug)]
#[command(name = "assist")]
#[command(about = "Agent Assist - triage support tickets one at a time with suggested replies", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/agent-assist/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// TOML ticket dataset to triage instead of the built-in one
    #[arg(long, value_name = "FILE")]
    tickets: Option<PathBuf>,

    /// Directory holding triage_responses.json
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep selections in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Show a random 3-5 prefix of the suggestions, drawn from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for log files instead of ~/.config/agent-assist/logs
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::load_config(&cli)?;

    if cli.print_config {
        print!("{}", ConfigService::render(&config)?);
        return Ok(());
    }

    let _guard = bootstrap::init_logging(cli.log_dir.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "agent assist starting");

    let storage = bootstrap::selection_storage(&cli);
    let session = TriageSessionFactory::new(config).create(&storage).await?;

    repl::run(session).await
}
