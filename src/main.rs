use clap::{Parser, Subcommand};
use med_lane::utils::logger::{init_logger, LogTarget};
use med_lane::{agents::RunOutcome, config::Config, headless, tui};
use std::path::PathBuf;
use tracing::info;

/// MED-LANE - explore drug repurposing with a simulated agent pipeline
#[derive(Parser, Debug)]
#[command(name = "med-lane", author, version, about)]
struct Cli {
    /// Data directory for settings and logs (overrides MED_LANE__STORAGE__DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Simulated duration of each agent, in milliseconds
    #[arg(long, global = true)]
    agent_duration_ms: Option<u64>,

    /// Let every task succeed instead of the scripted patent failure
    #[arg(long, global = true)]
    no_demo_failure: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal interface (default)
    Tui,

    /// Run one repurposing analysis and print progress
    Run {
        /// Drug name, case-insensitive
        #[arg(long)]
        drug: String,

        /// Modification to explore
        #[arg(long)]
        modification: String,
    },

    /// List the drug catalog
    Catalog {
        /// Only show drugs whose name contains this term
        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    if let Some(ms) = cli.agent_duration_ms {
        config.runner.agent_duration_ms = ms;
    }
    if cli.no_demo_failure {
        config.runner.demo_failure = false;
    }

    let command = cli.command.unwrap_or(Command::Tui);

    // The TUI owns the terminal, so it logs to a file
    let target = if matches!(command, Command::Tui) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _guard = init_logger(&config, target)?;
    info!("Configuration loaded: {:?}", config.runner);

    match command {
        Command::Tui => tui::run(config).await,
        Command::Run { drug, modification } => {
            match headless::run_headless(&config, &drug, &modification, std::io::stdout()).await? {
                RunOutcome::Completed { .. } => Ok(()),
                RunOutcome::Aborted { reason } => Err(anyhow::anyhow!("Run aborted: {}", reason)),
            }
        }
        Command::Catalog { search } => {
            headless::list_catalog(search.as_deref(), std::io::stdout())
        }
    }
}
