use crate::commands::{self, Command};
use crate::config::Config;
use crate::redact::redact_secrets;
use crate::state::AppState;
use crate::telemetry;
use anyhow::Context;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "rehber", version, about = "Command-line client for the Rehber address book", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(&cli.config.telemetry)?;

    let state = AppState::from_config(&cli.config).context("failed to start")?;
    match commands::execute(&state, cli.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            Err(anyhow::anyhow!(redact_secrets(&format!("{err:#}")).into_owned()))
        }
    }
}
