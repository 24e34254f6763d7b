mod app;
pub mod client;
pub mod commands;
pub mod config;
pub mod contacts;
pub mod export;
mod redact;
pub mod refresh;
pub mod rehber;
pub mod settings;
pub mod state;
pub mod telemetry;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::Cli;

pub async fn run() -> anyhow::Result<()> {
    app::run().await
}
