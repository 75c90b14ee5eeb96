//! Model Console
//!
//! Schema-driven forms for multilingual, access-scoped model and instance
//! records.
//!
//! This is the main entry point for the command-line application.

use clap::Parser;
use console_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = console_core::VERSION, "starting model-console");

    console_cli::run(cli).await
}
