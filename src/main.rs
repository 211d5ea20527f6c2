//! Vidsight video content analyzer
//!
//! # Usage
//!
//! ```bash
//! vidsight analyze talk.mp4
//! vidsight analyze --format json --no-frames ./footage/
//! vidsight capabilities
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vidsight::cli::{commands, Cli, Commands};
use vidsight::config_initialization::initialize_configuration;
use vidsight::utils::logging::init_logging;

/// Main entry point for the Vidsight CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = initialize_configuration(&cli).context("Failed to load configuration")?;
    init_logging(&resolved.config.logging)?;

    info!("Starting Vidsight {}", env!("CARGO_PKG_VERSION"));
    resolved.log_sources();
    let config = resolved.config;

    match cli.command {
        Commands::Analyze(args) => commands::analyze(args, &config).await?,
        Commands::Capabilities => commands::capabilities(&config)?,
    }

    Ok(())
}
