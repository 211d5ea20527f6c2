//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::config::AnalyzerConfig;
use crate::domain::errors::DomainError;
use crate::utils::logging::LogLevel;

/// Effective configuration plus where its values came from.
///
/// Resolution runs before the log subscriber exists, so the sources are
/// reported afterwards through [`ResolvedConfig::log_sources`].
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AnalyzerConfig,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

impl ResolvedConfig {
    pub fn log_sources(&self) {
        match &self.source {
            Some(path) => info!("Loaded configuration from: {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }
        if self.env_overrides > 0 {
            debug!("Applied {} environment variable overrides", self.env_overrides);
        }
        if self.cli_overrides > 0 {
            debug!("Applied {} CLI configuration overrides", self.cli_overrides);
        }
    }
}

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<ResolvedConfig, DomainError> {
    initialize_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with an explicit environment lookup
pub fn initialize_with_env<F>(cli: &Cli, lookup: F) -> Result<ResolvedConfig, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let source = TomlConfigAdapter::locate(cli.config.as_deref());
    let mut config = match &source {
        Some(path) => TomlConfigAdapter::load_file(path)?,
        None => AnalyzerConfig::default(),
    };
    let env_overrides = TomlConfigAdapter::apply_env(&mut config, lookup)?;
    let cli_overrides = apply_cli_overrides(&mut config, cli)?;
    config.validate()?;

    Ok(ResolvedConfig {
        config,
        source,
        env_overrides,
        cli_overrides,
    })
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AnalyzerConfig, cli: &Cli) -> Result<usize, DomainError> {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = LogLevel::parse(level)?;
        cli_overrides += 1;
    }
    if cli.log_json {
        config.logging.json = true;
        cli_overrides += 1;
    }

    if let Commands::Analyze(args) = &cli.command {
        if args.no_frames {
            config.analysis.enable_frame_sampling = false;
            cli_overrides += 1;
        }
        if let Some(threshold) = args.scene_threshold {
            config.analysis.scene_threshold = threshold;
            cli_overrides += 1;
        }
        if let Some(jobs) = args.jobs {
            config.analysis.batch_concurrency = jobs;
            cli_overrides += 1;
        }
    }

    Ok(cli_overrides)
}
