//! CLI module for Vidsight
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::AnalyzeArgs;

/// Vidsight video content analyzer
///
/// Derives scene boundaries, quality, motion and 360 detection from video
/// files and recommends thumbnail timestamps.
#[derive(Parser, Debug)]
#[command(name = "vidsight")]
#[command(about = "Vidsight - Video content analysis and thumbnail recommendation")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: vidsight.toml, config/vidsight.toml, user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze video files or directories of videos
    Analyze(AnalyzeArgs),
    /// Report which optional analysis capabilities are available
    Capabilities,
}
