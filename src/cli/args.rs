//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::output::ReportFormat;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Video files or directories to analyze
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Skip frame decoding; quality metrics use fallback estimates
    #[arg(long)]
    pub no_frames: bool,

    /// Scene-change sensitivity in (0, 1]
    #[arg(long, value_name = "F")]
    pub scene_threshold: Option<f64>,

    /// Maximum files analyzed at once (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}
