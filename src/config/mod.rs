//! Analyzer configuration
//!
//! Defaults reproduce the built-in analysis constants, so an empty config file
//! and no config file behave the same.

use serde::{Deserialize, Serialize};

use crate::analysis::motion::DEFAULT_MOTION_WINDOW_SECS;
use crate::analysis::quality::{DEFAULT_QUALITY_SAMPLES, MAX_QUALITY_SAMPLES};
use crate::analysis::scenes::DEFAULT_SCENE_THRESHOLD;
use crate::domain::errors::DomainError;
use crate::utils::logging::LoggingConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub tools: ToolsConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// External executables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Scene-change magnitude in (0, 1]
    pub scene_threshold: f64,
    pub motion_window_secs: f64,
    pub quality_samples: usize,
    /// Set to false to skip frame decoding entirely
    pub enable_frame_sampling: bool,
    /// Concurrent analyses in a batch; 0 means one per CPU
    pub batch_concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scene_threshold: DEFAULT_SCENE_THRESHOLD,
            motion_window_secs: DEFAULT_MOTION_WINDOW_SECS,
            quality_samples: DEFAULT_QUALITY_SAMPLES,
            enable_frame_sampling: true,
            batch_concurrency: 0,
        }
    }
}

impl AnalysisConfig {
    /// Effective batch concurrency, never zero
    pub fn effective_concurrency(&self) -> usize {
        if self.batch_concurrency == 0 {
            num_cpus::get().max(1)
        } else {
            self.batch_concurrency
        }
    }
}

impl AnalyzerConfig {
    /// Reject values the analysis steps cannot work with
    pub fn validate(&self) -> Result<(), DomainError> {
        let analysis = &self.analysis;
        if !(analysis.scene_threshold > 0.0 && analysis.scene_threshold <= 1.0) {
            return Err(DomainError::BadArgs(format!(
                "scene_threshold must be in (0, 1], got {}",
                analysis.scene_threshold
            )));
        }
        if !analysis.motion_window_secs.is_finite() || analysis.motion_window_secs <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "motion_window_secs must be a positive number of seconds, got {}",
                analysis.motion_window_secs
            )));
        }
        if !(1..=MAX_QUALITY_SAMPLES).contains(&analysis.quality_samples) {
            return Err(DomainError::BadArgs(format!(
                "quality_samples must be between 1 and {}, got {}",
                MAX_QUALITY_SAMPLES, analysis.quality_samples
            )));
        }
        if self.tools.ffmpeg_path.trim().is_empty() || self.tools.ffprobe_path.trim().is_empty() {
            return Err(DomainError::BadArgs(
                "Tool paths cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
