//! Vidsight Video Content Analysis Library
//!
//! Derives semantic descriptors from a video file (scene boundaries, frame
//! quality, motion intensity, 360 projection) and fuses them into thumbnail
//! timestamp recommendations.
//!
//! Only the inability to read basic stream metadata fails an analysis; every
//! other step degrades to a documented fallback value.

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use app::{AnalyzerPorts, ContentAnalyzer};
pub use config::AnalyzerConfig;
pub use domain::errors::DomainError;
pub use domain::model::{Capability, ContentAnalysis, QualityMetrics, SceneAnalysis};
pub use error::{AnalyzerError, AnalyzerResult};
pub use output::ReportFormat;
