//! Error handling module for Vidsight

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Vidsight operations
///
/// Only the metadata-related variants ever leave [`ContentAnalyzer::analyze_content`];
/// every other collaborator failure is absorbed by the step that hit it.
///
/// [`ContentAnalyzer::analyze_content`]: crate::app::ContentAnalyzer::analyze_content
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// The container holds no video stream
    #[error("No video stream found in {path}")]
    NoVideoStream { path: String },

    /// Probe succeeded but the video stream metadata is unusable
    #[error("Invalid stream metadata: {message}")]
    InvalidMetadata { message: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Report serialization error
    #[error("Failed to render report: {message}")]
    ReportError { message: String },

    /// A batch analysis task panicked or was cancelled
    #[error("Analysis task failed: {message}")]
    TaskFailed { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Whether this error means the input itself cannot be analyzed
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            AnalyzerError::InputFileNotFound { .. }
                | AnalyzerError::ProbeError { .. }
                | AnalyzerError::NoVideoStream { .. }
                | AnalyzerError::InvalidMetadata { .. }
        )
    }
}

impl From<DomainError> for AnalyzerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::FileNotFound(path) => AnalyzerError::InputFileNotFound { path },
            DomainError::BadArgs(message) => AnalyzerError::ConfigError { message },
            other => AnalyzerError::ProbeError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias for Vidsight operations
pub type AnalyzerResult<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_failure_maps_to_probe_error() {
        let err: AnalyzerError = DomainError::ProbeFail("moov atom not found".to_string()).into();
        assert!(matches!(err, AnalyzerError::ProbeError { .. }));
        assert!(err.is_fatal_input());
        assert!(err.to_string().contains("moov atom not found"));
    }

    #[test]
    fn test_missing_file_maps_to_input_not_found() {
        let err: AnalyzerError = DomainError::FileNotFound("/tmp/nope.mp4".to_string()).into();
        assert!(matches!(err, AnalyzerError::InputFileNotFound { ref path } if path == "/tmp/nope.mp4"));
    }

    #[test]
    fn test_config_error_is_not_fatal_input() {
        let err = AnalyzerError::ConfigError {
            message: "scene_threshold out of range".to_string(),
        };
        assert!(!err.is_fatal_input());
    }
}
