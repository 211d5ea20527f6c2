//! Metadata probing and normalization
//!
//! Turns the prober's raw report into the [`StreamDescriptor`] every analysis
//! step works from. This is the only step whose failures abort an analysis.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::model::{ProbeReport, StreamDescriptor};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::ports::ProbePort;

/// A probed file: the normalized descriptor plus the report it came from
#[derive(Debug, Clone)]
pub struct ProbedMedia {
    pub descriptor: StreamDescriptor,
    pub report: ProbeReport,
}

/// Wraps the media prober and normalizes its output
pub struct MetadataProbe {
    probe_port: Arc<dyn ProbePort>,
}

impl MetadataProbe {
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Probe `path` once (no retry) and describe its first video stream
    pub async fn describe(&self, path: &Path) -> AnalyzerResult<ProbedMedia> {
        if !path.exists() {
            return Err(AnalyzerError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }

        let report = self.probe_port.probe(path).await?;
        let descriptor = Self::normalize(&report, path)?;
        info!(
            "Probed {}: {} video, {:.2}s",
            path.display(),
            descriptor.resolution(),
            descriptor.duration()
        );
        Ok(ProbedMedia { descriptor, report })
    }

    /// Build the descriptor from a raw report.
    ///
    /// Duration prefers the stream-level value over the container-level one.
    pub fn normalize(report: &ProbeReport, path: &Path) -> AnalyzerResult<StreamDescriptor> {
        let stream = report
            .first_video_stream()
            .ok_or_else(|| AnalyzerError::NoVideoStream {
                path: path.display().to_string(),
            })?;

        let duration = match (stream.duration, report.format.duration) {
            (Some(d), _) => d,
            (None, Some(d)) => {
                debug!("No stream-level duration, using container duration {:.3}s", d);
                d
            }
            (None, None) => {
                return Err(AnalyzerError::InvalidMetadata {
                    message: "no stream or container duration reported".to_string(),
                })
            }
        };

        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(AnalyzerError::InvalidMetadata {
                    message: "video stream does not report its dimensions".to_string(),
                })
            }
        };

        StreamDescriptor::new(
            width,
            height,
            duration,
            stream.codec_type,
            report.format.tags.clone(),
        )
        .map_err(|e| AnalyzerError::InvalidMetadata {
            message: e.to_string(),
        })
    }
}
