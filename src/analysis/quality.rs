//! Frame-based quality assessment

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::analysis::luma::FrameMetrics;
use crate::domain::model::QualityMetrics;
use crate::ports::FrameSamplerPort;

/// Most frames ever sampled per analysis
pub const MAX_QUALITY_SAMPLES: usize = 3;
/// Frames sampled per analysis
pub const DEFAULT_QUALITY_SAMPLES: usize = MAX_QUALITY_SAMPLES;

/// Scores sharpness, brightness, contrast and noise from sampled frames
pub struct QualityAssessor {
    sampler: Option<Arc<dyn FrameSamplerPort>>,
    max_samples: usize,
}

impl QualityAssessor {
    /// `sampler` is `None` when frame sampling was not available at startup
    pub fn new(sampler: Option<Arc<dyn FrameSamplerPort>>) -> Self {
        Self {
            sampler,
            max_samples: DEFAULT_QUALITY_SAMPLES,
        }
    }

    /// Limit the frames sampled; clamped to `1..=MAX_QUALITY_SAMPLES`
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples.clamp(1, MAX_QUALITY_SAMPLES);
        self
    }

    pub fn can_sample_frames(&self) -> bool {
        self.sampler.is_some()
    }

    /// Assess quality at up to `max_samples` of `timestamps`. Never fails.
    pub async fn assess(&self, file_path: &Path, timestamps: &[f64]) -> QualityMetrics {
        let Some(sampler) = self.sampler.clone() else {
            debug!("Frame sampling unavailable, using fallback quality estimate");
            return QualityMetrics::fallback();
        };

        let path = file_path.to_path_buf();
        let timestamps: Vec<f64> = timestamps.iter().take(self.max_samples).copied().collect();

        let measured =
            tokio::task::spawn_blocking(move || sample_frames(sampler.as_ref(), &path, &timestamps))
                .await;

        let samples = match measured {
            Ok(samples) => samples,
            Err(e) => {
                warn!(error = %e, "Frame sampling task failed, using fallback quality estimate");
                return QualityMetrics::fallback();
            }
        };

        match FrameMetrics::average(&samples) {
            Some(avg) => {
                debug!("Measured quality from {} frame(s)", samples.len());
                QualityMetrics::from_components(avg.sharpness, avg.brightness, avg.contrast, avg.noise)
            }
            None => {
                debug!("No frames could be sampled, using fallback quality estimate");
                QualityMetrics::fallback()
            }
        }
    }
}

/// Sequentially sample and measure frames through one capture.
///
/// The capture is dropped on every return path.
fn sample_frames(sampler: &dyn FrameSamplerPort, path: &Path, timestamps: &[f64]) -> Vec<FrameMetrics> {
    let mut capture = match sampler.open(path) {
        Ok(capture) => capture,
        Err(e) => {
            warn!(error = %e, "Could not open capture for quality sampling");
            return Vec::new();
        }
    };

    let mut samples = Vec::with_capacity(timestamps.len());
    for &timestamp in timestamps {
        let Some(frame) = capture.read_at(timestamp) else {
            debug!("No frame at {:.3}s, skipping", timestamp);
            continue;
        };
        match FrameMetrics::measure(&frame) {
            Some(metrics) => samples.push(metrics),
            None => debug!("Empty frame at {:.3}s, skipping", timestamp),
        }
    }
    capture.release();
    samples
}
