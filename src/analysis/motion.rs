//! Coarse motion estimation over the opening window of a video

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::analysis::showinfo;
use crate::domain::model::MotionEstimate;
use crate::ports::MotionFilterPort;

/// Seconds of source media examined at most
pub const DEFAULT_MOTION_WINDOW_SECS: f64 = 10.0;

/// Derives motion intensity from the motion filter's frame reports
pub struct MotionEstimator {
    filter: Arc<dyn MotionFilterPort>,
    window_secs: f64,
}

impl MotionEstimator {
    pub fn new(filter: Arc<dyn MotionFilterPort>) -> Self {
        Self {
            filter,
            window_secs: DEFAULT_MOTION_WINDOW_SECS,
        }
    }

    pub fn with_window(mut self, window_secs: f64) -> Self {
        self.window_secs = window_secs;
        self
    }

    /// Estimate motion. Never fails: filter errors yield [`MotionEstimate::FALLBACK`].
    pub async fn estimate(&self, file_path: &Path, duration: f64) -> MotionEstimate {
        let window = duration.min(self.window_secs).max(0.0);

        match self.filter.estimate_motion(file_path, window).await {
            Ok(output) => {
                let frames = showinfo::count_frame_reports(&output);
                let estimate = MotionEstimate::from_frame_reports(frames);
                debug!(
                    "Motion over first {:.1}s: {} frame reports, intensity {:.2}",
                    window, frames, estimate.intensity
                );
                estimate
            }
            Err(e) => {
                warn!(error = %e, "Motion detection failed, assuming motion");
                MotionEstimate::fallback()
            }
        }
    }
}
