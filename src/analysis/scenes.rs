//! Scene segmentation from content-change diagnostics

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::analysis::showinfo;
use crate::domain::model::{SceneAnalysis, SceneOrigin};
use crate::ports::SceneFilterPort;

/// Change magnitude (0-1) above which a frame counts as a cut
pub const DEFAULT_SCENE_THRESHOLD: f64 = 0.3;

/// Detects scene cuts, falling back to a duration-based estimate
pub struct SceneSegmenter {
    filter: Arc<dyn SceneFilterPort>,
    threshold: f64,
}

impl SceneSegmenter {
    pub fn new(filter: Arc<dyn SceneFilterPort>) -> Self {
        Self {
            filter,
            threshold: DEFAULT_SCENE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Segment the video. Never fails: detector errors downgrade to the estimate.
    pub async fn segment(&self, file_path: &Path, duration: f64) -> SceneAnalysis {
        let scenes = match self.filter.detect_changes(file_path, self.threshold).await {
            Ok(output) => SceneAnalysis::detected(showinfo::parse_pts_times(&output), duration),
            Err(e) => {
                warn!(error = %e, "Scene detection failed, using duration-based scenes");
                SceneAnalysis::estimated(duration)
            }
        };

        if scenes.origin() == SceneOrigin::Estimated {
            debug!("No usable scene cuts detected; estimated {} scenes", scenes.scene_count());
        } else {
            debug!("Detected {} scene boundaries", scenes.scene_boundaries().len());
        }
        scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeSceneFilter {
        result: Result<String, DomainError>,
        thresholds: Mutex<Vec<f64>>,
    }

    impl FakeSceneFilter {
        fn new(result: Result<String, DomainError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                thresholds: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SceneFilterPort for FakeSceneFilter {
        async fn detect_changes(&self, _file_path: &Path, threshold: f64) -> Result<String, DomainError> {
            self.thresholds.lock().unwrap().push(threshold);
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_detected_boundaries() {
        let filter = FakeSceneFilter::new(Ok(
            "n:0 pts_time:40.0 fmt:yuv420p\nn:1 pts_time:12.5 fmt:yuv420p\n".to_string(),
        ));
        let segmenter = SceneSegmenter::new(filter.clone());
        let scenes = segmenter.segment(Path::new("clip.mp4"), 60.0).await;

        assert_eq!(scenes.origin(), SceneOrigin::Detected);
        assert_eq!(scenes.scene_boundaries(), &[12.5, 40.0]);
        assert_eq!(scenes.scene_count(), 3);
        assert_eq!(scenes.confidence_scores(), &[0.8, 0.8]);
        assert_eq!(*filter.thresholds.lock().unwrap(), vec![0.3]);
    }

    #[tokio::test]
    async fn test_filter_error_equals_estimate() {
        let filter = FakeSceneFilter::new(Err(DomainError::FilterFail("exit status 1".to_string())));
        let segmenter = SceneSegmenter::new(filter);

        for duration in [10.0, 75.0, 300.0] {
            let scenes = segmenter.segment(Path::new("broken.mp4"), duration).await;
            assert_eq!(scenes, SceneAnalysis::estimated(duration));
            assert!(scenes.confidence_scores().iter().all(|c| *c == 0.5));
        }
    }

    #[tokio::test]
    async fn test_empty_output_equals_estimate() {
        let filter = FakeSceneFilter::new(Ok("frame=  120 fps=0.0 q=-0.0 Lsize=N/A\n".to_string()));
        let segmenter = SceneSegmenter::new(filter);
        let scenes = segmenter.segment(Path::new("static.mp4"), 300.0).await;

        assert_eq!(scenes.origin(), SceneOrigin::Estimated);
        assert_eq!(scenes.scene_boundaries().len(), 9);
        assert_eq!(scenes.scene_count(), 10);
    }

    #[tokio::test]
    async fn test_custom_threshold_is_forwarded() {
        let filter = FakeSceneFilter::new(Ok(String::new()));
        let segmenter = SceneSegmenter::new(filter.clone()).with_threshold(0.45);
        segmenter.segment(Path::new("clip.mp4"), 20.0).await;
        assert_eq!(*filter.thresholds.lock().unwrap(), vec![0.45]);
    }
}
