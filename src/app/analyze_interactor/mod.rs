// Analyze interactor - Orchestrates the content analysis use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::analysis::{MotionEstimator, QualityAssessor, SceneSegmenter};
use crate::config::AnalysisConfig;
use crate::domain::model::*;
use crate::domain::rules::{SphericalDetector, ThumbnailRecommender};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::ports::*;
use crate::probe::{MetadataProbe, ProbedMedia};

/// Collaborators an analyzer is built from.
///
/// `frame_sampler` is `None` when frame decoding could not be initialized.
#[derive(Clone)]
pub struct AnalyzerPorts {
    pub probe: Arc<dyn ProbePort>,
    pub scene_filter: Arc<dyn SceneFilterPort>,
    pub motion_filter: Arc<dyn MotionFilterPort>,
    pub frame_sampler: Option<Arc<dyn FrameSamplerPort>>,
}

/// Interactor for the content analysis use case
pub struct ContentAnalyzer {
    metadata: MetadataProbe,
    segmenter: SceneSegmenter,
    assessor: QualityAssessor,
    motion: MotionEstimator,
    missing: Vec<Capability>,
    batch_concurrency: usize,
}

impl ContentAnalyzer {
    /// Create an analyzer; the capability set is fixed from here on
    pub fn new(ports: AnalyzerPorts, settings: &AnalysisConfig) -> Self {
        let mut missing = Vec::new();
        if ports.frame_sampler.is_none() {
            missing.push(Capability::FrameSampling);
        }
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(Capability::name).collect();
            warn!(
                missing = %names.join(", "),
                "Full analysis unavailable, quality metrics will use fallback estimates"
            );
        }

        Self {
            metadata: MetadataProbe::new(ports.probe),
            segmenter: SceneSegmenter::new(ports.scene_filter)
                .with_threshold(settings.scene_threshold),
            assessor: QualityAssessor::new(ports.frame_sampler)
                .with_max_samples(settings.quality_samples),
            motion: MotionEstimator::new(ports.motion_filter)
                .with_window(settings.motion_window_secs),
            missing,
            batch_concurrency: settings.effective_concurrency(),
        }
    }

    /// Whether frame-level analysis is possible
    pub fn is_full_analysis_available(&self) -> bool {
        self.missing.is_empty()
    }

    /// Optional capabilities that failed to initialize
    pub fn missing_capabilities(&self) -> Vec<Capability> {
        self.missing.clone()
    }

    /// Analyze one video file.
    ///
    /// Only metadata failures are returned as errors; every other step
    /// substitutes its fallback value.
    pub async fn analyze_content(&self, path: &Path) -> AnalyzerResult<ContentAnalysis> {
        info!("Starting content analysis for: {}", path.display());

        let ProbedMedia { descriptor, report } = self.metadata.describe(path).await?;
        let duration = descriptor.duration();

        let scenes = self.segmenter.segment(path, duration).await;
        let quality = self.assessor.assess(path, scenes.key_moments()).await;
        let motion = self.motion.estimate(path, duration).await;
        let is_360_video = SphericalDetector::detect(&report);
        let thumbnails = ThumbnailRecommender::recommend(&scenes, &quality, duration);
        debug!(
            "Scenes: {}, overall quality {:.2}, motion {:.2}, 360: {}",
            scenes.scene_count(),
            quality.overall(),
            motion.intensity,
            is_360_video
        );

        let analysis = ContentAnalysis::new(&descriptor, scenes, quality, motion, is_360_video, thumbnails);
        info!(
            "Content analysis completed for {}: {} thumbnail(s) recommended",
            path.display(),
            analysis.recommended_thumbnails().len()
        );
        Ok(analysis)
    }

    /// Analyze several files concurrently; results keep the input order
    pub async fn analyze_batch(
        self: &Arc<Self>,
        paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, AnalyzerResult<ContentAnalysis>)> {
        let semaphore = Arc::new(Semaphore::new(self.batch_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        info!(
            "Analyzing {} file(s), up to {} at a time",
            paths.len(),
            self.batch_concurrency.max(1)
        );

        for (index, path) in paths.iter().cloned().enumerate() {
            let analyzer = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => analyzer.analyze_content(&path).await,
                    Err(e) => Err(AnalyzerError::TaskFailed {
                        message: e.to_string(),
                    }),
                };
                (index, result)
            });
        }

        let mut results: Vec<Option<AnalyzerResult<ContentAnalysis>>> =
            paths.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => warn!(error = %e, "Analysis task did not complete"),
            }
        }

        paths
            .into_iter()
            .zip(results)
            .map(|(path, result)| {
                let result = result.unwrap_or_else(|| {
                    Err(AnalyzerError::TaskFailed {
                        message: format!("analysis of {} did not complete", path.display()),
                    })
                });
                (path, result)
            })
            .collect()
    }
}
