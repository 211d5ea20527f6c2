// Domain models - Value objects produced by a single content analysis

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::rules::{MotionRules, QualityRules, SceneRules};

/// Stream kind as reported by the media prober
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Other,
}

impl CodecType {
    /// Parse the prober's `codec_type` string; unknown kinds map to `Other`
    pub fn parse(codec_type: &str) -> Self {
        match codec_type.trim().to_lowercase().as_str() {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            _ => CodecType::Other,
        }
    }
}

/// Container-level section of a probe report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatInfo {
    pub duration: Option<f64>,
    pub tags: BTreeMap<String, String>,
}

/// Per-stream section of a probe report
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub codec_type: CodecType,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<f64>,
}

impl StreamInfo {
    /// Video stream with known dimensions and no stream-level duration
    pub fn video(width: u32, height: u32) -> Self {
        Self {
            codec_type: CodecType::Video,
            width: Some(width),
            height: Some(height),
            duration: None,
        }
    }

    /// Audio stream
    pub fn audio() -> Self {
        Self {
            codec_type: CodecType::Audio,
            width: None,
            height: None,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Raw container/stream metadata returned by the media prober
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub format: FormatInfo,
    pub streams: Vec<StreamInfo>,
}

impl ProbeReport {
    /// First stream whose codec type is video
    pub fn first_video_stream(&self) -> Option<&StreamInfo> {
        self.streams
            .iter()
            .find(|stream| stream.codec_type == CodecType::Video)
    }
}

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Normalized description of the analyzed video stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    width: u32,
    height: u32,
    duration: f64,
    codec_type: CodecType,
    format_tags: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Create a descriptor, rejecting zero dimensions and negative or non-finite durations
    pub fn new(
        width: u32,
        height: u32,
        duration: f64,
        codec_type: CodecType,
        format_tags: BTreeMap<String, String>,
    ) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs(
                "Video dimensions cannot be zero".to_string(),
            ));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Duration must be a finite, non-negative number of seconds (got {})",
                duration
            )));
        }

        Ok(Self {
            width,
            height,
            duration,
            codec_type,
            format_tags,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn codec_type(&self) -> CodecType {
        self.codec_type
    }

    pub fn format_tags(&self) -> &BTreeMap<String, String> {
        &self.format_tags
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

/// Where a set of scene boundaries came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneOrigin {
    /// Reported by the content-change filter
    Detected,
    /// Duration-based estimate used when detection produced nothing
    Estimated,
}

/// Scene segmentation of one video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAnalysis {
    scene_boundaries: Vec<f64>,
    scene_count: usize,
    average_scene_length: f64,
    key_moments: Vec<f64>,
    confidence_scores: Vec<f64>,
    origin: SceneOrigin,
}

impl SceneAnalysis {
    /// Build an analysis from detector output.
    ///
    /// Timestamps outside `[0, duration)` or non-finite are discarded and the rest
    /// are sorted and de-duplicated. If nothing survives, the duration-based
    /// estimate is returned instead.
    pub fn detected(boundaries: Vec<f64>, duration: f64) -> Self {
        let mut boundaries: Vec<f64> = boundaries
            .into_iter()
            .filter(|t| t.is_finite() && *t >= 0.0 && *t < duration)
            .collect();
        boundaries.sort_by(f64::total_cmp);
        boundaries.dedup();

        if boundaries.is_empty() {
            return Self::estimated(duration);
        }
        Self::from_boundaries(boundaries, duration, SceneOrigin::Detected)
    }

    /// Deterministic duration-based segmentation.
    ///
    /// Used both when the detector fails and when it reports nothing. Key
    /// moments follow the estimated boundaries like detected ones do; only a
    /// video short enough to have no boundaries gets the single opening
    /// moment `min(10, 0.2 * duration)`.
    pub fn estimated(duration: f64) -> Self {
        Self::from_boundaries(
            SceneRules::fallback_boundaries(duration),
            duration,
            SceneOrigin::Estimated,
        )
    }

    fn from_boundaries(boundaries: Vec<f64>, duration: f64, origin: SceneOrigin) -> Self {
        let scene_count = boundaries.len() + 1;
        let average_scene_length = duration / scene_count as f64;
        let key_moments = SceneRules::key_moments(&boundaries, average_scene_length, duration);
        let confidence = match origin {
            SceneOrigin::Detected => SceneRules::DETECTED_CONFIDENCE,
            SceneOrigin::Estimated => SceneRules::ESTIMATED_CONFIDENCE,
        };
        let confidence_scores = vec![confidence; boundaries.len()];

        Self {
            scene_boundaries: boundaries,
            scene_count,
            average_scene_length,
            key_moments,
            confidence_scores,
            origin,
        }
    }

    pub fn scene_boundaries(&self) -> &[f64] {
        &self.scene_boundaries
    }

    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    pub fn average_scene_length(&self) -> f64 {
        self.average_scene_length
    }

    pub fn key_moments(&self) -> &[f64] {
        &self.key_moments
    }

    /// Placeholder per-boundary confidence: a constant that only encodes the origin
    pub fn confidence_scores(&self) -> &[f64] {
        &self.confidence_scores
    }

    pub fn origin(&self) -> SceneOrigin {
        self.origin
    }
}

/// Frame quality scores, all in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    sharpness: f64,
    brightness: f64,
    contrast: f64,
    noise: f64,
    overall: f64,
}

impl QualityMetrics {
    /// Conservative estimate used when no frame could be measured
    pub const FALLBACK: QualityMetrics = QualityMetrics {
        sharpness: 0.7,
        brightness: 0.5,
        contrast: 0.6,
        noise: 0.3,
        overall: 0.6,
    };

    /// Build metrics from the four measured components; `overall` is derived
    pub fn from_components(sharpness: f64, brightness: f64, contrast: f64, noise: f64) -> Self {
        let sharpness = sharpness.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);
        let contrast = contrast.clamp(0.0, 1.0);
        let noise = noise.clamp(0.0, 1.0);

        Self {
            sharpness,
            brightness,
            contrast,
            noise,
            overall: QualityRules::overall_score(sharpness, brightness, contrast, noise),
        }
    }

    /// "Quality unknown, assume acceptable"
    pub fn fallback() -> Self {
        Self::FALLBACK
    }

    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn overall(&self) -> f64 {
        self.overall
    }
}

/// Coarse motion estimate over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionEstimate {
    pub has_motion: bool,
    pub intensity: f64,
}

impl MotionEstimate {
    /// Assume motion when estimation fails
    pub const FALLBACK: MotionEstimate = MotionEstimate {
        has_motion: true,
        intensity: 0.5,
    };

    /// Derive the estimate from the number of frame reports the filter emitted
    pub fn from_frame_reports(processed_frames: usize) -> Self {
        let intensity = MotionRules::intensity(processed_frames);
        Self {
            has_motion: MotionRules::has_motion(intensity),
            intensity,
        }
    }

    pub fn fallback() -> Self {
        Self::FALLBACK
    }
}

/// Final report of one content analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    scenes: SceneAnalysis,
    quality_metrics: QualityMetrics,
    duration: f64,
    resolution: Resolution,
    has_motion: bool,
    motion_intensity: f64,
    is_360_video: bool,
    recommended_thumbnails: Vec<f64>,
}

impl ContentAnalysis {
    pub fn new(
        descriptor: &StreamDescriptor,
        scenes: SceneAnalysis,
        quality_metrics: QualityMetrics,
        motion: MotionEstimate,
        is_360_video: bool,
        recommended_thumbnails: Vec<f64>,
    ) -> Self {
        Self {
            scenes,
            quality_metrics,
            duration: descriptor.duration(),
            resolution: descriptor.resolution(),
            has_motion: motion.has_motion,
            motion_intensity: motion.intensity,
            is_360_video,
            recommended_thumbnails,
        }
    }

    pub fn scenes(&self) -> &SceneAnalysis {
        &self.scenes
    }

    pub fn quality_metrics(&self) -> &QualityMetrics {
        &self.quality_metrics
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn has_motion(&self) -> bool {
        self.has_motion
    }

    pub fn motion_intensity(&self) -> f64 {
        self.motion_intensity
    }

    pub fn is_360_video(&self) -> bool {
        self.is_360_video
    }

    pub fn recommended_thumbnails(&self) -> &[f64] {
        &self.recommended_thumbnails
    }
}

/// Optional collaborators whose absence degrades the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Frame-level decoding for quality measurement
    FrameSampling,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::FrameSampling => "frame-sampling",
        }
    }

    /// What installing/enabling the capability requires
    pub fn requirement(&self) -> &'static str {
        match self {
            Capability::FrameSampling => "libav decoders (ffmpeg shared libraries) with frame sampling enabled",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
