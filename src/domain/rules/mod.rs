// Domain rules - Deterministic policies shared by the analysis steps

use std::collections::BTreeMap;

use crate::domain::model::*;

/// Scene segmentation policies
pub struct SceneRules;

impl SceneRules {
    /// Confidence attached to every detector-reported boundary
    pub const DETECTED_CONFIDENCE: f64 = 0.8;
    /// Confidence attached to every duration-estimated boundary
    pub const ESTIMATED_CONFIDENCE: f64 = 0.5;
    /// Videos up to this length are treated as a single scene
    pub const SINGLE_SCENE_MAX_SECS: f64 = 30.0;
    /// Videos up to this length get one boundary in the middle
    pub const SPLIT_SCENE_MAX_SECS: f64 = 120.0;
    /// Target scene length for long videos
    pub const TARGET_SCENE_SECS: f64 = 30.0;
    pub const MAX_ESTIMATED_SCENES: usize = 10;
    pub const MAX_KEY_MOMENTS: usize = 5;
    /// Offset into a scene, as a fraction of the average scene length
    pub const KEY_MOMENT_OFFSET: f64 = 0.3;

    /// Duration-based boundaries used when detection yields nothing
    pub fn fallback_boundaries(duration: f64) -> Vec<f64> {
        if !duration.is_finite() || duration <= Self::SINGLE_SCENE_MAX_SECS {
            Vec::new()
        } else if duration <= Self::SPLIT_SCENE_MAX_SECS {
            vec![duration / 2.0]
        } else {
            let num_scenes =
                ((duration / Self::TARGET_SCENE_SECS) as usize).min(Self::MAX_ESTIMATED_SCENES);
            (1..num_scenes)
                .map(|i| duration * i as f64 / num_scenes as f64)
                .collect()
        }
    }

    /// Points just past the first boundaries, inside stable scene content.
    ///
    /// Moments that would land at or past the end of the video are dropped; if
    /// none remain, a single early moment is used.
    pub fn key_moments(boundaries: &[f64], average_scene_length: f64, duration: f64) -> Vec<f64> {
        let moments: Vec<f64> = boundaries
            .iter()
            .take(Self::MAX_KEY_MOMENTS)
            .map(|boundary| boundary + average_scene_length * Self::KEY_MOMENT_OFFSET)
            .filter(|moment| *moment < duration)
            .collect();

        if moments.is_empty() {
            vec![Self::opening_moment(duration)]
        } else {
            moments
        }
    }

    /// Key moment for a video without usable boundaries
    pub fn opening_moment(duration: f64) -> f64 {
        (duration * 0.2).min(10.0).max(0.0)
    }
}

/// Quality scoring policies
pub struct QualityRules;

impl QualityRules {
    pub const SHARPNESS_WEIGHT: f64 = 0.3;
    pub const BRIGHTNESS_WEIGHT: f64 = 0.2;
    pub const CONTRAST_WEIGHT: f64 = 0.3;
    pub const NOISE_WEIGHT: f64 = 0.2;

    /// Weighted combination; brightness scores best at mid-gray (0.5)
    pub fn overall_score(sharpness: f64, brightness: f64, contrast: f64, noise: f64) -> f64 {
        sharpness * Self::SHARPNESS_WEIGHT
            + (1.0 - (brightness - 0.5).abs() * 2.0) * Self::BRIGHTNESS_WEIGHT
            + contrast * Self::CONTRAST_WEIGHT
            + (1.0 - noise) * Self::NOISE_WEIGHT
    }
}

/// Motion intensity policies
pub struct MotionRules;

impl MotionRules {
    /// Frame reports that saturate the intensity scale
    pub const SATURATION_FRAMES: f64 = 100.0;
    /// Intensity above which a video counts as moving
    pub const MOTION_THRESHOLD: f64 = 0.1;

    pub fn intensity(processed_frames: usize) -> f64 {
        (processed_frames as f64 / Self::SATURATION_FRAMES).min(1.0)
    }

    pub fn has_motion(intensity: f64) -> bool {
        intensity > Self::MOTION_THRESHOLD
    }
}

/// 360° (spherical projection) detection over probe metadata
pub struct SphericalDetector;

impl SphericalDetector {
    /// Tag-name fragments that mark spherical metadata (matched case-insensitively)
    pub const TAG_INDICATORS: [&'static str; 5] = [
        "Spherical",
        "spherical-video",
        "SphericalVideo",
        "ProjectionType",
        "projection_type",
    ];
    pub const MIN_EQUIRECT_RATIO: f64 = 1.9;
    pub const MAX_EQUIRECT_RATIO: f64 = 2.1;

    /// Best-effort detection: tags first, then the 2:1 equirectangular heuristic
    pub fn detect(report: &ProbeReport) -> bool {
        if Self::has_spherical_tag(&report.format.tags) {
            return true;
        }

        let Some(stream) = report.first_video_stream() else {
            return false;
        };
        match (stream.width, stream.height) {
            (Some(width), Some(height)) => Self::is_equirectangular(width, height),
            _ => false,
        }
    }

    /// Whether any tag key contains a spherical indicator
    pub fn has_spherical_tag(tags: &BTreeMap<String, String>) -> bool {
        tags.keys().any(|key| {
            let key = key.to_lowercase();
            Self::TAG_INDICATORS
                .iter()
                .any(|indicator| key.contains(&indicator.to_lowercase()))
        })
    }

    pub fn is_equirectangular(width: u32, height: u32) -> bool {
        if height == 0 {
            return false;
        }
        let aspect_ratio = width as f64 / height as f64;
        (Self::MIN_EQUIRECT_RATIO..=Self::MAX_EQUIRECT_RATIO).contains(&aspect_ratio)
    }
}

/// Thumbnail timestamp recommendation
pub struct ThumbnailRecommender;

impl ThumbnailRecommender {
    pub const MAX_RECOMMENDATIONS: usize = 5;
    pub const SCENE_CANDIDATES: usize = 3;

    /// Fuse scene key moments with quality into an ordered, de-duplicated list
    pub fn recommend(scenes: &SceneAnalysis, quality: &QualityMetrics, duration: f64) -> Vec<f64> {
        let mut recommendations: Vec<f64> = scenes
            .key_moments()
            .iter()
            .take(Self::SCENE_CANDIDATES)
            .copied()
            .collect();

        if duration > 30.0 && quality.overall() > 0.5 {
            recommendations.push((duration * 0.1).min(5.0));
        }
        if duration > 60.0 {
            recommendations.push(duration / 2.0);
        }

        recommendations.sort_by(f64::total_cmp);
        recommendations.dedup();
        recommendations.truncate(Self::MAX_RECOMMENDATIONS);
        recommendations
    }
}

#[cfg(test)]
mod tests;
