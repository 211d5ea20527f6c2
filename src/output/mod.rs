//! Analysis report rendering

use std::fmt::Write as _;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::model::{ContentAnalysis, SceneOrigin};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::utils::format_timestamp;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

/// One analyzed file as it appears in structured reports
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<&'a ContentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> FileReport<'a> {
    pub fn new(path: &Path, result: &'a AnalyzerResult<ContentAnalysis>) -> Self {
        match result {
            Ok(analysis) => Self {
                path: path.display().to_string(),
                analysis: Some(analysis),
                error: None,
            },
            Err(e) => Self {
                path: path.display().to_string(),
                analysis: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Render a set of per-file results in the requested format
pub fn render_reports(reports: &[FileReport<'_>], format: ReportFormat) -> AnalyzerResult<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(reports).map_err(|e| AnalyzerError::ReportError {
            message: format!("JSON serialization failed: {}", e),
        }),
        ReportFormat::Yaml => serde_yaml::to_string(reports).map_err(|e| AnalyzerError::ReportError {
            message: format!("YAML serialization failed: {}", e),
        }),
        ReportFormat::Text => {
            let mut output = String::new();
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                match (&report.analysis, &report.error) {
                    (Some(analysis), _) => output.push_str(&format_as_text(&report.path, analysis)),
                    (None, Some(error)) => {
                        let _ = writeln!(output, "{}: analysis failed: {}", report.path, error);
                    }
                    (None, None) => {}
                }
            }
            Ok(output)
        }
    }
}

/// Format one analysis as a human-readable summary
pub fn format_as_text(path: &str, analysis: &ContentAnalysis) -> String {
    let mut output = String::new();
    let scenes = analysis.scenes();
    let quality = analysis.quality_metrics();
    let origin = match scenes.origin() {
        SceneOrigin::Detected => "detected",
        SceneOrigin::Estimated => "estimated",
    };

    let _ = writeln!(output, "Content Analysis: {}", path);
    let _ = writeln!(
        output,
        "  Duration: {:.3}s ({})",
        analysis.duration(),
        format_timestamp(analysis.duration())
    );
    let _ = writeln!(output, "  Resolution: {}", analysis.resolution());
    let _ = writeln!(output, "  360 video: {}", yes_no(analysis.is_360_video()));

    let _ = writeln!(output, "\nScenes ({}, {}):", scenes.scene_count(), origin);
    let _ = writeln!(output, "  Average length: {:.2}s", scenes.average_scene_length());
    if !scenes.scene_boundaries().is_empty() {
        let _ = writeln!(output, "  Boundaries: {}", timestamps(scenes.scene_boundaries()));
    }
    let _ = writeln!(output, "  Key moments: {}", timestamps(scenes.key_moments()));

    let _ = writeln!(output, "\nQuality:");
    let _ = writeln!(
        output,
        "  Sharpness {:.2}, Brightness {:.2}, Contrast {:.2}, Noise {:.2}",
        quality.sharpness(),
        quality.brightness(),
        quality.contrast(),
        quality.noise()
    );
    let _ = writeln!(output, "  Overall: {:.2}", quality.overall());

    let _ = writeln!(
        output,
        "\nMotion: {} (intensity {:.2})",
        yes_no(analysis.has_motion()),
        analysis.motion_intensity()
    );
    let _ = writeln!(
        output,
        "Recommended thumbnails: {}",
        timestamps(analysis.recommended_thumbnails())
    );
    output
}

fn timestamps(values: &[f64]) -> String {
    if values.is_empty() {
        return "none".to_string();
    }
    values
        .iter()
        .map(|t| format_timestamp(*t))
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::*;
    use crate::domain::rules::ThumbnailRecommender;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample() -> ContentAnalysis {
        let descriptor =
            StreamDescriptor::new(1920, 1080, 90.0, CodecType::Video, BTreeMap::new()).unwrap();
        let scenes = SceneAnalysis::estimated(90.0);
        let quality = QualityMetrics::fallback();
        let thumbnails = ThumbnailRecommender::recommend(&scenes, &quality, 90.0);
        ContentAnalysis::new(&descriptor, scenes, quality, MotionEstimate::fallback(), false, thumbnails)
    }

    #[test]
    fn test_text_report() {
        let text = format_as_text("clip.mp4", &sample());
        assert!(text.contains("Content Analysis: clip.mp4"));
        assert!(text.contains("Resolution: 1920x1080"));
        assert!(text.contains("Scenes (2, estimated)"));
        assert!(text.contains("Boundaries: 00:45.000"));
        assert!(text.contains("Overall: 0.60"));
        assert!(text.contains("Motion: yes (intensity 0.50)"));
    }

    #[test]
    fn test_json_report_fields() {
        let analysis: AnalyzerResult<ContentAnalysis> = Ok(sample());
        let failed: AnalyzerResult<ContentAnalysis> = Err(AnalyzerError::InputFileNotFound {
            path: "gone.mp4".to_string(),
        });
        let reports = vec![
            FileReport::new(&PathBuf::from("clip.mp4"), &analysis),
            FileReport::new(&PathBuf::from("gone.mp4"), &failed),
        ];

        let json = render_reports(&reports, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0]["analysis"];
        assert_eq!(first["duration"], 90.0);
        assert_eq!(first["resolution"]["width"], 1920);
        assert_eq!(first["scenes"]["scene_count"], 2);
        assert_eq!(first["quality_metrics"]["overall"], 0.6);
        assert_eq!(first["is_360_video"], false);
        assert!(value[0].get("error").is_none());
        assert!(value[1]["error"].as_str().unwrap().contains("gone.mp4"));
    }

    #[test]
    fn test_yaml_and_text_render_errors() {
        let failed: AnalyzerResult<ContentAnalysis> = Err(AnalyzerError::NoVideoStream {
            path: "song.m4a".to_string(),
        });
        let reports = vec![FileReport::new(Path::new("song.m4a"), &failed)];

        let yaml = render_reports(&reports, ReportFormat::Yaml).unwrap();
        assert!(yaml.contains("path: song.m4a"));
        let text = render_reports(&reports, ReportFormat::Text).unwrap();
        assert!(text.starts_with("song.m4a: analysis failed: No video stream found"));
    }
}
