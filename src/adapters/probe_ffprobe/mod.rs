//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` once per file and maps its JSON report onto [`ProbeReport`].
//! ffprobe prints most numbers as strings (`"duration": "12.480000"`), so
//! numeric fields accept either representation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    tags: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    duration: Option<Value>,
}

impl FfprobeAdapter {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Map ffprobe's `-print_format json` output onto a probe report
    pub fn parse_report(json: &str) -> Result<ProbeReport, DomainError> {
        let output: FfprobeOutput = serde_json::from_str(json)
            .map_err(|e| DomainError::ProbeFail(format!("Unreadable ffprobe output: {}", e)))?;

        let format = output
            .format
            .map(|format| FormatInfo {
                duration: format.duration.as_ref().and_then(lenient_f64),
                tags: format
                    .tags
                    .into_iter()
                    .map(|(key, value)| (key, value_to_string(value)))
                    .collect(),
            })
            .unwrap_or_default();

        let streams = output
            .streams
            .into_iter()
            .map(|stream| StreamInfo {
                codec_type: CodecType::parse(stream.codec_type.as_deref().unwrap_or_default()),
                width: stream.width.as_ref().and_then(lenient_u32),
                height: stream.height.as_ref().and_then(lenient_u32),
                duration: stream.duration.as_ref().and_then(lenient_f64),
            })
            .collect();

        Ok(ProbeReport { format, streams })
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, file_path: &Path) -> Result<ProbeReport, DomainError> {
        if !file_path.exists() {
            return Err(DomainError::FileNotFound(file_path.display().to_string()));
        }

        debug!("Probing {} with {}", file_path.display(), self.ffprobe_path.display());
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeFail(format!(
                    "Failed to run {}: {}",
                    self.ffprobe_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe exited with {} for {}",
                output.status,
                file_path.display()
            )));
        }

        Self::parse_report(&String::from_utf8_lossy(&output.stdout))
    }
}

fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
