//! FFmpeg filter adapter
//!
//! Runs diagnostic-only filter graphs (`-f null -`) and hands back the
//! `showinfo` report that ffmpeg writes to stderr.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFmpeg-based scene and motion filter adapter
pub struct FfmpegFilterAdapter {
    ffmpeg_path: PathBuf,
}

impl FfmpegFilterAdapter {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Arguments for the content-change detector
    pub fn scene_args(file_path: &Path, threshold: f64) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-nostats".into(), "-i".into()];
        args.push(file_path.as_os_str().to_owned());
        args.push("-vf".into());
        args.push(format!("select='gt(scene,{})',showinfo", threshold).into());
        args.extend(["-f".into(), "null".into(), "-".into()]);
        args
    }

    /// Arguments for motion estimation over the first `window_secs` seconds
    pub fn motion_args(file_path: &Path, window_secs: f64) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostats".into(),
            "-t".into(),
            format!("{}", window_secs).into(),
            "-i".into(),
        ];
        args.push(file_path.as_os_str().to_owned());
        args.extend([
            "-vf".into(),
            "mestimate,showinfo".into(),
            "-f".into(),
            "null".into(),
            "-".into(),
        ]);
        args
    }

    /// Run ffmpeg to completion and return its stderr
    async fn run(&self, args: Vec<OsString>) -> Result<String, DomainError> {
        debug!("Running {} {:?}", self.ffmpeg_path.display(), args);
        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::FilterFail(format!(
                    "Failed to run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            let tail: Vec<&str> = stderr.lines().rev().take(3).collect();
            return Err(DomainError::FilterFail(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            )));
        }
        Ok(stderr)
    }
}

#[async_trait]
impl SceneFilterPort for FfmpegFilterAdapter {
    async fn detect_changes(&self, file_path: &Path, threshold: f64) -> Result<String, DomainError> {
        self.run(Self::scene_args(file_path, threshold)).await
    }
}

#[async_trait]
impl MotionFilterPort for FfmpegFilterAdapter {
    async fn estimate_motion(
        &self,
        file_path: &Path,
        window_secs: f64,
    ) -> Result<String, DomainError> {
        self.run(Self::motion_args(file_path, window_secs)).await
    }
}
