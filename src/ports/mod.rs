// Ports - Contracts for the external collaborators the analyzer consumes

use std::path::Path;

use async_trait::async_trait;
use image::GrayImage;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for container/stream metadata probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file once; any failure is reported as `ProbeFail` or `FileNotFound`
    async fn probe(&self, file_path: &Path) -> Result<ProbeReport, DomainError>;
}

/// Port for the content-change (scene cut) filter
#[async_trait]
pub trait SceneFilterPort: Send + Sync {
    /// Run the detector over the whole file and return its diagnostic output.
    ///
    /// Lines reporting a change carry a `pts_time:<seconds>` token.
    async fn detect_changes(&self, file_path: &Path, threshold: f64) -> Result<String, DomainError>;
}

/// Port for the motion-estimation filter
#[async_trait]
pub trait MotionFilterPort: Send + Sync {
    /// Run motion estimation over the first `window_secs` seconds and return its diagnostic output
    async fn estimate_motion(&self, file_path: &Path, window_secs: f64)
        -> Result<String, DomainError>;
}

/// Port for decoded frame access.
///
/// Blocking; callers run it off the async scheduler.
pub trait FrameSamplerPort: Send + Sync {
    /// Acquire a capture handle for the file
    fn open(&self, file_path: &Path) -> Result<Box<dyn FrameCapture>, DomainError>;
}

/// An open capture. The underlying decoder is released when the handle is dropped.
pub trait FrameCapture {
    /// Seek to `timestamp` seconds and return the luminance plane of the frame there
    fn read_at(&mut self, timestamp: f64) -> Option<GrayImage>;

    /// Release the capture now instead of at end of scope
    fn release(self: Box<Self>) {}
}
