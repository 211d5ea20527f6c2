use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::{FfmpegFilterAdapter, FfprobeAdapter, LibavFrameSampler};
use crate::app::analyze_interactor::{AnalyzerPorts, ContentAnalyzer};
use crate::config::AnalyzerConfig;
use crate::ports::{FrameSamplerPort, MotionFilterPort, ProbePort, SceneFilterPort};

pub trait AppContainer: Send + Sync {
    fn analyze_interactor(&self) -> Arc<ContentAnalyzer>;
}

pub struct DefaultAppContainer {
    analyze_interactor: Arc<ContentAnalyzer>,
}

impl DefaultAppContainer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            analyze_interactor: Arc::new(ContentAnalyzer::new(
                build_ports(config),
                &config.analysis,
            )),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn analyze_interactor(&self) -> Arc<ContentAnalyzer> {
        Arc::clone(&self.analyze_interactor)
    }
}

/// Wire the production adapters for `config`.
///
/// Frame sampling is left out when disabled or when libav fails to initialize.
pub fn build_ports(config: &AnalyzerConfig) -> AnalyzerPorts {
    let probe_port = Arc::new(FfprobeAdapter::new(&config.tools.ffprobe_path));
    let filter_port = Arc::new(FfmpegFilterAdapter::new(&config.tools.ffmpeg_path));

    let frame_sampler = if config.analysis.enable_frame_sampling {
        match LibavFrameSampler::new() {
            Ok(sampler) => Some(Arc::new(sampler) as Arc<dyn FrameSamplerPort>),
            Err(e) => {
                warn!(error = %e, "Frame sampling disabled");
                None
            }
        }
    } else {
        debug!("Frame sampling disabled by configuration");
        None
    };

    AnalyzerPorts {
        probe: probe_port as Arc<dyn ProbePort>,
        scene_filter: Arc::clone(&filter_port) as Arc<dyn SceneFilterPort>,
        motion_filter: filter_port as Arc<dyn MotionFilterPort>,
        frame_sampler,
    }
}

impl ContentAnalyzer {
    /// Build an analyzer over the production adapters
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        ContentAnalyzer::new(build_ports(config), &config.analysis)
    }
}
