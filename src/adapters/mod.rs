// Adapters - External system implementations

pub mod filter_ffmpeg;
pub mod probe_ffprobe;
pub mod sampler_libav;
pub mod toml_config;

// Re-export adapters
pub use filter_ffmpeg::FfmpegFilterAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use sampler_libav::LibavFrameSampler;
pub use toml_config::TomlConfigAdapter;
