//! Common utilities and helpers

pub mod logging;
pub mod path;
pub mod time;

pub use path::collect_video_files;
pub use time::format_timestamp;
