//! Analysis steps
//!
//! Each step absorbs its own collaborator failures and returns a well-formed
//! value, so only metadata probing can abort an analysis.

pub mod luma;
pub mod motion;
pub mod quality;
pub mod scenes;
pub mod showinfo;

pub use motion::MotionEstimator;
pub use quality::QualityAssessor;
pub use scenes::SceneSegmenter;
