// Application layer - Use case interactors

pub mod analyze_interactor;
pub mod container;

// Re-export interactors
pub use analyze_interactor::{AnalyzerPorts, ContentAnalyzer};
pub use container::{AppContainer, DefaultAppContainer};
