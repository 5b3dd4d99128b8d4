// Application layer - Use case interactors

pub mod analyzer;
pub mod clip_interactor;
pub mod container;

// Re-export interactors
pub use analyzer::VideoAnalyzer;
pub use clip_interactor::ClipInteractor;
pub use container::{AppContainer, DefaultAppContainer};
