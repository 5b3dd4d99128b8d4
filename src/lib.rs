//! FAVC - Frame-Accurate Video Clipper Library
//!
//! Plans clip extractions against a source's keyframe layout and drives
//! `ffmpeg`/`ffprobe` to carry them out. Three strategies trade boundary
//! accuracy for speed: keyframe-only, smart-copy and re-encode.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{ClipInteractor, VideoAnalyzer};
pub use domain::errors::{DomainError, TimecodeError};
pub use domain::model::{
    ClipRequest, ClipResult, ExtractionReport, ExtractionStrategy, KeyframeSet, VideoInfo,
};
pub use error::{FavcError, FavcResult};
pub use utils::time::TimecodeParser;
