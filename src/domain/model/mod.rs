// Domain models - Core types and data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Immutable snapshot of a source video, produced once per run by the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub file: String,
    /// Duration in seconds
    pub duration: f64,
    /// Frames per second
    pub framerate: f64,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    /// Typical GOP length in seconds, present once keyframes were scanned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframe_interval: Option<f64>,
}

impl VideoInfo {
    /// Attach the estimated keyframe interval
    pub fn with_keyframe_interval(mut self, interval: f64) -> Self {
        self.keyframe_interval = Some(interval);
        self
    }
}

/// Non-empty, ascending keyframe timestamps in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSet(Vec<f64>);

impl KeyframeSet {
    /// Build a keyframe set, sorting the timestamps.
    ///
    /// An empty list is not a valid set: strategies that need keyframes
    /// must see `None` and fail instead.
    pub fn new(mut timestamps: Vec<f64>) -> Option<Self> {
        if timestamps.is_empty() {
            return None;
        }
        timestamps.sort_by(|a, b| a.total_cmp(b));
        Some(Self(timestamps))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cutting strategy tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// Snap both ends to the nearest keyframe, stream copy
    KeyframeOnly,
    /// Snap start back to a keyframe, stream copy to the requested end
    SmartCopy,
    /// Frame-accurate decode and encode
    ReEncode,
}

impl ExtractionStrategy {
    pub const DEFAULT_TAG: &'static str = "smart-copy";

    /// Parse a strategy tag
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        match tag.trim() {
            "keyframe-only" => Ok(ExtractionStrategy::KeyframeOnly),
            "smart-copy" => Ok(ExtractionStrategy::SmartCopy),
            "re-encode" => Ok(ExtractionStrategy::ReEncode),
            other => Err(DomainError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ExtractionStrategy::KeyframeOnly => "keyframe-only",
            ExtractionStrategy::SmartCopy => "smart-copy",
            ExtractionStrategy::ReEncode => "re-encode",
        }
    }

    /// Whether the strategy cannot run without a keyframe set
    pub fn requires_keyframes(&self) -> bool {
        !matches!(self, ExtractionStrategy::ReEncode)
    }
}

impl Default for ExtractionStrategy {
    fn default() -> Self {
        ExtractionStrategy::SmartCopy
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A requested cut, as supplied by the caller or the batch document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRequest {
    pub start: String,
    pub end: String,
    pub output: String,
    /// Per-clip strategy tag; the batch default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl ClipRequest {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            output: output.into(),
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Strategy tag in effect for this clip
    pub fn effective_strategy<'a>(&'a self, default: &'a str) -> &'a str {
        self.strategy.as_deref().unwrap_or(default)
    }
}

/// Outcome of one clip request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipResult {
    pub requested_start: String,
    pub requested_end: String,
    pub actual_start: String,
    pub actual_end: String,
    pub strategy: ExtractionStrategy,
    pub frames_included: i64,
    pub is_re_encoded: bool,
    pub processing_time_ms: u64,
    pub output: String,
}

/// Terminal artifact of one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: VideoInfo,
    pub clips: Vec<ClipResult>,
    pub total_processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
}
