//! Cut planning: turns a validated window into engine instructions

use serde::{Deserialize, Serialize};

use crate::domain::model::{ExtractionStrategy, KeyframeSet, VideoInfo};

pub mod strategy;

pub use strategy::{
    KeyframeOnlyStrategy, PlanCut, ReEncodeStrategy, SmartCopyStrategy,
    REENCODE_FALLBACK_LEAD_SECONDS,
};

/// Inputs shared by every strategy for one clip
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    pub video: &'a VideoInfo,
    /// Requested start in seconds
    pub start: f64,
    /// Requested end in seconds
    pub end: f64,
    pub output: &'a str,
    /// Keyframes of the source, when they were scanned for this run
    pub keyframes: Option<&'a KeyframeSet>,
}

/// How the video stream is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecMode {
    /// Decode-free copy of every stream
    StreamCopy,
    /// Encode video with a fixed x264 preset, pass audio through
    ReEncode,
}

/// Engine instructions for a single clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    pub strategy: ExtractionStrategy,
    pub input: String,
    pub output: String,
    /// Coarse input-side seek
    pub seek: f64,
    /// Precise output-side seek applied after decoding starts
    pub trim_offset: Option<f64>,
    /// Length of the written span
    pub duration: f64,
    pub codec: CodecMode,
    /// Boundaries the output actually covers, as reported to the caller
    pub actual_start: f64,
    pub actual_end: f64,
}

impl CutPlan {
    /// Ordered argument list for the transcoding engine
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-ss".to_string(),
            self.seek.to_string(),
            "-i".to_string(),
            self.input.clone(),
        ];

        if let Some(offset) = self.trim_offset {
            args.push("-ss".to_string());
            args.push(offset.to_string());
        }

        args.push("-t".to_string());
        args.push(self.duration.to_string());

        match self.codec {
            CodecMode::StreamCopy => {
                args.extend(
                    ["-c", "copy", "-avoid_negative_ts", "1"]
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            CodecMode::ReEncode => {
                args.extend(
                    [
                        "-c:v",
                        strategy::REENCODE_VIDEO_CODEC,
                        "-preset",
                        strategy::REENCODE_PRESET,
                        "-crf",
                        strategy::REENCODE_CRF,
                        "-c:a",
                        "copy",
                    ]
                    .iter()
                    .map(|s| s.to_string()),
                );
            }
        }

        args.push("-y".to_string());
        args.push(self.output.clone());
        args
    }

    /// Frames covered by the reported span at the source frame rate
    pub fn frames_included(&self, framerate: f64) -> i64 {
        ((self.actual_end - self.actual_start) * framerate).round() as i64
    }
}

/// Engine arguments for a single high-quality still frame
pub fn thumbnail_args(input: &str, seconds: f64, output: &str) -> Vec<String> {
    vec![
        "-ss".to_string(),
        seconds.to_string(),
        "-i".to_string(),
        input.to_string(),
        "-vframes".to_string(),
        "1".to_string(),
        "-q:v".to_string(),
        "2".to_string(),
        "-y".to_string(),
        output.to_string(),
    ]
}
