// Video analyzer - Interprets inspection service output

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::KeyframeRules;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct StreamDocument {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    codec_name: Option<String>,
    /// e.g. "30/1" or "24000/1001"
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormatDocument {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FrameDocument {
    #[serde(default)]
    frames: Vec<ProbeFrame>,
}

#[derive(Debug, Deserialize)]
struct ProbeFrame {
    key_frame: Option<i64>,
    pkt_pts_time: Option<String>,
    /// Newer ffprobe releases only emit this one
    pts_time: Option<String>,
}

impl ProbeFrame {
    fn timestamp(&self) -> Option<f64> {
        self.pkt_pts_time
            .as_deref()
            .or(self.pts_time.as_deref())
            .and_then(parse_seconds)
    }
}

fn parse_seconds(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_document<'a, T: Deserialize<'a>>(body: &'a str, what: &str) -> Result<T, DomainError> {
    serde_json::from_str(body)
        .map_err(|e| DomainError::BadProbeOutput(format!("{} query: {}", what, e)))
}

/// Analyzer for source video metadata and keyframes
pub struct VideoAnalyzer {
    probe_port: Arc<dyn ProbePort>,
}

impl VideoAnalyzer {
    /// Create new analyzer with injected probe port
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Metadata of the first video stream
    pub async fn analyze(&self, file_path: &str) -> Result<VideoInfo, DomainError> {
        let stream_body = self
            .probe_port
            .probe(file_path, ProbeQuery::VideoStream)
            .await?;
        let streams: StreamDocument = parse_document(&stream_body, "stream")?;
        let stream = streams
            .streams
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NoVideoStream(file_path.to_string()))?;

        let framerate = Self::parse_frame_rate(stream.r_frame_rate.as_deref())?;

        let format_body = self.probe_port.probe(file_path, ProbeQuery::Format).await?;
        let format: FormatDocument = parse_document(&format_body, "format")?;

        let duration = stream
            .duration
            .as_deref()
            .and_then(parse_seconds)
            .or_else(|| {
                format
                    .format
                    .and_then(|f| f.duration)
                    .as_deref()
                    .and_then(parse_seconds)
            })
            .ok_or_else(|| {
                DomainError::BadProbeOutput(format!("no duration reported for {}", file_path))
            })?;

        let info = VideoInfo {
            file: file_path.to_string(),
            duration,
            framerate,
            width: stream.width.unwrap_or_default(),
            height: stream.height.unwrap_or_default(),
            codec: stream.codec_name.unwrap_or_else(|| "unknown".to_string()),
            keyframe_interval: None,
        };
        debug!(?info, "analyzed source");
        Ok(info)
    }

    /// Frame rate from a rational `num/den` string; a zero or missing
    /// denominator counts as 1
    pub fn parse_frame_rate(rate: Option<&str>) -> Result<f64, DomainError> {
        let rate = rate
            .ok_or_else(|| DomainError::BadProbeOutput("missing r_frame_rate".to_string()))?;
        let mut parts = rate.trim().splitn(2, '/');

        let num: f64 = parts
            .next()
            .and_then(parse_seconds)
            .ok_or_else(|| DomainError::BadProbeOutput(format!("invalid frame rate {}", rate)))?;
        let den = parts
            .next()
            .and_then(parse_seconds)
            .filter(|&d| d != 0.0)
            .unwrap_or(1.0);

        Ok(num / den)
    }

    /// Sorted timestamps of every keyframe in the first video stream.
    ///
    /// Scans the whole stream; call it at most once per run.
    pub async fn get_keyframes(&self, file_path: &str) -> Result<Vec<f64>, DomainError> {
        let body = self.probe_port.probe(file_path, ProbeQuery::Frames).await?;
        let document: FrameDocument = parse_document(&body, "frame")?;

        let mut keyframes: Vec<f64> = document
            .frames
            .iter()
            .filter(|f| f.key_frame == Some(1))
            .filter_map(ProbeFrame::timestamp)
            .collect();
        keyframes.sort_by(|a, b| a.total_cmp(b));

        info!("Found {} keyframes", keyframes.len());
        Ok(keyframes)
    }

    /// Largest keyframe at or before `timestamp`, or 0
    pub fn find_previous_keyframe(timestamp: f64, keyframes: &[f64]) -> f64 {
        KeyframeRules::find_previous_keyframe(timestamp, keyframes)
    }

    /// Median GOP length estimate, 2.0 when it cannot be measured
    pub fn estimate_keyframe_interval(keyframes: &[f64]) -> f64 {
        KeyframeRules::estimate_keyframe_interval(keyframes)
    }
}
