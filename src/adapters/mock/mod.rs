//! In-memory adapters for exercising the planner without ffmpeg installed

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::errors::*;
use crate::ports::*;

/// Probe adapter answering from canned JSON documents
#[derive(Default)]
pub struct MockProbeAdapter {
    responses: HashMap<ProbeQuery, String>,
    calls: Mutex<Vec<ProbeQuery>>,
}

impl MockProbeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned answers for a single-video-stream source
    pub fn for_video(
        width: u32,
        height: u32,
        codec: &str,
        r_frame_rate: &str,
        duration: f64,
        keyframes: &[f64],
    ) -> Self {
        let stream = json!({
            "programs": [],
            "streams": [{
                "codec_name": codec,
                "width": width,
                "height": height,
                "r_frame_rate": r_frame_rate,
                "duration": format!("{:.6}", duration),
            }]
        });
        let format = json!({ "format": { "duration": format!("{:.6}", duration) } });

        Self::new()
            .with_response(ProbeQuery::VideoStream, stream.to_string())
            .with_response(ProbeQuery::Format, format.to_string())
            .with_keyframes(keyframes)
    }

    /// Frame listing in which exactly `keyframes` are flagged, with a
    /// non-key frame between each pair
    pub fn with_keyframes(self, keyframes: &[f64]) -> Self {
        let mut frames = Vec::new();
        for &k in keyframes {
            frames.push(json!({ "key_frame": 1, "pkt_pts_time": format!("{:.6}", k) }));
            frames.push(json!({ "key_frame": 0, "pkt_pts_time": format!("{:.6}", k + 0.01) }));
        }
        self.with_response(ProbeQuery::Frames, json!({ "frames": frames }).to_string())
    }

    pub fn with_response(mut self, query: ProbeQuery, body: impl Into<String>) -> Self {
        self.responses.insert(query, body.into());
        self
    }

    /// Number of times a query was issued
    pub fn calls(&self, query: ProbeQuery) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|&&q| q == query).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ProbePort for MockProbeAdapter {
    async fn probe(&self, _file_path: &str, query: ProbeQuery) -> Result<String, DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query);
        }
        self.responses
            .get(&query)
            .cloned()
            .ok_or_else(|| DomainError::ExternalEngineFailure {
                engine: "ffprobe".to_string(),
                message: format!("no canned response for {:?}", query),
            })
    }
}

/// Execution adapter recording every argument list it receives
#[derive(Default)]
pub struct MockExecuteAdapter {
    invocations: Mutex<Vec<Vec<String>>>,
    fail_on_call: Option<usize>,
}

impl MockExecuteAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th invocation (zero based) with an engine diagnostic
    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Argument lists received so far, in order
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExecutePort for MockExecuteAdapter {
    async fn execute(&self, args: &[String]) -> Result<(), DomainError> {
        let mut invocations = self
            .invocations
            .lock()
            .map_err(|e| DomainError::ExternalEngineFailure {
                engine: "ffmpeg".to_string(),
                message: e.to_string(),
            })?;
        let index = invocations.len();
        invocations.push(args.to_vec());

        if self.fail_on_call == Some(index) {
            return Err(DomainError::ExternalEngineFailure {
                engine: "ffmpeg".to_string(),
                message: "Conversion failed!".to_string(),
            });
        }
        Ok(())
    }
}
