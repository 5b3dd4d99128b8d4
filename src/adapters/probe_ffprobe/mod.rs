//! FFprobe adapter for media file probing
//!
//! Runs the `ffprobe` binary with JSON output and hands the document back
//! unparsed; interpretation belongs to the analyzer.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

const ENGINE: &str = "ffprobe";

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given binary path
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Full argument list for a query
    pub fn build_args(file_path: &str, query: ProbeQuery) -> Vec<String> {
        let mut args = vec!["-v".to_string(), "error".to_string()];
        args.extend(query.selection_args().iter().map(|s| s.to_string()));
        args.extend(["-of".to_string(), "json".to_string()]);
        args.push(file_path.to_string());
        args
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new(ENGINE)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe(&self, file_path: &str, query: ProbeQuery) -> Result<String, DomainError> {
        let args = Self::build_args(file_path, query);
        debug!(binary = %self.binary, ?args, "running ffprobe");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| DomainError::ExternalEngineFailure {
                engine: ENGINE.to_string(),
                message: format!("could not spawn {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(DomainError::ExternalEngineFailure {
                engine: ENGINE.to_string(),
                message: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
