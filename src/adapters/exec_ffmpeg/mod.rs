//! FFmpeg execution adapter
//!
//! Spawns the `ffmpeg` binary with a prepared argument list and waits for it.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

const ENGINE: &str = "ffmpeg";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    binary: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using the given binary path
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new(ENGINE)
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn execute(&self, args: &[String]) -> Result<(), DomainError> {
        debug!(binary = %self.binary, ?args, "running ffmpeg");

        // stdout is unused; ffmpeg reports everything on stderr
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(std::process::Stdio::null())
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

        Ok(())
    }
}
