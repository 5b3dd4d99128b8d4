use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, FavcConfig};
use crate::app::clip_interactor::ClipInteractor;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
}

impl DefaultAppContainer {
    /// Wire the external-tool adapters named by the configuration
    pub fn from_config(config: &FavcConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe_path.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone()));

        Self::with_ports(probe_port, execute_port)
    }

    pub fn with_ports(probe_port: Arc<dyn ProbePort>, execute_port: Arc<dyn ExecutePort>) -> Self {
        Self {
            clip_interactor: Arc::new(ClipInteractor::new(probe_port, execute_port)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }
}
