// Ports - Contracts with the external media engines

use crate::domain::errors::*;
use async_trait::async_trait;

/// Field selection sent to the inspection service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeQuery {
    /// Attributes of the first video stream
    VideoStream,
    /// Container-level duration
    Format,
    /// Keyframe flag and timestamp of every frame in the first video stream
    Frames,
}

impl ProbeQuery {
    /// Selection arguments for this query, placed before the input path
    pub fn selection_args(&self) -> &'static [&'static str] {
        match self {
            ProbeQuery::VideoStream => &[
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,codec_name,r_frame_rate,duration,nb_frames",
            ],
            ProbeQuery::Format => &["-show_entries", "format=duration"],
            ProbeQuery::Frames => &[
                "-select_streams",
                "v:0",
                "-show_entries",
                "frame=pkt_pts_time,pts_time,key_frame",
            ],
        }
    }
}

/// Port for the media inspection service
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Run one inspection query and return the raw JSON document
    async fn probe(&self, file_path: &str, query: ProbeQuery) -> Result<String, DomainError>;
}

/// Port for the media transcoding engine
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run the engine with an ordered argument list; success means the output was produced
    async fn execute(&self, args: &[String]) -> Result<(), DomainError>;
}
