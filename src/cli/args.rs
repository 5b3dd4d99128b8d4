//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input video file
    #[arg(short, long)]
    pub input: String,

    /// Start time (HH:MM:SS.mmm, seconds, or frames like 150f)
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<String>,

    /// End time
    #[arg(short, long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to clips JSON file (for batch extraction)
    #[arg(long)]
    pub clips: Option<PathBuf>,

    /// Extraction strategy: keyframe-only, smart-copy, re-encode
    #[arg(long)]
    pub strategy: Option<String>,

    /// Save report to JSON file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the thumbnail command
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Input video file
    #[arg(short, long)]
    pub input: String,

    /// Timestamp (HH:MM:SS.mmm, seconds, or frames)
    #[arg(short, long, allow_hyphen_values = true)]
    pub time: String,

    /// Output image file
    #[arg(short, long)]
    pub output: String,
}
