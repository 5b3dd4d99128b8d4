//! CLI module for FAVC
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::LogFormat;

pub mod args;
pub mod commands;

/// Frame-Accurate Video Clipper
///
/// Plans keyframe-aware cuts and drives ffmpeg to extract clips and stills.
#[derive(Parser, Debug)]
#[command(name = "favc")]
#[command(about = "Frame-Accurate Video Clipper - Extract clips with precision")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one or more clips from a video
    Extract(args::ExtractArgs),
    /// Extract a single frame as thumbnail
    Thumbnail(args::ThumbnailArgs),
}

impl Commands {
    /// Strategy given on the command line, if this command takes one
    pub fn strategy_override(&self) -> Option<&str> {
        match self {
            Commands::Extract(args) => args.strategy.as_deref(),
            Commands::Thumbnail(_) => None,
        }
    }
}
