//! Command implementations

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::adapters::FavcConfig;
use crate::app::AppContainer;
use crate::cli::args::{ExtractArgs, ThumbnailArgs};
use crate::domain::model::ClipRequest;
use crate::error::{FavcError, FavcResult};
use crate::output::ReportWriter;
use crate::utils::{format_elapsed, path};

/// Execute the extract command
pub async fn extract(
    container: &dyn AppContainer,
    args: ExtractArgs,
    config: &FavcConfig,
) -> FavcResult<()> {
    let started = Instant::now();

    path::validate_video_file(&args.input)?;
    let requests = build_requests(&args, &config.default_strategy)?;
    debug!(?requests, "clip requests");

    let report = container
        .clip_interactor()
        .extract_clips(&args.input, &requests, &config.default_strategy)
        .await?;

    info!(
        "Done! Processed {} clip(s) in {}",
        report.clips.len(),
        format_elapsed(started.elapsed())
    );

    if let Some(report_path) = &args.report {
        ReportWriter::new().write_report(&report, report_path)?;
    }

    Ok(())
}

/// Execute the thumbnail command
pub async fn thumbnail(container: &dyn AppContainer, args: ThumbnailArgs) -> FavcResult<()> {
    path::ensure_exists(&args.input)?;

    container
        .clip_interactor()
        .extract_thumbnail(&args.input, &args.time, &args.output)
        .await?;
    Ok(())
}

/// Requests for this run: the batch file when given, else the single-clip flags
pub fn build_requests(args: &ExtractArgs, strategy: &str) -> FavcResult<Vec<ClipRequest>> {
    if let Some(clips_path) = &args.clips {
        return load_clips_file(clips_path);
    }

    match (&args.start, &args.end, &args.output) {
        (Some(start), Some(end), Some(output)) => Ok(vec![ClipRequest::new(
            start.as_str(),
            end.as_str(),
            output.as_str(),
        )
        .with_strategy(strategy)]),
        _ => Err(FavcError::Usage(
            "Either provide --clips or all of --start, --end, and --output".to_string(),
        )),
    }
}

/// Parse a batch document: a JSON array of clip requests
pub fn load_clips_file(clips_path: &Path) -> FavcResult<Vec<ClipRequest>> {
    let clips_file_error = |message: String| FavcError::ClipsFile {
        path: clips_path.display().to_string(),
        message,
    };

    if !clips_path.exists() {
        return Err(clips_file_error("file does not exist".to_string()));
    }
    let content =
        std::fs::read_to_string(clips_path).map_err(|e| clips_file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| clips_file_error(e.to_string()))
}
