// Clip interactor - Orchestrates the clip extraction use case

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::app::analyzer::VideoAnalyzer;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RangeValidator;
use crate::planner::{thumbnail_args, PlanCut, StrategyContext};
use crate::ports::*;
use crate::utils::time::TimecodeParser;

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Interactor for clip and thumbnail extraction
pub struct ClipInteractor {
    analyzer: VideoAnalyzer,
    execute_port: Arc<dyn ExecutePort>,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, execute_port: Arc<dyn ExecutePort>) -> Self {
        Self {
            analyzer: VideoAnalyzer::new(probe_port),
            execute_port,
        }
    }

    /// Whether a strategy tag needs the keyframe scan.
    ///
    /// Unrecognized tags count as needing it; they fail later at dispatch.
    fn needs_keyframes(tag: &str) -> bool {
        ExtractionStrategy::parse(tag)
            .map(|strategy| strategy.requires_keyframes())
            .unwrap_or(true)
    }

    /// Extract every requested clip, sequentially and in order.
    ///
    /// The source is analyzed once and keyframes are scanned at most once
    /// for the whole batch. The first failing clip aborts the batch.
    pub async fn extract_clips(
        &self,
        input_file: &str,
        clips: &[ClipRequest],
        default_strategy: &str,
    ) -> Result<ExtractionReport, DomainError> {
        let started = Instant::now();

        info!("Analyzing video...");
        let mut video = self.analyzer.analyze(input_file).await?;
        info!(
            "Video: {}x{} @ {:.2}fps, {:.2}s",
            video.width, video.height, video.framerate, video.duration
        );

        let needs_keyframes = clips
            .iter()
            .any(|clip| Self::needs_keyframes(clip.effective_strategy(default_strategy)));

        let keyframes = if needs_keyframes {
            info!("Extracting keyframe positions (this may take a while)...");
            let timestamps = self.analyzer.get_keyframes(input_file).await?;
            let interval = VideoAnalyzer::estimate_keyframe_interval(&timestamps);
            info!("Average keyframe interval: {:.2}s", interval);
            video = video.with_keyframe_interval(interval);

            let keyframes = KeyframeSet::new(timestamps);
            if keyframes.is_none() {
                warn!("No keyframes reported for {}", input_file);
            }
            keyframes
        } else {
            None
        };

        let mut results = Vec::with_capacity(clips.len());
        for (index, clip) in clips.iter().enumerate() {
            let tag = clip.effective_strategy(default_strategy);
            info!("Processing clip {}/{} ({})...", index + 1, clips.len(), tag);

            let result = self
                .process_clip(&video, keyframes.as_ref(), clip, tag)
                .await?;
            info!(
                "Created {} in {:.1}s",
                result.output,
                result.processing_time_ms as f64 / 1000.0
            );
            results.push(result);
        }

        Ok(ExtractionReport {
            source: video,
            clips: results,
            total_processing_time_ms: elapsed_ms(started),
            generated_at: Utc::now(),
        })
    }

    async fn process_clip(
        &self,
        video: &VideoInfo,
        keyframes: Option<&KeyframeSet>,
        clip: &ClipRequest,
        tag: &str,
    ) -> Result<ClipResult, DomainError> {
        let start = TimecodeParser::parse(&clip.start, video.framerate)?;
        let end = TimecodeParser::parse(&clip.end, video.framerate)?;
        RangeValidator::validate_time_range(clip, start, end, video.duration)?;

        let strategy = ExtractionStrategy::parse(tag)?;
        let ctx = StrategyContext {
            video,
            start,
            end,
            output: &clip.output,
            keyframes,
        };

        let clip_started = Instant::now();
        let plan = strategy.plan_cut(&ctx)?;
        let args = plan.to_args();
        debug!(?args, "engine arguments");
        self.execute_port.execute(&args).await?;
        let processing_time_ms = elapsed_ms(clip_started);

        Ok(ClipResult {
            requested_start: clip.start.clone(),
            requested_end: clip.end.clone(),
            actual_start: TimecodeParser::format(plan.actual_start),
            actual_end: TimecodeParser::format(plan.actual_end),
            strategy,
            frames_included: plan.frames_included(video.framerate),
            is_re_encoded: strategy == ExtractionStrategy::ReEncode,
            processing_time_ms,
            output: clip.output.clone(),
        })
    }

    /// Extract a single still frame at `timestamp`
    pub async fn extract_thumbnail(
        &self,
        input_file: &str,
        timestamp: &str,
        output_path: &str,
    ) -> Result<(), DomainError> {
        let video = self.analyzer.analyze(input_file).await?;
        let seconds = TimecodeParser::parse(timestamp, video.framerate)?;
        RangeValidator::validate_timestamp(timestamp, seconds, video.duration)?;

        self.execute_port
            .execute(&thumbnail_args(input_file, seconds, output_path))
            .await?;
        info!("Thumbnail saved to {}", output_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockExecuteAdapter, MockProbeAdapter};

    fn source(keyframes: &[f64]) -> Arc<MockProbeAdapter> {
        Arc::new(MockProbeAdapter::for_video(
            1920, 1080, "h264", "30/1", 20.0, keyframes,
        ))
    }

    fn interactor(
        probe: &Arc<MockProbeAdapter>,
        engine: &Arc<MockExecuteAdapter>,
    ) -> ClipInteractor {
        ClipInteractor::new(probe.clone(), engine.clone())
    }

    #[tokio::test]
    async fn test_smart_copy_by_default() {
        let probe = source(&[0.0, 1.0, 2.0, 4.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let report = interactor(&probe, &engine)
            .extract_clips(
                "video.mp4",
                &[ClipRequest::new("2", "5", "out.mp4")],
                ExtractionStrategy::DEFAULT_TAG,
            )
            .await
            .unwrap();

        let clip = &report.clips[0];
        assert_eq!(clip.strategy, ExtractionStrategy::SmartCopy);
        assert_eq!(clip.requested_start, "2");
        assert_eq!(clip.actual_start, "00:00:02.000");
        assert_eq!(clip.actual_end, "00:00:05.000");
        assert_eq!(clip.frames_included, 90);
        assert!(!clip.is_re_encoded);
        assert_eq!(clip.output, "out.mp4");
        assert_eq!(report.source.keyframe_interval, Some(1.0));
        assert_eq!(engine.invocations().len(), 1);
    }

    #[tokio::test]
    async fn test_lead_in_counts_toward_frames() {
        let probe = source(&[0.0, 1.0, 2.0, 4.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let report = interactor(&probe, &engine)
            .extract_clips("video.mp4", &[ClipRequest::new("3.5", "5", "out.mp4")], "smart-copy")
            .await
            .unwrap();

        let clip = &report.clips[0];
        assert_eq!(clip.actual_start, "00:00:02.000");
        assert_eq!(clip.frames_included, 90);
    }

    #[tokio::test]
    async fn test_keyframes_scanned_once_per_batch() {
        let probe = source(&[0.0, 2.0, 4.0, 6.0, 8.0]);
        let engine = Arc::new(MockExecuteAdapter::new());
        let clips = vec![
            ClipRequest::new("1", "3", "a.mp4"),
            ClipRequest::new("00:00:05.000", "7", "b.mp4").with_strategy("keyframe-only"),
            ClipRequest::new("240f", "300f", "c.mp4").with_strategy("re-encode"),
        ];

        let report = interactor(&probe, &engine)
            .extract_clips("video.mp4", &clips, "smart-copy")
            .await
            .unwrap();

        assert_eq!(probe.calls(ProbeQuery::VideoStream), 1);
        assert_eq!(probe.calls(ProbeQuery::Format), 1);
        assert_eq!(probe.calls(ProbeQuery::Frames), 1);

        let outputs: Vec<&str> = report.clips.iter().map(|c| c.output.as_str()).collect();
        assert_eq!(outputs, vec!["a.mp4", "b.mp4", "c.mp4"]);

        // re-encode reuses the shared keyframes for its coarse seek
        let invocations = engine.invocations();
        assert_eq!(invocations[2][..6], ["-ss", "8", "-i", "video.mp4", "-ss", "0"]);
        assert!(report.clips[2].is_re_encoded);
        assert_eq!(report.clips[2].frames_included, 60);
    }

    #[tokio::test]
    async fn test_reencode_only_batch_skips_keyframe_scan() {
        let probe = source(&[0.0, 1.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let report = interactor(&probe, &engine)
            .extract_clips(
                "video.mp4",
                &[ClipRequest::new("12", "20", "exact.mp4")],
                "re-encode",
            )
            .await
            .unwrap();

        assert_eq!(probe.calls(ProbeQuery::Frames), 0);
        assert_eq!(report.source.keyframe_interval, None);
        let args = &engine.invocations()[0];
        assert_eq!(args[..8], ["-ss", "7", "-i", "video.mp4", "-ss", "5", "-t", "8"]);
        assert_eq!(report.clips[0].actual_start, "00:00:12.000");
        assert_eq!(report.clips[0].frames_included, 240);
    }

    #[tokio::test]
    async fn test_routes_to_keyframe_only() {
        let probe = source(&[0.0, 3.0, 6.0, 9.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let report = interactor(&probe, &engine)
            .extract_clips(
                "video.mp4",
                &[ClipRequest::new("3.4", "8", "clip.mp4").with_strategy("keyframe-only")],
                "smart-copy",
            )
            .await
            .unwrap();

        let clip = &report.clips[0];
        assert_eq!(clip.strategy, ExtractionStrategy::KeyframeOnly);
        assert_eq!(clip.actual_start, "00:00:03.000");
        assert_eq!(clip.actual_end, "00:00:09.000");
        assert_eq!(clip.frames_included, 180);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_batch() {
        let probe = source(&[0.0, 2.0]);
        let engine = Arc::new(MockExecuteAdapter::new().failing_on(1));
        let clips = vec![
            ClipRequest::new("0", "1", "a.mp4"),
            ClipRequest::new("1", "2", "b.mp4"),
            ClipRequest::new("2", "3", "c.mp4"),
        ];

        let err = interactor(&probe, &engine)
            .extract_clips("video.mp4", &clips, "smart-copy")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "ffmpeg failed: Conversion failed!");
        assert_eq!(engine.invocations().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_ranges_never_reach_engine() {
        let probe = source(&[0.0]);
        let engine = Arc::new(MockExecuteAdapter::new());
        let clipper = interactor(&probe, &engine);

        let err = clipper
            .extract_clips("video.mp4", &[ClipRequest::new("5", "5", "x.mp4")], "smart-copy")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange { .. }));

        let err = clipper
            .extract_clips("video.mp4", &[ClipRequest::new("0", "25", "x.mp4")], "smart-copy")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::OutOfBounds(_)));

        let err = clipper
            .extract_clips("video.mp4", &[ClipRequest::new("0", "5s", "x.mp4")], "smart-copy")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Parse(TimecodeError::InvalidTimeFormat(_))));

        assert!(engine.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_strategy() {
        let probe = source(&[0.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let err = interactor(&probe, &engine)
            .extract_clips(
                "video.mp4",
                &[ClipRequest::new("1", "2", "x.mp4").with_strategy("lossless")],
                "smart-copy",
            )
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::UnknownStrategy("lossless".to_string()));
        assert_eq!(probe.calls(ProbeQuery::Frames), 1);
        assert!(engine.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_empty_keyframe_listing_fails_copy_strategies() {
        let probe = source(&[]);
        let engine = Arc::new(MockExecuteAdapter::new());
        let clips = vec![
            ClipRequest::new("6", "8", "exact.mp4").with_strategy("re-encode"),
            ClipRequest::new("1", "2", "copy.mp4"),
        ];

        let err = interactor(&probe, &engine)
            .extract_clips("video.mp4", &clips, "smart-copy")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::MissingKeyframeData {
                strategy: "smart-copy".to_string()
            }
        );
        // the re-encode clip ran first with the fallback lead
        let invocations = engine.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0][1], "1");
    }

    #[tokio::test]
    async fn test_thumbnail_out_of_bounds() {
        let probe = source(&[0.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        let err = interactor(&probe, &engine)
            .extract_thumbnail("video.mp4", "21", "thumb.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::OutOfBounds(_)));
        assert!(engine.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_thumbnail_engine_arguments() {
        let probe = source(&[0.0]);
        let engine = Arc::new(MockExecuteAdapter::new());

        interactor(&probe, &engine)
            .extract_thumbnail("video.mp4", "12", "thumb.jpg")
            .await
            .unwrap();

        assert_eq!(
            engine.invocations(),
            vec![vec![
                "-ss", "12", "-i", "video.mp4", "-vframes", "1", "-q:v", "2", "-y", "thumb.jpg"
            ]]
        );
        assert_eq!(probe.calls(ProbeQuery::Frames), 0);
    }
}
