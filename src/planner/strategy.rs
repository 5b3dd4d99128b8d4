//! Extraction strategy implementations

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{ExtractionStrategy, KeyframeSet};
use crate::domain::rules::KeyframeRules;
use crate::planner::{CodecMode, CutPlan, StrategyContext};

/// Coarse seek lead used by re-encode when no keyframes are known
pub const REENCODE_FALLBACK_LEAD_SECONDS: f64 = 5.0;

pub(crate) const REENCODE_VIDEO_CODEC: &str = "libx264";
pub(crate) const REENCODE_PRESET: &str = "fast";
pub(crate) const REENCODE_CRF: &str = "23";

/// Capability shared by every strategy: plan one cut
pub trait PlanCut {
    fn plan_cut(&self, ctx: &StrategyContext<'_>) -> Result<CutPlan, DomainError>;
}

fn require_keyframes<'a>(
    ctx: &StrategyContext<'a>,
    strategy: ExtractionStrategy,
) -> Result<&'a KeyframeSet, DomainError> {
    ctx.keyframes
        .filter(|ks| !ks.is_empty())
        .ok_or_else(|| DomainError::MissingKeyframeData {
            strategy: strategy.tag().to_string(),
        })
}

/// Snap both boundaries to their nearest keyframe and stream copy.
/// Fastest, but either boundary may drift in either direction.
pub struct KeyframeOnlyStrategy;

impl PlanCut for KeyframeOnlyStrategy {
    fn plan_cut(&self, ctx: &StrategyContext<'_>) -> Result<CutPlan, DomainError> {
        let keyframes = require_keyframes(ctx, ExtractionStrategy::KeyframeOnly)?;

        let actual_start = KeyframeRules::find_nearest_keyframe(ctx.start, keyframes);
        let actual_end = KeyframeRules::find_nearest_keyframe(ctx.end, keyframes);
        debug!(
            requested_start = ctx.start,
            requested_end = ctx.end,
            actual_start,
            actual_end,
            "snapped to nearest keyframes"
        );

        Ok(CutPlan {
            strategy: ExtractionStrategy::KeyframeOnly,
            input: ctx.video.file.clone(),
            output: ctx.output.to_string(),
            seek: actual_start,
            trim_offset: None,
            duration: actual_end - actual_start,
            codec: CodecMode::StreamCopy,
            actual_start,
            actual_end,
        })
    }
}

/// Snap the start back to the previous keyframe and stream copy up to the
/// requested end. The output carries lead-in frames before the nominal start.
pub struct SmartCopyStrategy;

impl PlanCut for SmartCopyStrategy {
    fn plan_cut(&self, ctx: &StrategyContext<'_>) -> Result<CutPlan, DomainError> {
        let keyframes = require_keyframes(ctx, ExtractionStrategy::SmartCopy)?;

        let seek = KeyframeRules::find_previous_keyframe(ctx.start, keyframes.as_slice());
        debug!(requested_start = ctx.start, seek, "snapped start to previous keyframe");

        Ok(CutPlan {
            strategy: ExtractionStrategy::SmartCopy,
            input: ctx.video.file.clone(),
            output: ctx.output.to_string(),
            seek,
            trim_offset: None,
            duration: ctx.end - seek,
            codec: CodecMode::StreamCopy,
            actual_start: seek,
            // the tail is not trimmed after the copy
            actual_end: ctx.end,
        })
    }
}

/// Two-phase seek (keyframe, then precise trim) with a full video re-encode.
/// The only strategy that hits the requested boundaries exactly.
pub struct ReEncodeStrategy;

impl PlanCut for ReEncodeStrategy {
    fn plan_cut(&self, ctx: &StrategyContext<'_>) -> Result<CutPlan, DomainError> {
        let seek = match ctx.keyframes.filter(|ks| !ks.is_empty()) {
            Some(keyframes) => KeyframeRules::find_previous_keyframe(ctx.start, keyframes.as_slice()),
            None => (ctx.start - REENCODE_FALLBACK_LEAD_SECONDS).max(0.0),
        };
        debug!(requested_start = ctx.start, seek, "coarse seek for re-encode");

        Ok(CutPlan {
            strategy: ExtractionStrategy::ReEncode,
            input: ctx.video.file.clone(),
            output: ctx.output.to_string(),
            seek,
            trim_offset: Some(ctx.start - seek),
            duration: ctx.end - ctx.start,
            codec: CodecMode::ReEncode,
            actual_start: ctx.start,
            actual_end: ctx.end,
        })
    }
}

impl PlanCut for ExtractionStrategy {
    fn plan_cut(&self, ctx: &StrategyContext<'_>) -> Result<CutPlan, DomainError> {
        match self {
            ExtractionStrategy::KeyframeOnly => KeyframeOnlyStrategy.plan_cut(ctx),
            ExtractionStrategy::SmartCopy => SmartCopyStrategy.plan_cut(ctx),
            ExtractionStrategy::ReEncode => ReEncodeStrategy.plan_cut(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VideoInfo;

    fn video() -> VideoInfo {
        VideoInfo {
            file: "video.mp4".to_string(),
            duration: 30.0,
            framerate: 30.0,
            width: 1920,
            height: 1080,
            codec: "h264".to_string(),
            keyframe_interval: None,
        }
    }

    fn context<'a>(
        video: &'a VideoInfo,
        start: f64,
        end: f64,
        keyframes: Option<&'a KeyframeSet>,
    ) -> StrategyContext<'a> {
        StrategyContext {
            video,
            start,
            end,
            output: "out.mp4",
            keyframes,
        }
    }

    #[test]
    fn test_keyframe_only_requires_keyframes() {
        let video = video();
        let err = KeyframeOnlyStrategy
            .plan_cut(&context(&video, 2.0, 5.0, None))
            .unwrap_err();
        assert_eq!(err.to_string(), "Keyframe data required for keyframe-only strategy");
    }

    #[test]
    fn test_keyframe_only_snaps_to_nearest() {
        let video = video();
        let ks = KeyframeSet::new(vec![1.0, 3.0, 6.0, 8.0]).unwrap();
        let plan = KeyframeOnlyStrategy
            .plan_cut(&context(&video, 2.1, 7.7, Some(&ks)))
            .unwrap();

        assert_eq!(plan.actual_start, 3.0);
        assert_eq!(plan.actual_end, 8.0);
        assert_eq!(
            plan.to_args(),
            vec![
                "-ss", "3", "-i", "video.mp4", "-t", "5", "-c", "copy",
                "-avoid_negative_ts", "1", "-y", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_smart_copy_requires_keyframes() {
        let video = video();
        let err = SmartCopyStrategy
            .plan_cut(&context(&video, 2.0, 5.0, None))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingKeyframeData {
                strategy: "smart-copy".to_string()
            }
        );
    }

    #[test]
    fn test_smart_copy_snaps_start_back() {
        let video = video();
        let ks = KeyframeSet::new(vec![1.0, 3.0, 4.0]).unwrap();
        let plan = SmartCopyStrategy
            .plan_cut(&context(&video, 4.5, 9.0, Some(&ks)))
            .unwrap();

        assert_eq!(plan.seek, 4.0);
        assert_eq!(plan.actual_end, 9.0);
        assert_eq!(
            plan.to_args(),
            vec![
                "-ss", "4", "-i", "video.mp4", "-t", "5", "-c", "copy",
                "-avoid_negative_ts", "1", "-y", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_smart_copy_before_first_keyframe_seeks_to_zero() {
        let video = video();
        let ks = KeyframeSet::new(vec![3.0, 6.0]).unwrap();
        let plan = SmartCopyStrategy
            .plan_cut(&context(&video, 2.0, 5.0, Some(&ks)))
            .unwrap();
        assert_eq!(plan.seek, 0.0);
        assert_eq!(plan.duration, 5.0);
    }

    #[test]
    fn test_reencode_with_keyframes() {
        let video = video();
        let ks = KeyframeSet::new(vec![1.0, 3.0, 5.0]).unwrap();
        let plan = ReEncodeStrategy
            .plan_cut(&context(&video, 6.0, 10.0, Some(&ks)))
            .unwrap();

        assert_eq!(plan.actual_start, 6.0);
        assert_eq!(plan.actual_end, 10.0);
        assert_eq!(
            plan.to_args(),
            vec![
                "-ss", "5", "-i", "video.mp4", "-ss", "1", "-t", "4", "-c:v", "libx264",
                "-preset", "fast", "-crf", "23", "-c:a", "copy", "-y", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_reencode_without_keyframes_uses_fallback_lead() {
        let video = video();
        let plan = ReEncodeStrategy
            .plan_cut(&context(&video, 12.0, 20.0, None))
            .unwrap();
        assert_eq!(plan.seek, 7.0);
        assert_eq!(plan.trim_offset, Some(5.0));
        assert_eq!(plan.duration, 8.0);

        let plan = ReEncodeStrategy
            .plan_cut(&context(&video, 2.0, 4.0, None))
            .unwrap();
        assert_eq!(plan.seek, 0.0);
        assert_eq!(plan.trim_offset, Some(2.0));
    }

    #[test]
    fn test_dispatch_through_tag() {
        let video = video();
        let ks = KeyframeSet::new(vec![0.0, 2.0, 4.0]).unwrap();
        let ctx = context(&video, 2.5, 3.5, Some(&ks));

        let copy = ExtractionStrategy::SmartCopy.plan_cut(&ctx).unwrap();
        assert_eq!(copy.strategy, ExtractionStrategy::SmartCopy);
        assert_eq!(copy.codec, CodecMode::StreamCopy);

        let exact = ExtractionStrategy::ReEncode.plan_cut(&ctx).unwrap();
        assert_eq!(exact.codec, CodecMode::ReEncode);
        assert_eq!(exact.frames_included(video.framerate), 30);
    }
}
