// Domain rules - Keyframe lookup and range validation

use crate::domain::errors::*;
use crate::domain::model::*;

/// Keyframe interval assumed when there are too few keyframes to measure one
pub const DEFAULT_KEYFRAME_INTERVAL: f64 = 2.0;

/// Number of leading keyframes sampled for the interval estimate
const INTERVAL_SAMPLE_SIZE: usize = 20;

/// Keyframe lookup helpers shared by the strategies and the report
pub struct KeyframeRules;

impl KeyframeRules {
    /// Largest keyframe at or before `timestamp`.
    ///
    /// Stream start counts as an implicit keyframe, so `0.0` comes back when
    /// nothing qualifies.
    pub fn find_previous_keyframe(timestamp: f64, keyframes: &[f64]) -> f64 {
        keyframes
            .iter()
            .rev()
            .copied()
            .find(|&k| k <= timestamp)
            .unwrap_or(0.0)
    }

    /// Keyframe with the smallest distance to `timestamp`; the earlier entry wins a tie
    pub fn find_nearest_keyframe(timestamp: f64, keyframes: &KeyframeSet) -> f64 {
        let slice = keyframes.as_slice();
        let mut nearest = slice[0];
        let mut min_diff = (nearest - timestamp).abs();

        for &k in &slice[1..] {
            let diff = (k - timestamp).abs();
            if diff < min_diff {
                min_diff = diff;
                nearest = k;
            }
        }

        nearest
    }

    /// Typical GOP length: median gap over the first keyframes.
    ///
    /// Informational only, never a cutting input.
    pub fn estimate_keyframe_interval(keyframes: &[f64]) -> f64 {
        if keyframes.len() < 2 {
            return DEFAULT_KEYFRAME_INTERVAL;
        }

        let sample = &keyframes[..keyframes.len().min(INTERVAL_SAMPLE_SIZE)];
        let mut gaps: Vec<f64> = sample.windows(2).map(|w| w[1] - w[0]).collect();
        gaps.sort_by(|a, b| a.total_cmp(b));
        gaps[gaps.len() / 2]
    }
}

/// Semantic validation of a requested window
pub struct RangeValidator;

impl RangeValidator {
    /// Reject empty or inverted windows and windows outside `[0, duration]`
    pub fn validate_time_range(
        clip: &ClipRequest,
        start_seconds: f64,
        end_seconds: f64,
        duration: f64,
    ) -> Result<(), DomainError> {
        if start_seconds >= end_seconds {
            return Err(DomainError::InvalidRange {
                start: clip.start.clone(),
                end: clip.end.clone(),
            });
        }
        if start_seconds < 0.0 || end_seconds > duration {
            return Err(DomainError::OutOfBounds(format!(
                "Clip range out of bounds: {} to {}, with duration {}s",
                clip.start, clip.end, duration
            )));
        }
        Ok(())
    }

    /// Reject a single timestamp outside `[0, duration]`
    pub fn validate_timestamp(
        expression: &str,
        seconds: f64,
        duration: f64,
    ) -> Result<(), DomainError> {
        if seconds < 0.0 || seconds > duration {
            return Err(DomainError::OutOfBounds(format!(
                "Timestamp {} out of bounds",
                expression
            )));
        }
        Ok(())
    }
}
