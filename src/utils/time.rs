//! Time expression parsing and formatting utilities

use crate::domain::errors::TimecodeError;

/// Parser for the three accepted time expression forms:
///
/// 1. Frames: `"1234f"` (resolved against the source frame rate)
/// 2. Clock timecode: `"01:23:45.500"`
/// 3. Plain seconds: `"125.5"`
pub struct TimecodeParser;

impl TimecodeParser {
    /// Parse a time expression to seconds
    pub fn parse(input: &str, framerate: f64) -> Result<f64, TimecodeError> {
        let input = input.trim();

        if let Some(frames) = input.strip_suffix('f') {
            let frame_number: i64 = frames
                .parse()
                .map_err(|_| TimecodeError::InvalidFrameNumber(input.to_string()))?;
            return Ok(frame_number as f64 / framerate);
        }

        if input.contains(':') {
            return Self::parse_clock(input);
        }

        match input.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() => Ok(seconds),
            _ => Err(TimecodeError::InvalidTimeFormat(input.to_string())),
        }
    }

    /// Parse `HH:MM:SS(.mmm)`
    fn parse_clock(input: &str) -> Result<f64, TimecodeError> {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() != 3 {
            return Err(TimecodeError::InvalidTimecodeFormat(input.to_string()));
        }

        let invalid = || TimecodeError::InvalidTimecodeValue(input.to_string());
        let hours: i64 = parts[0].trim().parse().map_err(|_| invalid())?;
        let minutes: i64 = parts[1].trim().parse().map_err(|_| invalid())?;
        let seconds: f64 = parts[2].trim().parse().map_err(|_| invalid())?;
        if !seconds.is_finite() {
            return Err(invalid());
        }

        Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
    }

    /// Format seconds as `HH:MM:SS.mmm`
    pub fn format(seconds: f64) -> String {
        let hours = (seconds / 3600.0).trunc() as i64;
        let minutes = ((seconds % 3600.0) / 60.0).trunc() as i64;
        let secs = seconds % 60.0;

        format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
    }

    /// Frame index containing `seconds`, for display only
    pub fn seconds_to_frame_number(seconds: f64, framerate: f64) -> i64 {
        (framerate * seconds).floor() as i64
    }
}
