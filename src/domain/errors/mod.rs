// Domain errors - Error types for the domain layer

use std::fmt;

/// Malformed time expression
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// `<int>f` whose prefix is not an integer
    InvalidFrameNumber(String),
    /// Clock timecode without exactly three parts
    InvalidTimecodeFormat(String),
    /// Clock timecode with a part that is not a number
    InvalidTimecodeValue(String),
    /// Plain seconds that are not a finite number
    InvalidTimeFormat(String),
}

impl fmt::Display for TimecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimecodeError::InvalidFrameNumber(input) => {
                write!(f, "Invalid frame number: {}", input)
            }
            TimecodeError::InvalidTimecodeFormat(input) => write!(
                f,
                "Invalid timecode format: {}. Expected HH:MM:SS.mmm",
                input
            ),
            TimecodeError::InvalidTimecodeValue(input) => {
                write!(f, "Invalid timecode values: {}", input)
            }
            TimecodeError::InvalidTimeFormat(input) => write!(f, "Invalid time format: {}", input),
        }
    }
}

impl std::error::Error for TimecodeError {}

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed time expression
    Parse(TimecodeError),
    /// Start is not strictly before end
    InvalidRange { start: String, end: String },
    /// Requested time lies outside the source
    OutOfBounds(String),
    /// Keyframe-dependent strategy invoked without keyframes
    MissingKeyframeData { strategy: String },
    /// Strategy tag not recognized
    UnknownStrategy(String),
    /// Source exposes no video stream
    NoVideoStream(String),
    /// Inspection output could not be interpreted
    BadProbeOutput(String),
    /// External engine exited with failure or could not be spawned
    ExternalEngineFailure { engine: String, message: String },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Parse(err) => write!(f, "{}", err),
            DomainError::InvalidRange { start, end } => write!(
                f,
                "Invalid clip range: start ({}) must be before end ({})",
                start, end
            ),
            DomainError::OutOfBounds(msg) => write!(f, "{}", msg),
            DomainError::MissingKeyframeData { strategy } => {
                write!(f, "Keyframe data required for {} strategy", strategy)
            }
            DomainError::UnknownStrategy(tag) => {
                write!(f, "Unknown extraction strategy: {}", tag)
            }
            DomainError::NoVideoStream(path) => write!(f, "No video stream found in {}", path),
            DomainError::BadProbeOutput(msg) => write!(f, "Unreadable probe output: {}", msg),
            DomainError::ExternalEngineFailure { engine, message } => {
                write!(f, "{} failed: {}", engine, message)
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<TimecodeError> for DomainError {
    fn from(err: TimecodeError) -> Self {
        DomainError::Parse(err)
    }
}
