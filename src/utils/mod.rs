//! Common utilities and helpers

use std::time::Duration;

pub mod logging;
pub mod path;
pub mod time;

/// Seconds with one decimal, as shown in progress messages
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}
