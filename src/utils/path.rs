//! Input path checks

use std::path::Path;

use crate::error::{FavcError, FavcResult};

/// Container extensions accepted for clip extraction
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "m4v", "webm"];

/// Lowercased extension of `path`, if any
pub fn get_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Fail unless `path` exists
pub fn ensure_exists(path: &str) -> FavcResult<()> {
    if Path::new(path).exists() {
        Ok(())
    } else {
        Err(FavcError::InputNotFound {
            path: path.to_string(),
        })
    }
}

/// Fail unless `path` exists and carries a supported container extension
pub fn validate_video_file(path: &str) -> FavcResult<()> {
    ensure_exists(path)?;

    let extension = get_extension(path).unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(FavcError::UnsupportedFormat {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{}", extension)
            },
        })
    }
}
