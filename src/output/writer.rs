//! Extraction report writer

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::model::ExtractionReport;
use crate::error::{FavcError, FavcResult};

/// Writes reports as pretty-printed JSON
pub struct ReportWriter {
    atomic_writes: bool,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            atomic_writes: true,
        }
    }

    /// Write through a sibling temporary file unless disabled
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn write_report(&self, report: &ExtractionReport, path: &Path) -> FavcResult<()> {
        let body = serde_json::to_string_pretty(report)?;

        Self::ensure_output_directory(path)?;
        if self.atomic_writes {
            let temp_path = Self::temp_path(path)?;
            debug!("Writing report to temporary file: {}", temp_path.display());
            Self::write_to_file(&temp_path, body.as_bytes())?;
            std::fs::rename(&temp_path, path)?;
        } else {
            Self::write_to_file(path, body.as_bytes())?;
        }

        info!("Report saved to {}", path.display());
        Ok(())
    }

    fn write_to_file(path: &Path, data: &[u8]) -> FavcResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(&file);
        writer.write_all(data)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.sync_all()?;
        Ok(())
    }

    // Same directory as the target so the rename never crosses filesystems
    fn temp_path(final_path: &Path) -> FavcResult<PathBuf> {
        let filename = final_path.file_name().ok_or_else(|| {
            FavcError::Usage(format!("Invalid report path: {}", final_path.display()))
        })?;
        Ok(final_path.with_file_name(format!(".tmp_{}", filename.to_string_lossy())))
    }

    fn ensure_output_directory(path: &Path) -> FavcResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
