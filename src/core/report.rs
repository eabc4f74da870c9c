//! Markdown coverage report

use crate::adapters::database::CoverageCounts;
use crate::domain::{PinloadError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Store totals at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    counts: CoverageCounts,
    generated_at: DateTime<Utc>,
}

impl CoverageReport {
    /// Creates a report stamped with the current time
    pub fn new(counts: CoverageCounts) -> Self {
        Self::at(counts, Utc::now())
    }

    /// Creates a report stamped with `generated_at`
    pub fn at(counts: CoverageCounts, generated_at: DateTime<Utc>) -> Self {
        Self {
            counts,
            generated_at,
        }
    }

    /// Renders the Markdown document
    ///
    /// Unknown counts render as `N/A`.
    pub fn render(&self) -> String {
        format!(
            "# Geo Data Coverage Report\n\
             Generated at: {}\n\
             - Total States: {}\n\
             - Total Cities: {}\n\
             - Total Pincodes: {}\n",
            self.generated_at.format(TIMESTAMP_FORMAT),
            count_or_na(self.counts.states),
            count_or_na(self.counts.cities),
            count_or_na(self.counts.pincodes),
        )
    }

    /// Writes the report, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `PinloadError::Report` if the file exists and `overwrite` is
    /// false, or if it cannot be written.
    pub fn write(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<PathBuf> {
        let path = path.as_ref();
        check_destination(path, overwrite)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PinloadError::Report(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(path, self.render()).map_err(|e| {
            PinloadError::Report(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Coverage report written");
        Ok(path.to_path_buf())
    }
}

/// Fails if `path` exists and `overwrite` is false
///
/// # Errors
///
/// Returns `PinloadError::Report` naming the existing file.
pub fn check_destination(path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let path = path.as_ref();
    if !overwrite && path.exists() {
        return Err(PinloadError::Report(format!(
            "{} already exists and overwrite is disabled",
            path.display()
        )));
    }
    Ok(())
}

fn count_or_na(count: Option<u64>) -> String {
    count.map_or_else(|| "N/A".to_string(), |c| c.to_string())
}
