//! Input file location
//!
//! The first pipeline stage. Nothing else runs until the spreadsheet is
//! known to exist.

use crate::domain::{PinloadError, Result};
use std::path::{Path, PathBuf};

/// Checks that `path` names an existing regular file
///
/// # Errors
///
/// Returns `PinloadError::InputNotFound` if the path does not exist or is not
/// a file.
pub fn locate_input(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_file() {
        tracing::error!(path = %path.display(), "Input file not found");
        return Err(PinloadError::InputNotFound(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "Input file located");
    Ok(path.to_path_buf())
}
