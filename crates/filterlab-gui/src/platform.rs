//! Native File Export
//!
//! Uses `rfd` for the save dialog and `std::fs` for the write. The dialog
//! starts in the save directory resolved at startup (see
//! [`crate::config::Settings`]).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Error type for file operations
#[derive(Debug, Clone)]
pub enum FileError {
    /// User cancelled the dialog
    Cancelled,
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Cancelled => write!(f, "Export cancelled"),
            FileError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            FileError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for FileError {}

/// Ask the user for a target path, starting in `save_dir`, and write
/// `contents` there. Returns the chosen path.
pub fn save_text_file(save_dir: &Path, default_name: &str, contents: &str) -> FileResult<PathBuf> {
    let path = rfd::FileDialog::new()
        .add_filter("JSON Files", &["json"])
        .add_filter("All Files", &["*"])
        .set_directory(save_dir)
        .set_file_name(default_name)
        .save_file()
        .ok_or(FileError::Cancelled)?;

    let mut file = File::create(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            FileError::PermissionDenied(path.display().to_string())
        } else {
            FileError::IoError(e.to_string())
        }
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| FileError::IoError(e.to_string()))?;

    tracing::info!("Saved {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(FileError::Cancelled.to_string(), "Export cancelled");
        assert!(FileError::PermissionDenied("/x".into())
            .to_string()
            .contains("/x"));
        assert!(FileError::IoError("disk full".into())
            .to_string()
            .contains("disk full"));
    }
}
