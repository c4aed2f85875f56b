//! Native Runtime Implementation
//!
//! `std::fs` wrapped in the [`Runtime`] trait so the release builder stays
//! independent of where its files live.

// NativeRuntime is platform-specific and wraps std::fs by design
#![allow(clippy::disallowed_methods)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so a failed write never leaves a truncated artifact behind.
#[derive(Debug, Clone, Copy)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!("Failed to read {}: {}", path.display(), e))
            }
        })
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let temp_path = temp_path_for(path);

        if let Err(e) = std::fs::write(&temp_path, content) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(RuntimeError::Io(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }

        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            RuntimeError::Io(format!(
                "Failed to move {} into place: {}",
                path.display(),
                e
            ))
        })
    }

    fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let result = if recursive {
            std::fs::create_dir_all(path)
        } else {
            std::fs::create_dir(path)
        };

        result.map_err(|e| {
            RuntimeError::Io(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
