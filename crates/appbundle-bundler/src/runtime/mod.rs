//! Platform runtime abstraction for the release bundler
//!
//! This module defines the `Runtime` trait that abstracts file I/O. The
//! release builder only reads descriptor, source and resource files and
//! writes finished artifacts, so the trait is limited to those operations.
//! Implementations:
//!
//! - [`NativeRuntime`] - `std::fs` backed, used by the CLI
//! - [`MemoryRuntime`] - in-memory file map, used by tests and embedders

mod memory;
mod native;

pub use memory::MemoryRuntime;
pub use native::NativeRuntime;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File content is not valid UTF-8
    #[error("File is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Platform runtime trait
///
/// All operations are synchronous and complete before returning. A build
/// never re-opens a file it has written.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file byte-for-byte
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Write a file, replacing any previous content
    fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Create a directory
    fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file and decode it as UTF-8
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| RuntimeError::InvalidUtf8(path.to_path_buf()))
    }
}
