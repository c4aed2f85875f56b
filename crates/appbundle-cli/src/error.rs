//! Error handling for the appbundle CLI.
//!
//! `CliError` is the top-level type returned by commands. Library failures
//! arrive as [`CliError::Build`] and keep their diagnostic codes when
//! rendered through [`cli_error_to_miette`].
//!
//! # Example
//!
//! ```rust,no_run
//! use appbundle_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn input_metadata(path: &Path) -> Result<std::fs::Metadata> {
//!     std::fs::metadata(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid value, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Release build failures reported by the bundler.
    #[error("Build error: {0}")]
    Build(#[from] appbundle_bundler::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create an appbundle.config.json file in the input directory or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

/// Convert a `CliError` into a miette report for rendering.
///
/// Bundler errors go through their own `Diagnostic` impl so the report
/// carries the error code and help text.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Build(e) => miette::Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}
