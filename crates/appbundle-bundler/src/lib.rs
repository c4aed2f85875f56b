//! # appbundle-bundler
//!
//! Release packaging for module-based front-end applications.
//!
//! An application is a list of modules described by JSON descriptors. A
//! release build turns it into one entry script per application plus one
//! bundle per on-demand module, with every textual resource inlined as a
//! registration call on a shared runtime cache.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use appbundle_bundler::{JsonDescriptorLoader, NativeRuntime, ReleaseDriver, ReleaseOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = Arc::new(NativeRuntime::new());
//! let resolver = Arc::new(JsonDescriptorLoader::new("./front_end", runtime.clone()));
//! let options = ReleaseOptions::new("./front_end", "./release");
//!
//! let report = ReleaseDriver::new(options, resolver, runtime).run(&["inspector"])?;
//! println!("wrote {} files", report.file_count());
//! # Ok(()) }
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

pub mod builders;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod driver;
pub mod minify;
pub mod output;
pub mod release;
pub mod resolver;
pub mod resources;
pub mod runtime;

pub use builders::{BuildContext, assemble_app_script, assemble_module_bundle};
pub use classify::{ModuleClasses, classify};
pub use config::{DEFAULT_SUPPORT_FILES, ReleaseOptions};
pub use descriptor::{Application, ApplicationEntry, ModuleDescriptor, ModuleType};
pub use driver::{ApplicationReport, DriverReport, ReleaseDriver};
pub use minify::{JsMinifier, MinifyError, MinifyLevel, OxcMinifier};
pub use output::{ArtifactKind, OutputArtifact};
pub use release::ReleaseBuilder;
pub use resolver::{DescriptorResolver, JsonDescriptorLoader};
pub use resources::{RegistryBinding, ResourceEncoder};
pub use runtime::{MemoryRuntime, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

/// Error types for appbundle-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An autostart module depends on a module loaded on demand.
    #[error(
        "Non-autostart dependencies specified for the autostarted module \"{module}\": {}",
        format_name_set(.dependencies)
    )]
    NonAutostartDependency {
        module: String,
        dependencies: BTreeSet<String>,
    },

    /// A module named in the order has no entry or descriptor.
    #[error("Unknown module \"{module}\" in application \"{application}\"")]
    UnknownModule { module: String, application: String },

    /// A module depends on a module the application never lists.
    #[error("Module \"{module}\" depends on unknown module \"{dependency}\" in application \"{application}\"")]
    UnknownDependency {
        module: String,
        dependency: String,
        application: String,
    },

    /// A dependency is listed after the module depending on it.
    #[error("Module \"{module}\" is listed before its dependency \"{dependency}\" in application \"{application}\"")]
    DependencyOrder {
        module: String,
        dependency: String,
        application: String,
    },

    /// The same module is listed twice in an application or its base chain.
    #[error("Module \"{module}\" is listed more than once in application \"{application}\"")]
    DuplicateModule { module: String, application: String },

    /// Following `extends` leads back to an application already visited.
    #[error("Application \"{0}\" extends itself")]
    ExtendsCycle(String),

    /// A descriptor file is not valid JSON for its shape.
    #[error("Invalid descriptor {}: {source}", .path.display())]
    InvalidDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Minification of an assembled script failed.
    #[error("Failed to minify {context}: {source}")]
    Minify {
        context: String,
        #[source]
        source: MinifyError,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Filesystem failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for appbundle-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

fn format_name_set(names: &BTreeSet<String>) -> String {
    let joined = names.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    format!("{{{}}}", joined)
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::NonAutostartDependency { .. } => "NON_AUTOSTART_DEPENDENCY",
            Error::UnknownModule { .. } => "UNKNOWN_MODULE",
            Error::UnknownDependency { .. } => "UNKNOWN_DEPENDENCY",
            Error::DependencyOrder { .. } => "DEPENDENCY_ORDER",
            Error::DuplicateModule { .. } => "DUPLICATE_MODULE",
            Error::ExtendsCycle(_) => "EXTENDS_CYCLE",
            Error::InvalidDescriptor { .. } => "INVALID_DESCRIPTOR",
            Error::Minify { .. } => "MINIFY_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::Runtime(RuntimeError::FileNotFound(_)) => "FILE_NOT_FOUND",
            Error::Runtime(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::NonAutostartDependency { module, .. } => Some(Box::new(format!(
                "Autostart modules are loaded with the entry script and cannot wait for on-demand modules.\nMark the dependencies of '{}' as autostart or make '{}' load on demand.",
                module, module
            ))),
            Error::DependencyOrder { dependency, .. } => Some(Box::new(format!(
                "List '{}' earlier in the application descriptor.",
                dependency
            ))),
            Error::UnknownDependency { dependency, .. } => Some(Box::new(format!(
                "Add '{}' to the application descriptor or to the application it extends.",
                dependency
            ))),
            Error::InvalidDescriptor { path, .. } => Some(Box::new(format!(
                "Check {} for syntax errors.",
                path.display()
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it's relative and doesn't contain '..' components.",
                path
            ))),
            Error::Runtime(RuntimeError::FileNotFound(path)) => Some(Box::new(format!(
                "Could not find '{}'. Check that --input_path points at the front-end root.",
                path.display()
            ))),
            Error::Runtime(RuntimeError::InvalidUtf8(path)) => Some(Box::new(format!(
                "'{}' is not UTF-8 text. Resources are inlined as string literals, so binary files cannot be bundled; reference them by URL instead.",
                path.display()
            ))),
            _ => None,
        }
    }
}
