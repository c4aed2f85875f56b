//! Build output types and writing.

pub mod writer;

use std::path::PathBuf;

/// What an artifact is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The single per-application entry script, `<app>.js`.
    EntryScript,
    /// Bundle of one dynamic module, `<module>/<module>_module.js`.
    ModuleBundle,
    /// Support file copied through the minifier.
    SupportFile,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryScript => write!(f, "entry script"),
            Self::ModuleBundle => write!(f, "module bundle"),
            Self::SupportFile => write!(f, "support file"),
        }
    }
}

/// A single output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub kind: ArtifactKind,
    /// Path relative to the output directory, `/`-separated.
    pub path: PathBuf,
    pub content: String,
}

impl OutputArtifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Output path of the entry script for `application`.
pub fn entry_script_path(application: &str) -> PathBuf {
    PathBuf::from(format!("{}.js", application))
}

/// File name of a dynamic module's bundle.
pub fn module_bundle_file_name(module: &str) -> String {
    format!("{}_module.js", module)
}

/// Output path of a dynamic module's bundle, relative to the output directory.
pub fn module_bundle_path(module: &str) -> PathBuf {
    PathBuf::from(module).join(module_bundle_file_name(module))
}
