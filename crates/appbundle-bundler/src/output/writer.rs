//! Artifact writing.
//!
//! All artifacts of a build are handed over at once. Every target path is
//! validated before the first write, so a bad path aborts the build with
//! nothing written. Each file is written exactly once.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::output::OutputArtifact;
use crate::runtime::Runtime;
use crate::{Error, Result};

/// Resolve `relative` inside `dir`, rejecting anything that would escape it.
///
/// # Examples
///
/// ```
/// use appbundle_bundler::output::writer::validate_output_path;
/// use std::path::Path;
///
/// let path = validate_output_path(Path::new("/out"), Path::new("Panel/Panel_module.js")).unwrap();
/// assert_eq!(path, Path::new("/out/Panel/Panel_module.js"));
/// assert!(validate_output_path(Path::new("/out"), Path::new("../etc/passwd")).is_err());
/// ```
pub fn validate_output_path(dir: &Path, relative: &Path) -> Result<PathBuf> {
    if relative.is_absolute() {
        return Err(Error::InvalidOutputPath(format!(
            "Absolute paths are not allowed: {}",
            relative.display()
        )));
    }

    let cleaned = relative.clean();
    if cleaned
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
        || cleaned.as_os_str().is_empty()
        || cleaned == Path::new(".")
    {
        return Err(Error::InvalidOutputPath(format!(
            "Path escapes the output directory: {}",
            relative.display()
        )));
    }

    Ok(dir.join(cleaned))
}

/// Write `artifacts` below `dir`, creating parent directories as needed.
///
/// Returns the absolute paths written, in artifact order.
pub fn write_artifacts(
    runtime: &dyn Runtime,
    dir: &Path,
    artifacts: &[OutputArtifact],
) -> Result<Vec<PathBuf>> {
    let targets = artifacts
        .iter()
        .map(|artifact| validate_output_path(dir, &artifact.path))
        .collect::<Result<Vec<_>>>()?;

    for (artifact, target) in artifacts.iter().zip(&targets) {
        if let Some(parent) = target.parent() {
            if !runtime.exists(parent) {
                runtime.create_dir(parent, true)?;
            }
        }
        runtime.write_file(target, artifact.content.as_bytes())?;
        tracing::debug!(
            path = %target.display(),
            kind = %artifact.kind,
            bytes = artifact.size(),
            "Wrote artifact"
        );
    }

    Ok(targets)
}
