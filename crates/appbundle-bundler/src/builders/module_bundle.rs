//! Dynamic module bundle assembly.
//!
//! A bundle holds the module's resource registrations followed by its legacy
//! bundle file. A module with neither still gets an (empty) bundle, so the
//! output always contains one file per dynamic module.

use crate::builders::{BuildContext, ScriptParts};
use crate::output::{ArtifactKind, OutputArtifact, module_bundle_path};
use crate::{Error, Result};

/// Assemble the bundle of dynamic module `name`, before final minification.
pub fn assemble_module_bundle(ctx: &BuildContext<'_>, name: &str) -> Result<OutputArtifact> {
    let module = ctx
        .application
        .module(name)
        .ok_or_else(|| Error::UnknownModule {
            module: name.to_string(),
            application: ctx.application.name.clone(),
        })?;

    let mut parts = ScriptParts::new();

    if !module.resource_files.is_empty() {
        parts.push(ctx.binding.import_statement("../"));
        parts.extend(ctx.encoder().encode_all(name, &module.resource_files)?);
    }

    if let Some(source) = ctx.legacy_source(module)? {
        parts.push(source);
    }

    Ok(OutputArtifact::new(
        ArtifactKind::ModuleBundle,
        module_bundle_path(name),
        parts.join(),
    ))
}
