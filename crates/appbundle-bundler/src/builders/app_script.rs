//! Entry script assembly.
//!
//! The entry script of an application consists of, in order:
//!
//! 1. `Root.allDescriptors.push(...)` with the release module descriptors
//! 2. the application descriptor, appended to the base application's when
//!    the application extends one, replacing it otherwise
//! 3. the import binding the resource store
//! 4. resource registrations of every autostart module
//! 5. the application's own `<app>.js`, minified
//! 6. the legacy bundles of the autostart modules, minified

use std::path::Path;

use serde_json::{Map, Value};

use crate::builders::{BuildContext, ScriptParts};
use crate::classify::ModuleClasses;
use crate::descriptor::Application;
use crate::output::{ArtifactKind, OutputArtifact, entry_script_path, module_bundle_file_name};
use crate::{Error, Result};

/// Global object the loader reads descriptors from.
pub const ROOT_GLOBAL: &str = "Root";

/// Module descriptor records as the runtime loader sees them in release mode.
///
/// Resources are stripped because they are baked into registration
/// statements. Dynamic modules get their bundle file prepended to `modules`
/// so the loader fetches it.
pub fn release_module_descriptors(app: &Application) -> Result<Vec<Value>> {
    let mut records = Vec::with_capacity(app.sorted_modules.len());

    for name in &app.sorted_modules {
        let unknown = || Error::UnknownModule {
            module: name.clone(),
            application: app.name.clone(),
        };
        let entry = app.entry(name).ok_or_else(unknown)?;
        let mut module = app.module(name).ok_or_else(unknown)?.clone();

        let had_resources = !module.resource_files.is_empty();
        module.resource_files.clear();
        if entry.is_dynamic() && (had_resources || !module.source_files.is_empty()) {
            module.source_files.insert(0, module_bundle_file_name(name));
        }

        records.push(serde_json::to_value(&module)?);
    }

    Ok(records)
}

/// Full application descriptor: name, top-level metadata and entries.
pub fn application_descriptor(app: &Application) -> Result<Value> {
    let mut descriptor = Map::new();
    descriptor.insert("name".to_string(), Value::String(app.name.clone()));
    for (key, value) in &app.extra {
        descriptor.insert(key.clone(), value.clone());
    }
    descriptor.insert("modules".to_string(), serde_json::to_value(&app.entries)?);
    Ok(Value::Object(descriptor))
}

/// Assemble the entry script of `ctx.application`, before final minification.
pub fn assemble_app_script(ctx: &BuildContext<'_>, classes: &ModuleClasses) -> Result<OutputArtifact> {
    let app = ctx.application;
    let mut parts = ScriptParts::new();

    let descriptors = serde_json::to_string(&release_module_descriptors(app)?)?;
    parts.push(format!("{ROOT_GLOBAL}.allDescriptors.push(...{descriptors});"));

    if app.extends() {
        let entries = serde_json::to_string(&app.entries)?;
        parts.push(format!(
            "{ROOT_GLOBAL}.applicationDescriptor.modules.push(...{entries});"
        ));
    } else {
        let descriptor = serde_json::to_string(&application_descriptor(app)?)?;
        parts.push(format!("{ROOT_GLOBAL}.applicationDescriptor = {descriptor};"));
    }

    parts.push(ctx.binding.import_statement("./"));

    let encoder = ctx.encoder();
    for name in &classes.autostart {
        if let Some(module) = app.module(name) {
            parts.extend(encoder.encode_all(name, &module.resource_files)?);
        }
    }

    parts.push(ctx.minified_file(Path::new(&app.script_file_name()))?);

    for name in &classes.autostart {
        if let Some(module) = app.module(name) {
            if let Some(source) = ctx.legacy_source(module)? {
                parts.push(source);
            }
        }
    }

    Ok(OutputArtifact::new(
        ArtifactKind::EntryScript,
        entry_script_path(&app.name),
        parts.join(),
    ))
}
