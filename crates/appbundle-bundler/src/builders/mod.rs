//! Artifact assemblers.
//!
//! Each assembler collects its output as an ordered [`ScriptParts`] list and
//! joins it once, so the order of the emitted pieces is explicit:
//!
//! - [`app_script`] - the application's entry script
//! - [`module_bundle`] - one bundle per dynamic module

pub mod app_script;
pub mod module_bundle;

use std::path::Path;

use crate::descriptor::{Application, ModuleDescriptor};
use crate::minify::{JsMinifier, minify_with_context};
use crate::resources::{RegistryBinding, ResourceEncoder};
use crate::runtime::Runtime;
use crate::Result;

pub use app_script::assemble_app_script;
pub use module_bundle::assemble_module_bundle;

/// Ordered pieces of one artifact's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptParts {
    parts: Vec<String>,
}

impl ScriptParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, parts: I) {
        self.parts.extend(parts);
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Concatenate all parts.
    pub fn join(self) -> String {
        self.parts.concat()
    }
}

/// Everything an assembler reads from.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub application: &'a Application,
    pub runtime: &'a dyn Runtime,
    /// Input root; module directories and `<app>.js` live here.
    pub input_dir: &'a Path,
    pub binding: &'a RegistryBinding,
    pub minifier: &'a dyn JsMinifier,
}

impl<'a> BuildContext<'a> {
    pub fn encoder(&self) -> ResourceEncoder<'a> {
        ResourceEncoder::new(self.runtime, self.input_dir, self.binding)
    }

    /// Read `file` relative to the input root and minify it.
    pub fn minified_file(&self, file: &Path) -> Result<String> {
        let source = self.runtime.read_to_string(&self.input_dir.join(file))?;
        minify_with_context(self.minifier, &source, file.display().to_string())
    }

    /// Minified content of the module's legacy bundle file, if it declares one.
    pub fn legacy_source(&self, module: &ModuleDescriptor) -> Result<Option<String>> {
        if !module.has_legacy_file() {
            return Ok(None);
        }
        let file = Path::new(&module.name).join(module.legacy_file_name());
        self.minified_file(&file).map(Some)
    }
}
