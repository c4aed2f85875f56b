//! Release build of one application.
//!
//! [`ReleaseBuilder`] classifies the application's modules, assembles the
//! entry script and every dynamic module bundle, minifies them and only then
//! writes them. A failure at any step leaves the application's output
//! untouched.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::builders::{BuildContext, assemble_app_script, assemble_module_bundle};
use crate::classify::classify;
use crate::config::ReleaseOptions;
use crate::descriptor::Application;
use crate::minify::{JsMinifier, minify_with_context};
use crate::output::{OutputArtifact, writer};
use crate::runtime::Runtime;
use crate::Result;

/// Builds the artifacts of a single application.
#[derive(Debug)]
pub struct ReleaseBuilder<'a> {
    application: Application,
    options: &'a ReleaseOptions,
    runtime: &'a dyn Runtime,
    minifier: &'a dyn JsMinifier,
}

impl<'a> ReleaseBuilder<'a> {
    pub fn new(
        application: Application,
        options: &'a ReleaseOptions,
        runtime: &'a dyn Runtime,
        minifier: &'a dyn JsMinifier,
    ) -> Self {
        Self {
            application,
            options,
            runtime,
            minifier,
        }
    }

    fn context(&self) -> BuildContext<'_> {
        BuildContext {
            application: &self.application,
            runtime: self.runtime,
            input_dir: &self.options.input_dir,
            binding: &self.options.registry,
            minifier: self.minifier,
        }
    }

    fn finish(&self, artifact: OutputArtifact) -> Result<OutputArtifact> {
        let content = minify_with_context(
            self.minifier,
            &artifact.content,
            artifact.path.display().to_string(),
        )?;
        Ok(OutputArtifact { content, ..artifact })
    }

    /// Assemble and minify every artifact of the application, in memory.
    ///
    /// The entry script comes first, followed by the dynamic module bundles
    /// in dependency order.
    pub fn assemble(&self) -> Result<Vec<OutputArtifact>> {
        let classes = classify(&self.application)?;
        let ctx = self.context();

        let entry = self.finish(assemble_app_script(&ctx, &classes)?)?;

        let bundles = classes
            .dynamic
            .par_iter()
            .map(|name| self.finish(assemble_module_bundle(&ctx, name)?))
            .collect::<Result<Vec<_>>>()?;

        let mut artifacts = Vec::with_capacity(bundles.len() + 1);
        artifacts.push(entry);
        artifacts.extend(bundles);
        Ok(artifacts)
    }

    /// Assemble the application and write its artifacts to the output directory.
    ///
    /// Returns the paths written.
    pub fn build(&self) -> Result<Vec<PathBuf>> {
        let artifacts = self.assemble()?;
        self.write(&artifacts)
    }

    /// Write assembled artifacts below the output directory.
    pub fn write(&self, artifacts: &[OutputArtifact]) -> Result<Vec<PathBuf>> {
        let written = writer::write_artifacts(self.runtime, &self.options.output_dir, artifacts)?;

        tracing::info!(
            application = %self.application.name,
            artifacts = written.len(),
            rollup = self.options.use_rollup,
            "Built application"
        );

        Ok(written)
    }
}
