//! Multi-application driver.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ReleaseOptions;
use crate::minify::{JsMinifier, OxcMinifier, minify_with_context};
use crate::output::{ArtifactKind, OutputArtifact, writer};
use crate::release::ReleaseBuilder;
use crate::resolver::DescriptorResolver;
use crate::runtime::Runtime;
use crate::Result;

/// Files written for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReport {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// Outcome of a [`ReleaseDriver::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverReport {
    pub applications: Vec<ApplicationReport>,
    pub support_files: Vec<PathBuf>,
}

impl DriverReport {
    /// Total number of files written.
    pub fn file_count(&self) -> usize {
        self.applications.iter().map(|a| a.files.len()).sum::<usize>() + self.support_files.len()
    }
}

/// Builds a list of applications and copies the shared support files.
#[derive(Debug, Clone)]
pub struct ReleaseDriver {
    options: ReleaseOptions,
    resolver: Arc<dyn DescriptorResolver>,
    runtime: Arc<dyn Runtime>,
    minifier: Arc<dyn JsMinifier>,
}

impl ReleaseDriver {
    /// Create a driver minifying with [`OxcMinifier`] at the configured level.
    pub fn new(
        options: ReleaseOptions,
        resolver: Arc<dyn DescriptorResolver>,
        runtime: Arc<dyn Runtime>,
    ) -> Self {
        let minifier = Arc::new(OxcMinifier::new(options.minify));
        Self {
            options,
            resolver,
            runtime,
            minifier,
        }
    }

    /// Build every application in order, then copy the support files.
    ///
    /// Stops at the first failing application. Applications built before the
    /// failure keep their output; support files are not copied.
    pub fn run<S: AsRef<str>>(&self, applications: &[S]) -> Result<DriverReport> {
        let mut report = DriverReport::default();

        for name in applications {
            let name = name.as_ref();
            tracing::debug!(application = name, "Building application");

            let application = self.resolver.load_application(name)?;
            let files = ReleaseBuilder::new(
                application,
                &self.options,
                self.runtime.as_ref(),
                self.minifier.as_ref(),
            )
            .build()?;

            report.applications.push(ApplicationReport {
                name: name.to_string(),
                files,
            });
        }

        report.support_files = self.copy_support_files()?;
        Ok(report)
    }

    /// Minify the support files from the input root into the output root.
    pub fn copy_support_files(&self) -> Result<Vec<PathBuf>> {
        let mut artifacts = Vec::with_capacity(self.options.support_files.len());
        for file in &self.options.support_files {
            let source = self
                .runtime
                .read_to_string(&self.options.input_dir.join(file))?;
            let content = minify_with_context(self.minifier.as_ref(), &source, file)?;
            artifacts.push(OutputArtifact::new(ArtifactKind::SupportFile, file, content));
        }

        let written =
            writer::write_artifacts(self.runtime.as_ref(), &self.options.output_dir, &artifacts)?;
        tracing::debug!(count = written.len(), "Copied support files");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::minify::MinifyLevel;
    use crate::resolver::JsonDescriptorLoader;
    use crate::runtime::MemoryRuntime;

    fn runtime() -> MemoryRuntime {
        MemoryRuntime::new()
            .with_file("/in/root.js", "export const Runtime = { cachedResources: new Map() };\n")
            .with_file("/in/RuntimeInstantiator.js", "export   function start() {}\n")
            .with_file(
                "/in/shell.json",
                r#"{"modules": [{"name": "core", "type": "autostart"}, {"name": "panel"}]}"#,
            )
            .with_file("/in/shell.js", "Root.start();\n")
            .with_file("/in/core/module.json", "{}")
            .with_file(
                "/in/panel/module.json",
                r#"{"dependencies": ["core"], "resources": ["panel.css"]}"#,
            )
            .with_file("/in/panel/panel.css", "a{}")
            .with_file("/in/broken.json", r#"{"modules": [{"name": "b", "type": "autostart"}, {"name": "a"}]}"#)
            .with_file("/in/a/module.json", "{}")
            .with_file("/in/b/module.json", r#"{"dependencies": ["a"]}"#)
    }

    fn driver(runtime: &MemoryRuntime) -> ReleaseDriver {
        let runtime: Arc<dyn Runtime> = Arc::new(runtime.clone());
        let options = ReleaseOptions::new("/in", "/out").minify(MinifyLevel::None);
        let resolver = Arc::new(JsonDescriptorLoader::new("/in", runtime.clone()));
        ReleaseDriver::new(options, resolver, runtime)
    }

    #[test]
    fn test_run_builds_applications_and_support_files() {
        let runtime = runtime();
        let report = driver(&runtime).run(&["shell"]).unwrap();

        assert_eq!(report.applications.len(), 1);
        assert_eq!(report.applications[0].name, "shell");
        assert_eq!(
            report.support_files,
            vec![PathBuf::from("/out/root.js"), PathBuf::from("/out/RuntimeInstantiator.js")]
        );
        assert_eq!(report.file_count(), 4);
        assert!(runtime.file("/out/panel/panel_module.js").is_some());
        assert_eq!(
            runtime.file_string("/out/RuntimeInstantiator.js").unwrap(),
            "export   function start() {}\n"
        );
    }

    #[test]
    fn test_support_files_are_minified() {
        let runtime = runtime();
        let shared: Arc<dyn Runtime> = Arc::new(runtime.clone());
        let options = ReleaseOptions::new("/in", "/out").support_files(["RuntimeInstantiator.js"]);
        let resolver = Arc::new(JsonDescriptorLoader::new("/in", shared.clone()));

        ReleaseDriver::new(options, resolver, shared)
            .copy_support_files()
            .unwrap();

        let copied = runtime.file_string("/out/RuntimeInstantiator.js").unwrap();
        assert!(copied.contains("function start"));
        assert!(!copied.contains("export   function"));
    }

    #[test]
    fn test_first_failure_stops_the_run() {
        let runtime = runtime();
        let err = driver(&runtime).run(&["broken", "shell"]).unwrap_err();

        assert!(matches!(err, Error::NonAutostartDependency { ref module, .. } if module == "b"));
        assert!(runtime.file("/out/shell.js").is_none());
        assert!(runtime.file("/out/root.js").is_none());
    }

    #[test]
    fn test_missing_support_file_fails() {
        let runtime = MemoryRuntime::new();
        let err = driver(&runtime).run::<&str>(&[]).unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
    }
}
