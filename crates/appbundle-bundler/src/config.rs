//! Release build options.

use std::path::PathBuf;

use crate::minify::MinifyLevel;
use crate::resources::RegistryBinding;

/// Support files copied from the input root to the output root after all
/// applications are built.
pub const DEFAULT_SUPPORT_FILES: [&str; 2] = ["root.js", "RuntimeInstantiator.js"];

/// Options shared by every application of one release build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Directory holding application descriptors, module directories and
    /// application scripts.
    pub input_dir: PathBuf,
    /// Directory receiving the artifacts.
    pub output_dir: PathBuf,
    pub minify: MinifyLevel,
    pub registry: RegistryBinding,
    pub support_files: Vec<String>,
    /// Alternate concatenation strategy flag. Recorded, does not change artifacts.
    pub use_rollup: bool,
}

impl ReleaseOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            minify: MinifyLevel::default(),
            registry: RegistryBinding::default(),
            support_files: DEFAULT_SUPPORT_FILES.iter().map(|f| f.to_string()).collect(),
            use_rollup: false,
        }
    }

    pub fn minify(mut self, level: MinifyLevel) -> Self {
        self.minify = level;
        self
    }

    pub fn registry(mut self, registry: RegistryBinding) -> Self {
        self.registry = registry;
        self
    }

    pub fn support_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.support_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn use_rollup(mut self, enabled: bool) -> Self {
        self.use_rollup = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReleaseOptions::new("front_end", "out");
        assert_eq!(options.minify, MinifyLevel::Whitespace);
        assert_eq!(options.support_files, vec!["root.js", "RuntimeInstantiator.js"]);
        assert!(!options.use_rollup);
        assert_eq!(options.registry, RegistryBinding::default());
    }

    #[test]
    fn test_builder_methods() {
        let options = ReleaseOptions::new("in", "out")
            .minify(MinifyLevel::None)
            .support_files(["root.js"])
            .use_rollup(true);
        assert_eq!(options.minify, MinifyLevel::None);
        assert_eq!(options.support_files, vec!["root.js"]);
        assert!(options.use_rollup);
    }
}
