//! In-memory Runtime implementation
//!
//! `MemoryRuntime` keeps every file in a map keyed by normalized path. It
//! mirrors the native runtime closely enough for builds to be tested without
//! touching the disk: reading a missing file fails, and writing requires the
//! parent directory to exist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Runtime implementation backed by an in-memory file map
#[derive(Debug, Clone, Default)]
pub struct MemoryRuntime {
    files: Arc<RwLock<FxHashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<FxHashSet<PathBuf>>>,
}

impl MemoryRuntime {
    /// Create an empty MemoryRuntime
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, implicitly creating its parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let normalized = path.as_ref().clean();
        if let Some(parent) = normalized.parent() {
            self.add_dir_chain(parent);
        }
        self.files.write().insert(normalized, content.into());
    }

    /// Builder-style variant of [`MemoryRuntime::add_file`]
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Get the content of a file, if present
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().get(&path.as_ref().clean()).cloned()
    }

    /// Get the content of a file as UTF-8 text, if present and valid
    pub fn file_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.file(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// All file paths under `root`, sorted
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref().clean();
        let mut paths: Vec<PathBuf> = self
            .files
            .read()
            .keys()
            .filter(|p| p.starts_with(&root))
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    fn add_dir_chain(&self, dir: &Path) {
        let mut dirs = self.dirs.write();
        let mut current = Some(dir);
        while let Some(d) = current {
            if d.as_os_str().is_empty() || !dirs.insert(d.to_path_buf()) {
                break;
            }
            current = d.parent();
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || path.parent().is_none() || self.dirs.read().contains(path)
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.file(path)
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let normalized = path.clean();
        let parent = normalized.parent().unwrap_or(Path::new(""));
        if !self.is_dir(parent) {
            return Err(RuntimeError::Io(format!(
                "Failed to write {}: parent directory does not exist",
                path.display()
            )));
        }
        self.files.write().insert(normalized, content.to_vec());
        Ok(())
    }

    fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let normalized = path.clean();
        if recursive {
            self.add_dir_chain(&normalized);
            return Ok(());
        }

        let parent = normalized.parent().unwrap_or(Path::new(""));
        if !self.is_dir(parent) {
            return Err(RuntimeError::Io(format!(
                "Failed to create directory {}: parent directory does not exist",
                path.display()
            )));
        }
        self.dirs.write().insert(normalized);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = path.clean();
        self.files.read().contains_key(&normalized) || self.dirs.read().contains(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_read_file() {
        let runtime = MemoryRuntime::new().with_file("/app/core/core.js", "console.log(1)");

        let content = runtime.read_file(Path::new("/app/core/core.js")).unwrap();
        assert_eq!(content, b"console.log(1)");
        assert!(runtime.exists(Path::new("/app/core")));
    }

    #[test]
    fn test_lookup_is_normalized() {
        let runtime = MemoryRuntime::new().with_file("/app/core/./core.js", "x");

        assert!(runtime.exists(Path::new("/app/panel/../core/core.js")));
    }

    #[test]
    fn test_missing_file() {
        let runtime = MemoryRuntime::new();
        let err = runtime.read_file(Path::new("/nope.js")).unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
    }

    #[test]
    fn test_write_requires_parent_dir() {
        let runtime = MemoryRuntime::new();
        let target = Path::new("/out/Panel/Panel_module.js");

        assert!(runtime.write_file(target, b"").is_err());

        runtime.create_dir(Path::new("/out/Panel"), true).unwrap();
        runtime.write_file(target, b"").unwrap();
        assert_eq!(runtime.file(target).unwrap(), b"");
    }

    #[test]
    fn test_clones_share_files() {
        let runtime = MemoryRuntime::new();
        let clone = runtime.clone();
        clone.add_file("/a.js", "a");

        assert_eq!(runtime.file_string("/a.js").as_deref(), Some("a"));
    }
}
