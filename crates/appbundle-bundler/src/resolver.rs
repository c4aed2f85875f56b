//! Descriptor resolution.
//!
//! The release builder never walks the dependency graph itself. It asks a
//! [`DescriptorResolver`] for an [`Application`] whose `sorted_modules`
//! already lists every module after its dependencies.
//!
//! [`JsonDescriptorLoader`] is the file-based resolver used by the CLI. It
//! reads
//!
//! ```text
//! <input>/<app>.json            {"modules": [{"name": "core", "type": "autostart"}, ...],
//!                                "extends": "base_app", ...metadata}
//! <input>/<module>/module.json  {"dependencies": [...], "modules": [...], "resources": [...], ...}
//! ```
//!
//! and expects the entries of each application to be listed in dependency
//! order. It checks that order but does not compute one.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::descriptor::{Application, ApplicationEntry, ModuleDescriptor};
use crate::runtime::Runtime;
use crate::{Error, Result};

/// File name of a module descriptor inside its module directory.
pub const MODULE_DESCRIPTOR_FILE: &str = "module.json";

/// Source of resolved applications.
pub trait DescriptorResolver: Send + Sync + std::fmt::Debug {
    /// Load `name` with its modules in dependency order.
    fn load_application(&self, name: &str) -> Result<Application>;
}

#[derive(Debug, Deserialize)]
struct RawApplicationDescriptor {
    #[serde(default)]
    modules: Vec<ApplicationEntry>,
    #[serde(default)]
    extends: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Resolver reading JSON descriptors from an input directory.
#[derive(Debug, Clone)]
pub struct JsonDescriptorLoader {
    input_dir: PathBuf,
    runtime: Arc<dyn Runtime>,
}

impl JsonDescriptorLoader {
    pub fn new(input_dir: impl Into<PathBuf>, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            input_dir: input_dir.into(),
            runtime,
        }
    }

    pub fn application_descriptor_path(&self, name: &str) -> PathBuf {
        self.input_dir.join(format!("{}.json", name))
    }

    pub fn module_descriptor_path(&self, module: &str) -> PathBuf {
        self.input_dir.join(module).join(MODULE_DESCRIPTOR_FILE)
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let text = self.runtime.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::InvalidDescriptor {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_application(&self, name: &str) -> Result<RawApplicationDescriptor> {
        self.read_json(&self.application_descriptor_path(name))
    }

    /// Module names of every application `base` extends, `base` included.
    fn base_module_names(&self, application: &str, base: &str) -> Result<HashSet<String>> {
        let mut names = HashSet::new();
        let mut visited = vec![application.to_string()];
        let mut next = Some(base.to_string());

        while let Some(current) = next {
            if visited.contains(&current) {
                return Err(Error::ExtendsCycle(application.to_string()));
            }
            let raw = self.read_application(&current)?;
            for entry in raw.modules {
                if !names.insert(entry.name.clone()) {
                    return Err(Error::DuplicateModule {
                        module: entry.name,
                        application: current.clone(),
                    });
                }
            }
            visited.push(current);
            next = raw.extends;
        }

        Ok(names)
    }
}

impl DescriptorResolver for JsonDescriptorLoader {
    fn load_application(&self, name: &str) -> Result<Application> {
        let raw = self.read_application(name)?;
        let base_modules = match &raw.extends {
            Some(base) => self.base_module_names(name, base)?,
            None => HashSet::new(),
        };

        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (index, entry) in raw.modules.iter().enumerate() {
            if base_modules.contains(&entry.name)
                || positions.insert(entry.name.as_str(), index).is_some()
            {
                return Err(Error::DuplicateModule {
                    module: entry.name.clone(),
                    application: name.to_string(),
                });
            }
        }

        let mut modules = IndexMap::with_capacity(raw.modules.len());
        for (index, entry) in raw.modules.iter().enumerate() {
            let mut descriptor: ModuleDescriptor =
                self.read_json(&self.module_descriptor_path(&entry.name))?;
            descriptor.name = entry.name.clone();

            for dependency in &descriptor.dependencies {
                match positions.get(dependency.as_str()) {
                    Some(&position) if position < index => {}
                    Some(_) => {
                        return Err(Error::DependencyOrder {
                            module: entry.name.clone(),
                            dependency: dependency.clone(),
                            application: name.to_string(),
                        });
                    }
                    None if base_modules.contains(dependency) => {}
                    None => {
                        return Err(Error::UnknownDependency {
                            module: entry.name.clone(),
                            dependency: dependency.clone(),
                            application: name.to_string(),
                        });
                    }
                }
            }

            modules.insert(entry.name.clone(), descriptor);
        }

        tracing::debug!(application = name, modules = modules.len(), "Loaded descriptors");

        Ok(Application {
            name: name.to_string(),
            base: raw.extends,
            sorted_modules: raw.modules.iter().map(|e| e.name.clone()).collect(),
            entries: raw.modules,
            modules,
            extra: raw.extra,
        })
    }
}
