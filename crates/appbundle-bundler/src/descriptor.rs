//! Descriptor data model.
//!
//! These types are produced by a [`DescriptorResolver`](crate::DescriptorResolver)
//! and read, never mutated, by the release builder. Fields the builder does
//! not interpret are kept in `extra` maps and re-emitted verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Type tag of an application entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleType {
    /// Loaded unconditionally at startup and bundled into the entry script.
    Autostart,
    /// Any other tag, passed through untouched.
    Other(String),
}

impl From<String> for ModuleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "autostart" => Self::Autostart,
            _ => Self::Other(value),
        }
    }
}

impl From<ModuleType> for String {
    fn from(value: ModuleType) -> Self {
        match value {
            ModuleType::Autostart => "autostart".to_string(),
            ModuleType::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Autostart => write!(f, "autostart"),
            Self::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Per-module metadata read from `<module>/module.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique module name; also the module's directory under the input root.
    #[serde(default)]
    pub name: String,

    /// Names of modules that must be loaded first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Bundled source files, relative to the module directory.
    #[serde(rename = "modules", default, skip_serializing_if = "Vec::is_empty")]
    pub source_files: Vec<String>,

    /// Static resources, relative to the module directory.
    #[serde(rename = "resources", default, skip_serializing_if = "Vec::is_empty")]
    pub resource_files: Vec<String>,

    /// Remaining descriptor fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleDescriptor {
    /// Create a descriptor with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add dependencies.
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Add source files.
    pub fn with_source_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Add resource files.
    pub fn with_resource_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// File name of the module-specific legacy bundle, `<name>-legacy.js`.
    pub fn legacy_file_name(&self) -> String {
        format!("{}-legacy.js", self.name)
    }

    /// Whether the legacy bundle file is among the declared source files.
    pub fn has_legacy_file(&self) -> bool {
        let legacy = self.legacy_file_name();
        self.source_files.iter().any(|f| *f == legacy)
    }
}

fn deserialize_module_type<'de, D>(deserializer: D) -> Result<Option<ModuleType>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.filter(|t| !t.is_empty()).map(ModuleType::from))
}

/// One module as listed in an application descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub name: String,

    /// `null` and `""` read as no tag.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_module_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_type: Option<ModuleType>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApplicationEntry {
    /// A dynamic entry (no type tag).
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_type: None,
            extra: Map::new(),
        }
    }

    /// An autostart entry.
    pub fn autostart(name: impl Into<String>) -> Self {
        Self {
            module_type: Some(ModuleType::Autostart),
            ..Self::dynamic(name)
        }
    }

    pub fn is_autostart(&self) -> bool {
        self.module_type == Some(ModuleType::Autostart)
    }

    /// Dynamic entries carry no type tag at all and get their own bundle.
    pub fn is_dynamic(&self) -> bool {
        self.module_type.is_none()
    }
}

/// A resolved application: entries, module descriptors and their order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Application {
    pub name: String,

    /// Name of the application this one extends, if any.
    pub base: Option<String>,

    /// Entries of this application, in descriptor order.
    pub entries: Vec<ApplicationEntry>,

    /// Module descriptors keyed by module name.
    pub modules: IndexMap<String, ModuleDescriptor>,

    /// Module names such that every module's dependencies precede it.
    pub sorted_modules: Vec<String>,

    /// Top-level application descriptor fields other than `modules` and `extends`.
    pub extra: Map<String, Value>,
}

impl Application {
    /// Create an empty application.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark this application as extending `base`.
    pub fn extending(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Append a module. Modules must be added in dependency order.
    pub fn with_module(mut self, entry: ApplicationEntry, descriptor: ModuleDescriptor) -> Self {
        let name = entry.name.clone();
        let descriptor = ModuleDescriptor {
            name: name.clone(),
            ..descriptor
        };
        self.entries.push(entry);
        self.sorted_modules.push(name.clone());
        self.modules.insert(name, descriptor);
        self
    }

    /// Whether this application's entries are appended to a base application.
    pub fn extends(&self) -> bool {
        self.base.is_some()
    }

    pub fn entry(&self, name: &str) -> Option<&ApplicationEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    /// Script file of the application itself, `<name>.js`.
    pub fn script_file_name(&self) -> String {
        format!("{}.js", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_type_round_trips_through_strings() {
        let entry: ApplicationEntry =
            serde_json::from_value(json!({"name": "core", "type": "autostart"})).unwrap();
        assert!(entry.is_autostart());

        let entry: ApplicationEntry =
            serde_json::from_value(json!({"name": "remote", "type": "remote"})).unwrap();
        assert_eq!(entry.module_type, Some(ModuleType::Other("remote".into())));
        assert!(!entry.is_autostart());
        assert!(!entry.is_dynamic());

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"name": "remote", "type": "remote"})
        );
    }

    #[test]
    fn test_entry_without_type_is_dynamic() {
        let entry: ApplicationEntry =
            serde_json::from_value(json!({"name": "panel", "condition": "experiment"})).unwrap();
        assert!(entry.is_dynamic());
        assert_eq!(entry.extra["condition"], json!("experiment"));
    }

    #[test]
    fn test_empty_and_null_type_tags_are_dynamic() {
        for value in [json!({"name": "a", "type": ""}), json!({"name": "a", "type": null})] {
            let entry: ApplicationEntry = serde_json::from_value(value).unwrap();
            assert_eq!(entry.module_type, None);
            assert!(entry.is_dynamic());
            assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"name": "a"}));
        }
    }

    #[test]
    fn test_module_descriptor_keeps_unknown_fields() {
        let desc: ModuleDescriptor = serde_json::from_value(json!({
            "dependencies": ["core"],
            "modules": ["panel.js"],
            "resources": ["panel.css"],
            "extensions": [{"type": "view", "id": "panel"}]
        }))
        .unwrap();

        assert_eq!(desc.dependencies, vec!["core"]);
        assert_eq!(desc.source_files, vec!["panel.js"]);
        assert_eq!(desc.resource_files, vec!["panel.css"]);
        assert!(desc.extra.contains_key("extensions"));
    }

    #[test]
    fn test_legacy_file_detection() {
        let desc = ModuleDescriptor::new("panel").with_source_files(["panel.js", "panel-legacy.js"]);
        assert!(desc.has_legacy_file());

        let desc = ModuleDescriptor::new("panel").with_source_files(["panel.js"]);
        assert!(!desc.has_legacy_file());
    }

    #[test]
    fn test_with_module_preserves_order_and_names() {
        let app = Application::new("Shell")
            .with_module(ApplicationEntry::autostart("Core"), ModuleDescriptor::default())
            .with_module(ApplicationEntry::dynamic("Panel"), ModuleDescriptor::default());

        assert_eq!(app.sorted_modules, vec!["Core", "Panel"]);
        assert_eq!(app.module("Panel").unwrap().name, "Panel");
        assert!(!app.extends());
        assert_eq!(app.script_file_name(), "Shell.js");
    }
}
