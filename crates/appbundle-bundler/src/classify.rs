//! Module classification and the autostart ordering invariant.
//!
//! Autostart modules run eagerly when the application loads, so none of them
//! may depend on a module that is only loaded on demand.

use std::collections::BTreeSet;

use crate::descriptor::Application;
use crate::{Error, Result};

/// Modules of an application partitioned by how they are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleClasses {
    /// Autostart modules, in dependency order.
    pub autostart: Vec<String>,
    /// Modules without a type tag, in dependency order. Each gets its own bundle.
    pub dynamic: Vec<String>,
}

/// Partition `app`'s modules and enforce the ordering invariant.
///
/// Walks modules in dependency order keeping the set of non-autostart modules
/// seen so far. The first autostart module depending on any of them fails the
/// whole classification.
pub fn classify(app: &Application) -> Result<ModuleClasses> {
    let mut classes = ModuleClasses::default();
    let mut non_autostart: BTreeSet<&str> = BTreeSet::new();

    for name in &app.sorted_modules {
        let unknown = || Error::UnknownModule {
            module: name.clone(),
            application: app.name.clone(),
        };
        let entry = app.entry(name).ok_or_else(unknown)?;
        let descriptor = app.module(name).ok_or_else(unknown)?;

        if entry.is_autostart() {
            let offending: BTreeSet<String> = descriptor
                .dependencies
                .iter()
                .filter(|dep| non_autostart.contains(dep.as_str()))
                .cloned()
                .collect();
            if !offending.is_empty() {
                return Err(Error::NonAutostartDependency {
                    module: name.clone(),
                    dependencies: offending,
                });
            }
            classes.autostart.push(name.clone());
        } else {
            non_autostart.insert(name.as_str());
            if entry.is_dynamic() {
                classes.dynamic.push(name.clone());
            }
        }
    }

    tracing::debug!(
        application = %app.name,
        autostart = classes.autostart.len(),
        dynamic = classes.dynamic.len(),
        "Classified modules"
    );

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ApplicationEntry, ModuleDescriptor, ModuleType};

    #[test]
    fn test_autostart_depending_on_dynamic_fails() {
        let app = Application::new("Shell")
            .with_module(ApplicationEntry::dynamic("B"), ModuleDescriptor::default())
            .with_module(
                ApplicationEntry::autostart("A"),
                ModuleDescriptor::default().with_dependencies(["B"]),
            );

        match classify(&app).unwrap_err() {
            Error::NonAutostartDependency {
                module,
                dependencies,
            } => {
                assert_eq!(module, "A");
                assert_eq!(dependencies, BTreeSet::from(["B".to_string()]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_autostart_depending_on_autostart_succeeds() {
        let app = Application::new("Shell")
            .with_module(ApplicationEntry::autostart("C"), ModuleDescriptor::default())
            .with_module(
                ApplicationEntry::autostart("A"),
                ModuleDescriptor::default().with_dependencies(["C"]),
            );

        let classes = classify(&app).unwrap();
        assert_eq!(classes.autostart, vec!["C", "A"]);
        assert!(classes.dynamic.is_empty());
    }

    #[test]
    fn test_reports_every_offending_dependency() {
        let app = Application::new("Shell")
            .with_module(ApplicationEntry::autostart("Core"), ModuleDescriptor::default())
            .with_module(ApplicationEntry::dynamic("X"), ModuleDescriptor::default())
            .with_module(ApplicationEntry::dynamic("Y"), ModuleDescriptor::default())
            .with_module(
                ApplicationEntry::autostart("A"),
                ModuleDescriptor::default().with_dependencies(["Y", "Core", "X"]),
            );

        let err = classify(&app).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Non-autostart dependencies specified for the autostarted module \"A\": {X, Y}"
        );
    }

    #[test]
    fn test_other_type_tags_are_neither_autostart_nor_dynamic() {
        let remote = ApplicationEntry {
            module_type: Some(ModuleType::Other("remote".into())),
            ..ApplicationEntry::dynamic("R")
        };
        let app = Application::new("Shell")
            .with_module(remote, ModuleDescriptor::default())
            .with_module(ApplicationEntry::dynamic("D"), ModuleDescriptor::default());

        let classes = classify(&app).unwrap();
        assert!(classes.autostart.is_empty());
        assert_eq!(classes.dynamic, vec!["D"]);
    }

    #[test]
    fn test_other_type_tag_counts_as_non_autostart_dependency() {
        let remote = ApplicationEntry {
            module_type: Some(ModuleType::Other("remote".into())),
            ..ApplicationEntry::dynamic("R")
        };
        let app = Application::new("Shell")
            .with_module(remote, ModuleDescriptor::default())
            .with_module(
                ApplicationEntry::autostart("A"),
                ModuleDescriptor::default().with_dependencies(["R"]),
            );

        assert!(matches!(
            classify(&app),
            Err(Error::NonAutostartDependency { .. })
        ));
    }

    #[test]
    fn test_dependencies_outside_the_application_are_ignored() {
        let app = Application::new("Worker").extending("Shell").with_module(
            ApplicationEntry::autostart("A"),
            ModuleDescriptor::default().with_dependencies(["BaseModule"]),
        );

        assert_eq!(classify(&app).unwrap().autostart, vec!["A"]);
    }

    #[test]
    fn test_unknown_module_in_order() {
        let mut app = Application::new("Shell");
        app.sorted_modules.push("Ghost".into());

        assert!(matches!(classify(&app), Err(Error::UnknownModule { .. })));
    }
}
