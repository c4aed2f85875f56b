//! Resource encoding.
//!
//! Resource files (HTML, Markdown, CSS, SVG, ...) are baked into emitted
//! scripts as string literals and registered with the runtime resource store
//! under their normalized path:
//!
//! ```text
//! RootModule.Runtime.cachedResources.set("panel/icon.svg", "<svg>...</svg>\n/*# sourceURL=panel/icon.svg */");
//! ```

use std::path::Path;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::runtime::Runtime;
use crate::Result;

/// Where the emitted registration statements put resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryBinding {
    /// Namespace binding created by the import statement.
    pub namespace: String,
    /// Keyed store expression, relative to the namespace.
    pub store: String,
    /// Method called on the store with `(path, content)`.
    pub method: String,
    /// Module providing the namespace, relative to the output root.
    pub module: String,
}

impl Default for RegistryBinding {
    fn default() -> Self {
        Self {
            namespace: "RootModule".to_string(),
            store: "Runtime.cachedResources".to_string(),
            method: "set".to_string(),
            module: "root/root.js".to_string(),
        }
    }
}

impl RegistryBinding {
    /// Import statement binding the namespace; `prefix` is `./` for the
    /// entry script and `../` for module bundles.
    pub fn import_statement(&self, prefix: &str) -> String {
        format!(
            "import * as {} from '{}{}';",
            self.namespace, prefix, self.module
        )
    }

    /// Registration statement for already escaped content.
    pub fn registration_statement(&self, path: &str, escaped_content: &str) -> String {
        format!(
            "{}.{}.{}(\"{}\", \"{}\");\n",
            self.namespace,
            self.store,
            self.method,
            escape_string_literal(path),
            escaped_content
        )
    }
}

/// Join a resource onto its module directory and normalize it to
/// forward-slash form.
pub fn normalize_resource_path(module: &str, resource: &str) -> String {
    let joined = Path::new(module).join(resource).clean();
    joined.to_string_lossy().replace('\\', "/")
}

/// Debug trailer mapping embedded text back to its file.
pub fn source_url_trailer(path: &str) -> String {
    format!("\n/*# sourceURL={} */", path)
}

/// HTML and Markdown would be corrupted by a comment trailer.
fn takes_source_url(path: &str) -> bool {
    !(path.ends_with(".html") || path.ends_with(".md"))
}

/// Escape `content` for a double-quoted string literal.
///
/// Backslashes go first so the escapes added afterwards are not escaped again.
pub fn escape_string_literal(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('"', "\\\"")
}

/// Exact inverse of [`escape_string_literal`].
pub fn unescape_string_literal(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Encodes resources of one application into registration statements.
#[derive(Debug)]
pub struct ResourceEncoder<'a> {
    runtime: &'a dyn Runtime,
    application_dir: &'a Path,
    binding: &'a RegistryBinding,
}

impl<'a> ResourceEncoder<'a> {
    pub fn new(
        runtime: &'a dyn Runtime,
        application_dir: &'a Path,
        binding: &'a RegistryBinding,
    ) -> Self {
        Self {
            runtime,
            application_dir,
            binding,
        }
    }

    /// Registration statement for one resource of `module`.
    pub fn encode(&self, module: &str, resource: &str) -> Result<String> {
        let path = normalize_resource_path(module, resource);
        let mut content = self.runtime.read_to_string(&self.application_dir.join(&path))?;
        if takes_source_url(&path) {
            content.push_str(&source_url_trailer(&path));
        }
        Ok(self
            .binding
            .registration_statement(&path, &escape_string_literal(&content)))
    }

    /// Registration statements for every resource of `module`, in declared order.
    pub fn encode_all<S: AsRef<str>>(&self, module: &str, resources: &[S]) -> Result<Vec<String>> {
        resources
            .iter()
            .map(|resource| self.encode(module, resource.as_ref()))
            .collect()
    }
}
