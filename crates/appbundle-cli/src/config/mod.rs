//! Release configuration with multi-source loading.
//!
//! Priority: CLI > Environment (`APPBUNDLE_*`) > File > Defaults.
//!
//! The file is `appbundle.config.json` in the input directory unless
//! `--config` names another one:
//!
//! ```json
//! {
//!   "minify": "syntax",
//!   "supportFiles": ["root.js", "RuntimeInstantiator.js"],
//!   "registry": { "namespace": "RootModule", "store": "Runtime.cachedResources", "method": "set" },
//!   "rollup": false
//! }
//! ```
//!
//! Nested environment keys use a double underscore, e.g.
//! `APPBUNDLE_REGISTRY__NAMESPACE`.

use std::path::{Path, PathBuf};

use appbundle_bundler::{DEFAULT_SUPPORT_FILES, MinifyLevel, RegistryBinding, ReleaseOptions};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{ConfigError, Result};

/// Default configuration file name, looked up in the input directory.
pub const CONFIG_FILE_NAME: &str = "appbundle.config.json";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "APPBUNDLE_";

/// Release settings that may come from a file or the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Minification level for every emitted script
    #[serde(default)]
    pub minify: MinifyLevel,

    /// Files copied from the input root to the output root after all builds
    #[serde(default = "default_support_files", alias = "support_files")]
    pub support_files: Vec<String>,

    /// Binding used by the emitted resource registrations
    #[serde(default)]
    pub registry: RegistryBinding,

    /// Rollup-style concatenation; recorded only
    #[serde(default)]
    pub rollup: bool,
}

fn default_support_files() -> Vec<String> {
    DEFAULT_SUPPORT_FILES.iter().map(|s| s.to_string()).collect()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            minify: MinifyLevel::default(),
            support_files: default_support_files(),
            registry: RegistryBinding::default(),
            rollup: false,
        }
    }
}

/// Values given on the command line; absent flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    minify: Option<MinifyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rollup: Option<bool>,
}

impl ReleaseConfig {
    /// Load the configuration for `args`.
    pub fn load(args: &Cli) -> Result<Self> {
        let overrides = CliOverrides {
            minify: args.minify,
            rollup: args.rollup,
        };
        let file = config_file(args.config.as_deref(), &args.input_path)?;
        Self::figment(file.as_deref(), overrides).extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                value: e.to_string(),
                hint: format!("Check {} and {}* variables", CONFIG_FILE_NAME, ENV_PREFIX),
            }
            .into()
        })
    }

    fn figment(file: Option<&Path>, overrides: CliOverrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Json::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
    }

    /// Options for a release from `input_dir` into `output_dir`.
    pub fn to_options(&self, input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> ReleaseOptions {
        ReleaseOptions::new(input_dir, output_dir)
            .minify(self.minify)
            .registry(self.registry.clone())
            .support_files(self.support_files.iter().cloned())
            .use_rollup(self.rollup)
    }
}

/// Resolve the configuration file: an explicit path must exist, the
/// default one is optional.
fn config_file(explicit: Option<&Path>, input_dir: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = input_dir.join(CONFIG_FILE_NAME);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}
