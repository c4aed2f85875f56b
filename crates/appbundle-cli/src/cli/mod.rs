//! Command-line interface definition.
//!
//! ```text
//! appbundle app_1 ... app_N --input_path <dir> --output_path <dir> [--rollup [true|false]]
//! ```

mod validation;

use std::path::PathBuf;

use appbundle_bundler::MinifyLevel;
use clap::Parser;

pub use validation::{parse_application_name, parse_minify_level};

/// Release packaging for module-based front-end applications
#[derive(Parser, Debug)]
#[command(
    name = "appbundle",
    version,
    about = "Builds release bundles for module-based front-end applications",
    long_about = "Builds one entry script per application and one bundle per on-demand module,\n\
                  inlining module resources and minifying every emitted script."
)]
pub struct Cli {
    /// Applications to build, in order
    #[arg(required = true, value_name = "APP", value_parser = parse_application_name)]
    pub applications: Vec<String>,

    /// Front-end root holding application and module descriptors
    #[arg(long = "input_path", value_name = "DIR")]
    pub input_path: PathBuf,

    /// Directory receiving the release artifacts
    #[arg(long = "output_path", value_name = "DIR")]
    pub output_path: PathBuf,

    /// Use rollup-style concatenation for module sources
    ///
    /// Accepted for compatibility; the emitted artifacts are the same.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub rollup: Option<bool>,

    /// Minification level: none, whitespace, syntax or identifiers
    #[arg(long, value_name = "LEVEL", value_parser = parse_minify_level)]
    pub minify: Option<MinifyLevel>,

    /// Configuration file (defaults to appbundle.config.json in the input directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
