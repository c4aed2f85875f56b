//! appbundle CLI - release packaging for module-based front-end applications.
//!
//! - [`cli`] - argument definition
//! - [`config`] - configuration file and environment layering
//! - [`commands`] - the release build
//! - [`error`] - error types and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and the release summary

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
