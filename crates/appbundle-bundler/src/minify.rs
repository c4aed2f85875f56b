//! JavaScript minification.
//!
//! Every emitted artifact and every inlined source file passes through a
//! [`JsMinifier`]. The default implementation is [`OxcMinifier`], whose
//! aggressiveness is selected with a [`MinifyLevel`].

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Validated minification level.
///
/// Controls how aggressively JavaScript code is minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MinifyLevel {
    /// No minification - output is emitted as assembled.
    None,
    /// Remove whitespace and comments only.
    #[default]
    Whitespace,
    /// Syntax-level optimizations (property names preserved).
    Syntax,
    /// Full minification including identifier mangling.
    Identifiers,
}

impl MinifyLevel {
    /// Parse a minification level from a string.
    ///
    /// # Supported Values
    ///
    /// - `"none"` - No minification
    /// - `"whitespace"` - Remove whitespace only
    /// - `"syntax"` - Syntax-level minification
    /// - `"identifiers"` - Full minification with identifier mangling
    ///
    /// Values are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use appbundle_bundler::MinifyLevel;
    ///
    /// assert_eq!(MinifyLevel::parse("none").unwrap(), MinifyLevel::None);
    /// assert_eq!(MinifyLevel::parse("IDENTIFIERS").unwrap(), MinifyLevel::Identifiers);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for unrecognized values.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "whitespace" => Ok(Self::Whitespace),
            "syntax" => Ok(Self::Syntax),
            "identifiers" | "true" => Ok(Self::Identifiers),
            _ => Err(Error::InvalidConfig(format!(
                "Invalid minify level: '{}'. Expected: none, whitespace, syntax, identifiers",
                s
            ))),
        }
    }

    /// Returns true if any minification is enabled.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    fn minifier_options(self) -> Option<MinifierOptions> {
        match self {
            Self::None | Self::Whitespace => None,
            Self::Syntax => Some(MinifierOptions {
                mangle: None,
                compress: Some(CompressOptions::default()),
                ..MinifierOptions::default()
            }),
            Self::Identifiers => Some(MinifierOptions {
                mangle: Some(MangleOptions::default()),
                compress: Some(CompressOptions::default()),
                ..MinifierOptions::default()
            }),
        }
    }
}

impl std::fmt::Display for MinifyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Syntax => write!(f, "syntax"),
            Self::Identifiers => write!(f, "identifiers"),
        }
    }
}

impl std::str::FromStr for MinifyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MinifyLevel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<MinifyLevel> for String {
    fn from(value: MinifyLevel) -> Self {
        value.to_string()
    }
}

/// Failure reported by a minifier, without artifact context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MinifyError {
    pub message: String,
}

impl MinifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A pure `source -> output` transformation applied to emitted code.
pub trait JsMinifier: Send + Sync + std::fmt::Debug {
    fn minify(&self, source: &str) -> std::result::Result<String, MinifyError>;
}

/// Minifier built on the oxc parser, minifier and code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcMinifier {
    level: MinifyLevel,
}

impl OxcMinifier {
    pub fn new(level: MinifyLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> MinifyLevel {
        self.level
    }
}

impl JsMinifier for OxcMinifier {
    fn minify(&self, source: &str) -> std::result::Result<String, MinifyError> {
        if !self.level.is_enabled() {
            return Ok(source.to_string());
        }

        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MinifyError::new(if message.is_empty() {
                "parser aborted".to_string()
            } else {
                message
            }));
        }

        let mut program = parsed.program;
        let scoping = self
            .level
            .minifier_options()
            .and_then(|options| Minifier::new(options).minify(&allocator, &mut program).scoping);

        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

/// Minify `source`, attaching `context` (usually a file name) to failures.
pub(crate) fn minify_with_context(
    minifier: &dyn JsMinifier,
    source: &str,
    context: impl Into<String>,
) -> Result<String> {
    minifier.minify(source).map_err(|source| Error::Minify {
        context: context.into(),
        source,
    })
}
