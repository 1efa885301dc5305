//! Error types for spec loading and factory construction.
//!
//! Resolution itself never fails. Errors only surface when a spec is built
//! from untyped input (YAML, JSON, files) or when a multi-field factory is
//! declared with a field name the output structure already uses.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing specs or factories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The source text is not valid YAML/JSON, or its root is not a mapping.
    #[error("failed to parse style spec{}: {message}", display_path(.path))]
    Parse {
        /// Source file, when the spec was loaded from disk.
        path: Option<PathBuf>,
        /// Message from the underlying parser.
        message: String,
    },

    /// A member of the spec has the wrong shape.
    #[error("invalid style spec at '{at}': {message}")]
    InvalidDefinition {
        /// Dotted path to the offending node, e.g. `variants.size.sm`.
        at: String,
        /// What was wrong.
        message: String,
    },

    /// A multi-field factory was declared with a reserved field name.
    #[error("field name '{name}' is reserved")]
    ReservedField { name: String },

    /// The spec file could not be read.
    #[error("failed to load style spec {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

impl SpecError {
    /// Attaches a source path to a parse error that has none yet.
    pub(crate) fn with_path(self, source: impl Into<PathBuf>) -> Self {
        match self {
            SpecError::Parse {
                path: None,
                message,
            } => SpecError::Parse {
                path: Some(source.into()),
                message,
            },
            other => other,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Result type for spec construction.
pub type Result<T> = std::result::Result<T, SpecError>;
