//! Error types for values documentation extraction.
//!
//! Provides a unified error type covering the fatal failure modes: I/O,
//! YAML and JSON (de)serialization, tag pattern compilation, unknown
//! modifiers, and README documents without a parameters section.

use thiserror::Error;

/// Errors that can occur while extracting or rendering values documentation.
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tag pattern built from the configuration did not compile.
    #[error("invalid tag pattern: {0}")]
    InvalidPattern(String),

    /// A parameter carries a modifier that is not configured.
    #[error("unknown modifier '{modifier}' for parameter {parameter}")]
    UnknownModifier { modifier: String, parameter: String },

    /// The README has no heading matching the parameters section title.
    #[error("README has no '{0}' section")]
    MissingParametersSection(String),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
