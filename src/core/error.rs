//! Error handling for the apigen code generator.
//!
//! This module defines the main error type `GeneratorError` used throughout the
//! library, along with a convenient `Result` type alias. Every error maps onto a
//! closed [`ErrorKind`] so the CLI can turn it into a process exit status.
//!
//! # Examples
//!
//! ```
//! use apigen::core::error::{ErrorKind, GeneratorError};
//!
//! let err = GeneratorError::reference_unresolved("#/components/parameters/Missing");
//! assert_eq!(err.kind(), ErrorKind::ReferenceUnresolved);
//! assert_eq!(err.kind().exit_code(), 11);
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Coarse classification of a generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The specification document could not be fetched or read
    SpecFetchFailed,
    /// A `$ref` could not be found in the reference table
    ReferenceUnresolved,
    /// Anything else: malformed input, I/O, templates, configuration
    Other,
}

impl ErrorKind {
    /// Process exit status for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::SpecFetchFailed => 10,
            ErrorKind::ReferenceUnresolved => 11,
            ErrorKind::Other => 1,
        }
    }
}

/// Main error type for generation operations
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Spec source answered with something other than a usable document
    #[error("could not fetch spec at {source_url}: {reason}")]
    SpecFetchFailed { source_url: String, reason: String },

    /// Reference missing from the lookup table
    #[error("could not resolve reference {0} in the lookup")]
    ReferenceUnresolved(String),

    /// Structurally invalid specification document
    #[error("invalid specification: {0}")]
    InvalidDocument(String),

    /// Failure writing generated output
    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeneratorError {
    /// Create a new fetch error
    pub fn spec_fetch<U: Into<String>, R: Into<String>>(source_url: U, reason: R) -> Self {
        Self::SpecFetchFailed {
            source_url: source_url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unresolved reference error
    pub fn reference_unresolved<S: Into<String>>(reference: S) -> Self {
        Self::ReferenceUnresolved(reference.into())
    }

    /// Create a new invalid document error
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SpecFetchFailed { .. } => ErrorKind::SpecFetchFailed,
            Self::ReferenceUnresolved(_) => ErrorKind::ReferenceUnresolved,
            _ => ErrorKind::Other,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
