//! Core configuration and error types shared across the generator.

pub mod config;
pub mod error;

pub use config::{GeneratorConfig, ScopeConfig};
pub use error::{ErrorKind, GeneratorError, Result};
