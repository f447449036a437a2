//! Generation domain module - turns a specification document into
//! namespace files and a manifest
//!
//! The pipeline per scope: resolve references, prune namespaces, curate each
//! operation's parameters, emit namespace declarations and endpoint methods,
//! then write the manifest.

pub mod context;
pub mod curator;
pub mod endpoint_emitter;
pub mod manifest;
pub mod namespace_emitter;
pub mod namespaces;
pub mod orchestrator;
pub mod references;
pub mod renames;
pub mod rules;
pub mod sanitizers;
pub mod traits;
pub mod types;
pub mod utils;

pub use context::*;
pub use orchestrator::*;
pub use references::ReferenceTable;
pub use traits::*;
pub use types::*;
