//! apigen - generate thin namespaced REST clients from OpenAPI documents.
//!
//! The [`generation`] module holds the pipeline (reference resolution,
//! namespace pruning, parameter curation, emitters, manifest), the
//! [`infrastructure`] module its loaders, templates and file output, and
//! [`client`] the runtime generated code calls into.
#![deny(unsafe_code)]

pub mod client;
pub mod core;
pub mod generation;
pub mod infrastructure;
