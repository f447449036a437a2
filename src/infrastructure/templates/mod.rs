//! Template registry and the filters generated code relies on

pub mod filters;
pub mod registry;

pub use registry::{BUILTIN_TEMPLATES, TemplateRegistry};
