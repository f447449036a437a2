//! Namespaces generated from the `core` scope
//!
//! Regenerate with `apigen generate --scope core` using `runtime_path =
//! "crate::client"`; `tests/generate_test.rs` fails when these drift from the
//! templates.
#![allow(clippy::too_many_arguments)]

pub mod authentication;
pub mod files;
pub mod users;

pub use authentication::Authentication;
pub use files::Files;
pub use users::Users;
