//! Core catalog types: errors and templates.

pub mod error;
pub mod templates;

pub use error::{CatalogError, LookupKind, Result};
