//! Template catalog for scaffolding.
//!
//! This module provides the catalog a host tool uses to look up scaffold
//! templates: action handler boilerplate, legacy rule snippets and the branding
//! notification snippet. It includes blob storage, manifest parsing, header
//! annotation parsing and the read-only catalog itself.
//!
//! The template system supports:
//! - Templates embedded in the library at compile time
//! - Caller-supplied templates held in memory
//! - Lookup by identifier, category, trigger and title
//! - Typed metadata parsed from manifest entries and header annotations

pub mod annotations;
pub mod catalog;
pub mod embedded;
pub mod kind;
pub mod manifest;
pub mod options;
pub mod repository;
pub mod types;

pub use annotations::*;
pub use catalog::*;
pub use embedded::*;
pub use kind::*;
pub use manifest::*;
pub use options::*;
pub use repository::*;
pub use types::*;
