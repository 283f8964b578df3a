//! Scaffold Catalog
//!
//! A read-only catalog of scaffold templates: handler boilerplate for action
//! triggers, legacy authorization rule snippets, and a documentation UI
//! snippet. Templates are embedded at compile time and served byte-for-byte
//! to a host tool that writes them into user projects.
//!
//! ```
//! use scaffold_catalog::{Catalog, Category};
//!
//! let catalog = Catalog::builtin()?;
//! let rule = catalog.get("ip-allow-list")?;
//! assert_eq!(rule.category(), Category::Rule);
//! # Ok::<(), scaffold_catalog::CatalogError>(())
//! ```
#![deny(unsafe_code)]

pub mod application;
pub mod core;

pub use crate::core::error::{CatalogError, LookupKind, Result};
pub use crate::core::templates::{
    Catalog, CatalogBuilder, CatalogOptions, Category, EmbeddedTemplateRepository,
    InMemoryTemplateRepository, PickerOption, Runtime, Template, TemplateMetadata,
    TemplateRepository, TemplateSpec, Trigger,
};
