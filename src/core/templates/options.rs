//! Configuration options for loading the catalog.
//!
//! This module provides the [`CatalogOptions`] struct which controls how a
//! catalog is assembled from a repository:
//!
//! - Which blob holds the manifest
//! - Whether unknown header annotations are an error
//! - Which categories are loaded at all
//!
//! # Example
//!
//! ```rust
//! use scaffold_catalog::core::templates::{CatalogOptions, Category};
//!
//! let options = CatalogOptions {
//!     categories: vec![Category::Rule],
//!     ..Default::default()
//! };
//! assert!(options.strict_annotations);
//! assert!(options.includes(Category::Rule));
//! assert!(!options.includes(Category::Branding));
//! ```

use crate::core::error::{CatalogError, Result};

use super::kind::Category;

/// Default path of the manifest inside a repository
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.yml";

/// Environment variable overriding [`CatalogOptions::manifest_path`]
pub const ENV_MANIFEST: &str = "SCAFFOLD_CATALOG_MANIFEST";
/// Environment variable overriding [`CatalogOptions::strict_annotations`]
pub const ENV_STRICT_ANNOTATIONS: &str = "SCAFFOLD_CATALOG_STRICT_ANNOTATIONS";
/// Environment variable overriding [`CatalogOptions::categories`]
pub const ENV_CATEGORIES: &str = "SCAFFOLD_CATALOG_CATEGORIES";

/// Options controlling how a catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Path of the manifest blob, relative to the repository root
    pub manifest_path: String,

    /// Reject header annotations the catalog does not understand
    pub strict_annotations: bool,

    /// Categories to load; empty loads everything
    pub categories: Vec<Category>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            strict_annotations: true,
            categories: Vec::new(),
        }
    }
}

impl CatalogOptions {
    /// Build options from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary key lookup, starting from the defaults.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(ENV_MANIFEST) {
            options.manifest_path = path.trim().to_string();
        }

        if let Some(flag) = get(ENV_STRICT_ANNOTATIONS) {
            options.strict_annotations = parse_flag(ENV_STRICT_ANNOTATIONS, &flag)?;
        }

        if let Some(list) = get(ENV_CATEGORIES) {
            options.categories = list
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(|label| {
                    label.parse::<Category>().map_err(|_| {
                        CatalogError::config(format!("{ENV_CATEGORIES}: unknown category '{label}'"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
        }

        Ok(options)
    }

    /// Whether templates of `category` should be loaded
    pub fn includes(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(CatalogError::config(format!(
            "{key}: expected true, false, 1 or 0, got '{other}'"
        ))),
    }
}
