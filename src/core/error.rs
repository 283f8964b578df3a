//! Error handling for the scaffold catalog.
//!
//! This module defines the error type `CatalogError` used throughout the crate,
//! along with a convenient `Result` type alias. Lookups fail with
//! [`CatalogError::NotFound`]; everything that can go wrong while loading the
//! catalog is reported as [`CatalogError::MalformedTemplate`].
//!
//! # Examples
//!
//! ```
//! use scaffold_catalog::core::error::{CatalogError, LookupKind, Result};
//!
//! fn must_exist(found: bool) -> Result<()> {
//!     if found {
//!         Ok(())
//!     } else {
//!         Err(CatalogError::not_found(LookupKind::Identifier, "nonexistent"))
//!     }
//! }
//!
//! assert!(must_exist(false).unwrap_err().is_not_found());
//! ```

use std::fmt;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// What a failed lookup was searching by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Template identifier, e.g. `ip-allow-list`
    Identifier,
    /// Category label, e.g. `rule`
    Category,
    /// Action trigger, e.g. `post-login`
    Trigger,
    /// Display title, e.g. `IP address allow list`
    Title,
}

impl LookupKind {
    /// Returns the kind as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Category => "category",
            Self::Trigger => "trigger",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Nothing in the catalog matches the requested key
    #[error("Template not found: no template with {kind} '{key}'")]
    NotFound {
        /// What the lookup searched by
        kind: LookupKind,
        /// The key that did not match
        key: String,
    },

    /// A template or the manifest describing it failed validation at load time
    #[error("Malformed template '{identifier}': {reason}")]
    MalformedTemplate {
        /// Identifier of the offending template (or the manifest path)
        identifier: String,
        /// Human readable validation failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(kind: LookupKind, key: S) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Create a new malformed-template error
    pub fn malformed<I: Into<String>, R: Into<String>>(identifier: I, reason: R) -> Self {
        Self::MalformedTemplate {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error reports a failed lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error reports a load-time validation failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedTemplate { .. })
    }
}
