//! Application layer error types

use thiserror::Error;

use crate::core::error::CatalogError;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApplicationError {
    /// Whether the underlying failure was a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(e) if e.is_not_found())
    }
}
