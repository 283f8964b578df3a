//! Storage abstraction for template blobs.
//!
//! The catalog never reads files itself. It asks a [`TemplateRepository`] for
//! named blobs: the manifest plus one body per template. Two implementations
//! ship with the crate:
//!
//! - [`EmbeddedTemplateRepository`](super::EmbeddedTemplateRepository): the
//!   `templates/` folder compiled into the library
//! - [`InMemoryTemplateRepository`]: blobs handed over by the caller, used by
//!   hosts that bundle their own templates and by tests
//!
//! # Examples
//!
//! ```
//! use scaffold_catalog::core::templates::{InMemoryTemplateRepository, TemplateRepository};
//!
//! let repo = InMemoryTemplateRepository::new()
//!     .with_blob("manifest.yml", "templates: []\n")
//!     .with_blob("rules/empty.js", "function emptyRule() {}\n");
//!
//! assert!(repo.has_blob("rules/empty.js"));
//! assert_eq!(repo.blob_paths(), vec!["manifest.yml", "rules/empty.js"]);
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Where a repository's blobs come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the library
    Embedded,
    /// Supplied by the caller at runtime
    InMemory,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::InMemory => write!(f, "in-memory"),
        }
    }
}

/// Trait for reading template blobs from various sources.
///
/// Paths are `/`-separated and relative to the repository root, the same way
/// the manifest refers to them.
pub trait TemplateRepository: Send + Sync {
    /// Which kind of source this is, for diagnostics.
    fn source(&self) -> TemplateSource;

    /// Every blob path in the repository, sorted.
    fn blob_paths(&self) -> Vec<String>;

    /// Raw contents of the blob at `path`, or `None` if there is none.
    fn read_blob(&self, path: &str) -> Option<Cow<'_, [u8]>>;

    /// Check if a blob exists at the given path.
    fn has_blob(&self, path: &str) -> bool {
        self.read_blob(path).is_some()
    }
}

/// Repository backed by blobs held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateRepository {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl InMemoryTemplateRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blob, replacing any previous blob at the same path.
    pub fn with_blob(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add a blob in place, replacing any previous blob at the same path.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.blobs.insert(path.into(), contents.into());
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    fn source(&self) -> TemplateSource {
        TemplateSource::InMemory
    }

    fn blob_paths(&self) -> Vec<String> {
        self.blobs.keys().cloned().collect()
    }

    fn read_blob(&self, path: &str) -> Option<Cow<'_, [u8]>> {
        self.blobs
            .get(path)
            .map(|contents| Cow::Borrowed(contents.as_slice()))
    }
}
