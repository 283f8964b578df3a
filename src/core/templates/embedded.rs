//! Embedded template repository.
//!
//! This module provides access to the templates compiled into the library, so
//! a host tool can scaffold immediately without shipping separate files.
//!
//! # Architecture
//!
//! The module uses the `rust-embed` crate to include every file under the
//! crate's `templates/` directory at compile time. The directory carries
//! `manifest.yml` at its root and the bodies it references below it:
//!
//! ```text
//! templates/
//!   manifest.yml
//!   actions/post-change-password.js
//!   rules/ip-allow-list.js
//!   branding/storybook/branding-customization-notification.js
//! ```

use std::borrow::Cow;

use rust_embed::RustEmbed;

use super::repository::{TemplateRepository, TemplateSource};

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Implementation of `TemplateRepository` that reads from embedded resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateRepository;

impl EmbeddedTemplateRepository {
    /// Create a new embedded template repository.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRepository for EmbeddedTemplateRepository {
    fn source(&self) -> TemplateSource {
        TemplateSource::Embedded
    }

    fn blob_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = EmbeddedTemplates::iter()
            .map(|path| path.into_owned())
            .collect();

        // Sort by path for consistent ordering
        paths.sort();
        paths
    }

    fn read_blob(&self, path: &str) -> Option<Cow<'_, [u8]>> {
        EmbeddedTemplates::get(path).map(|file| file.data)
    }
}
