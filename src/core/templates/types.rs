//! Template values handed out by the catalog.
//!
//! A [`Template`] is immutable once loaded: fields are private, and the body
//! is shared behind an `Arc<str>` so cloning a template never copies its text.

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use super::kind::{Category, Runtime, Trigger};

/// Typed metadata attached to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateMetadata {
    /// One line summary, from `@overview` or the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    /// Whether the template is featured in a gallery
    pub gallery: bool,

    /// Free-form tags, de-duplicated, in first-seen order
    pub tags: Vec<String>,

    /// Action trigger the template is written for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,

    /// Runtime the action template targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,

    /// `@title` annotation, when it differs from the display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_title: Option<String>,
}

/// A named, static unit of scaffold text.
///
/// # Examples
///
/// ```
/// use scaffold_catalog::core::templates::{CatalogBuilder, Category};
///
/// let catalog = CatalogBuilder::new()
///     .add(
///         "ip-allow-list",
///         Category::Rule,
///         "IP address allow list",
///         "function ipAddressAllowList(user, context, callback) {}\n",
///     )
///     .unwrap()
///     .build();
///
/// let template = catalog.get("ip-allow-list").unwrap();
/// let mut out = Vec::new();
/// template.write_to(&mut out).unwrap();
/// assert_eq!(out, template.body().as_bytes());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    identifier: String,
    category: Category,
    title: String,
    body: Arc<str>,
    metadata: TemplateMetadata,
}

impl Template {
    pub(crate) fn new(
        identifier: String,
        category: Category,
        title: String,
        body: Arc<str>,
        metadata: TemplateMetadata,
    ) -> Self {
        Self {
            identifier,
            category,
            title,
            body,
            metadata,
        }
    }

    /// Unique key, e.g. `ip-allow-list`
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Display title, e.g. `IP address allow list`
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The exact source text
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// Write the body, byte-for-byte, to `dest`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the sink.
    pub fn write_to<W: Write + ?Sized>(&self, dest: &mut W) -> io::Result<()> {
        dest.write_all(self.body.as_bytes())
    }
}

/// One entry of an interactive template picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    /// Text shown to the user
    pub label: String,
    /// Identifier to pass to [`Catalog::get`](super::Catalog::get)
    pub identifier: String,
}
