//! Manifest file format for the scaffold catalog.
//!
//! This module defines the structure of the `manifest.yml` file that declares
//! which blobs the catalog serves and how each one is classified. Values are
//! kept as raw strings here; the catalog validates them into typed fields when
//! it loads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tracing::debug;

use crate::core::error::{CatalogError, Result};

/// The root manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    /// Declared templates, in file order
    #[serde(default)]
    pub templates: Vec<ManifestEntry>,
}

/// Declares a single template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Unique identifier, e.g. `ip-allow-list`
    pub id: String,

    /// Category label, e.g. `rule`
    pub category: String,

    /// Display title shown in listings and pickers
    pub title: String,

    /// Path of the body blob, relative to the manifest
    pub source: String,

    /// Runtime for action templates, e.g. `node18`
    #[serde(default)]
    pub runtime: Option<String>,

    /// Overview used when the body carries no `@overview` annotation
    #[serde(default)]
    pub overview: Option<String>,

    /// Gallery flag used when the body carries no `@gallery` annotation
    #[serde(default)]
    pub gallery: Option<bool>,

    /// Extra tags, either a single string or a list
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

/// Parse manifest YAML content.
///
/// `manifest_path` only labels errors.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedTemplate`] when the content is not a valid
/// manifest.
pub fn parse_manifest_yaml(content: &str, manifest_path: &str) -> Result<CatalogManifest> {
    debug!(
        manifest_path = %manifest_path,
        content_length = content.len(),
        "Parsing catalog manifest"
    );

    serde_yaml::from_str(content).map_err(|e| {
        CatalogError::malformed(manifest_path, format!("invalid manifest YAML: {e}"))
    })
}

/// Helper function to deserialize either a single tag or a list of tags
fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.push(s);
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
