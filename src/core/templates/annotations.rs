//! Header annotations embedded in template bodies.
//!
//! Gallery templates describe themselves in their leading doc comment:
//!
//! ```text
//! /**
//!  * @title Email domain allow list
//!  * @overview Only allow access to users with specific allow list email domains.
//!  * @gallery true
//!  * @category access control
//!  */
//! ```
//!
//! [`parse_annotations`] turns that block into a [`TemplateAnnotations`] record.
//! Only the first `/** ... */` block is inspected, and only when it opens the
//! body. JSDoc tags such as `@param` are documentation for the scaffolded code
//! and are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::core::error::{CatalogError, Result};

static ANNOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\*?\s*@([A-Za-z]+)(?:\s+(.*?))?\s*$").expect("annotation pattern is valid")
});

/// JSDoc tags that document the handler rather than the template
const JSDOC_TAGS: &[&str] = &[
    "param", "returns", "return", "type", "typedef", "see", "example", "throws",
];

/// Typed view of a template's header annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateAnnotations {
    /// `@title`
    pub title: Option<String>,
    /// `@overview`
    pub overview: Option<String>,
    /// `@gallery`
    pub gallery: Option<bool>,
    /// Every `@category`, in order of appearance
    pub categories: Vec<String>,
}

impl TemplateAnnotations {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.overview.is_none()
            && self.gallery.is_none()
            && self.categories.is_empty()
    }
}

/// Parse the leading doc comment of `body`.
///
/// `identifier` is only used to label errors. With `strict` set, tags that are
/// neither catalog annotations nor JSDoc fail the parse; otherwise they are
/// logged and skipped.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedTemplate`] when the block is unterminated, an
/// annotation is missing its value or repeated, `@gallery` is not a boolean, or
/// (strict mode) a tag is unknown.
pub fn parse_annotations(identifier: &str, body: &str, strict: bool) -> Result<TemplateAnnotations> {
    let mut annotations = TemplateAnnotations::default();

    let Some(header) = leading_doc_block(identifier, body)? else {
        return Ok(annotations);
    };

    for line in header.lines() {
        let Some(captures) = ANNOTATION_RE.captures(line) else {
            continue;
        };
        let name = &captures[1];
        let value = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        match name {
            "title" => set_once(
                identifier,
                name,
                &mut annotations.title,
                required(identifier, name, value)?,
            )?,
            "overview" => set_once(
                identifier,
                name,
                &mut annotations.overview,
                required(identifier, name, value)?,
            )?,
            "gallery" => {
                let flag = match value {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(CatalogError::malformed(
                            identifier,
                            format!("@gallery must be true or false, got '{other}'"),
                        ));
                    }
                };
                set_once(identifier, name, &mut annotations.gallery, flag)?;
            }
            "category" => annotations
                .categories
                .push(required(identifier, name, value)?),
            tag if JSDOC_TAGS.contains(&tag) => {}
            tag if strict => {
                return Err(CatalogError::malformed(
                    identifier,
                    format!("unknown annotation @{tag}"),
                ));
            }
            tag => {
                warn!(template = %identifier, annotation = %tag, "Skipping unknown annotation");
            }
        }
    }

    Ok(annotations)
}

/// Returns the text between `/**` and `*/` when the body opens with a doc block
fn leading_doc_block<'a>(identifier: &str, body: &'a str) -> Result<Option<&'a str>> {
    let Some(rest) = body.trim_start().strip_prefix("/**") else {
        return Ok(None);
    };

    match rest.find("*/") {
        Some(end) => Ok(Some(&rest[..end])),
        None => Err(CatalogError::malformed(
            identifier,
            "unterminated header comment",
        )),
    }
}

fn required(identifier: &str, name: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(CatalogError::malformed(
            identifier,
            format!("@{name} requires a value"),
        ));
    }
    Ok(value.to_string())
}

fn set_once<T>(identifier: &str, name: &str, slot: &mut Option<T>, value: T) -> Result<()> {
    if slot.is_some() {
        return Err(CatalogError::malformed(
            identifier,
            format!("@{name} appears more than once"),
        ));
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const GALLERY_RULE: &str = r#"/**
 * @title Email domain allow list
 * @overview Only allow access to users with specific allow list email domains.
 * @gallery true
 * @category access control
 *
 * This rule will only allow access to users with specific email domains.
 *
 */

function emailDomainAllowList(user, context, callback) {
  return callback(null, user, context);
}
"#;

    const ACTION_HANDLER: &str = r#"/**
* Handler to be executed while sending an email notification
* @param {Event} event - Details about the user and the context in which they are logging in.
* @param {CustomEmailProviderAPI} api - Methods and utilities to help change the behavior of sending a email notification.
*/
exports.onExecuteCustomEmailProvider = async (event, api) => {
  return;
};
"#;

    #[test]
    fn test_parse_gallery_annotations() {
        let annotations = parse_annotations("simple-domain-allow-list", GALLERY_RULE, true).unwrap();

        assert_eq!(annotations.title.as_deref(), Some("Email domain allow list"));
        assert_eq!(
            annotations.overview.as_deref(),
            Some("Only allow access to users with specific allow list email domains.")
        );
        assert_eq!(annotations.gallery, Some(true));
        assert_eq!(annotations.categories, vec!["access control".to_string()]);
    }

    #[test]
    fn test_jsdoc_tags_are_ignored() {
        let annotations = parse_annotations("custom-email-provider", ACTION_HANDLER, true).unwrap();
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_body_without_header() {
        let body = "function ipAddressAllowList(user, context, callback) {\n}\n";
        let annotations = parse_annotations("ip-allow-list", body, true).unwrap();
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_annotations_after_code_are_not_header() {
        let body = "function f() {}\n/**\n * @title Late\n */\n";
        let annotations = parse_annotations("late", body, true).unwrap();
        assert!(annotations.title.is_none());
    }

    #[test]
    fn test_unterminated_header() {
        let err = parse_annotations("broken", "/**\n * @title Broken\n", true).unwrap_err();
        assert_eq!(
            err,
            CatalogError::malformed("broken", "unterminated header comment")
        );
    }

    #[test]
    fn test_gallery_must_be_boolean() {
        let body = "/**\n * @gallery yes\n */\n";
        let err = parse_annotations("gallery", body, true).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("@gallery must be true or false"));
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let body = "/**\n * @title One\n * @title Two\n */\n";
        let err = parse_annotations("dup", body, true).unwrap_err();
        assert!(err.to_string().contains("@title appears more than once"));
    }

    #[test]
    fn test_title_requires_value() {
        let body = "/**\n * @title\n */\n";
        let err = parse_annotations("empty-title", body, true).unwrap_err();
        assert!(err.to_string().contains("@title requires a value"));
    }

    #[test]
    fn test_unknown_annotation_strict() {
        let body = "/**\n * @author someone\n */\n";
        let err = parse_annotations("authored", body, true).unwrap_err();
        assert_eq!(
            err,
            CatalogError::malformed("authored", "unknown annotation @author")
        );
    }

    #[traced_test]
    #[test]
    fn test_unknown_annotation_lenient_logs() {
        let body = "/**\n * @author someone\n * @title Kept\n */\n";
        let annotations = parse_annotations("authored", body, false).unwrap();

        assert_eq!(annotations.title.as_deref(), Some("Kept"));
        assert!(logs_contain("Skipping unknown annotation"));
    }

    #[test]
    fn test_multiple_categories_kept_in_order() {
        let body = "/**\n * @category access control\n * @category enrich profile\n */\n";
        let annotations = parse_annotations("multi", body, true).unwrap();
        assert_eq!(
            annotations.categories,
            vec!["access control".to_string(), "enrich profile".to_string()]
        );
    }
}
