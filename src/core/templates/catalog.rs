//! The read-only template catalog.
//!
//! A [`Catalog`] is assembled once, either from a [`TemplateRepository`] via
//! [`Catalog::load`] or in code via [`CatalogBuilder`], and never mutated
//! afterwards. Hosts construct it at startup and hand references to whatever
//! needs templates; there is no process-wide instance.
//!
//! # Usage
//!
//! ```
//! use scaffold_catalog::core::templates::{Catalog, Category, Trigger};
//!
//! let catalog = Catalog::builtin()?;
//!
//! let allow = catalog.get("ip-allow-list")?;
//! assert_eq!(allow.category(), Category::Rule);
//! assert!(allow.body().contains("ipAddressAllowList"));
//!
//! let handler = catalog.for_trigger(Trigger::SendPhoneMessage)?;
//! assert_eq!(handler.identifier(), "send-phone-message");
//!
//! for rule in catalog.list_by_category(Category::Rule) {
//!     println!("{} - {}", rule.identifier(), rule.title());
//! }
//! # Ok::<(), scaffold_catalog::CatalogError>(())
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::core::error::{CatalogError, LookupKind, Result};

use super::annotations::parse_annotations;
use super::embedded::EmbeddedTemplateRepository;
use super::kind::{Category, Runtime, Trigger};
use super::manifest::parse_manifest_yaml;
use super::options::CatalogOptions;
use super::repository::TemplateRepository;
use super::types::{PickerOption, Template, TemplateMetadata};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("identifier pattern is valid"));

/// Normalised form used both for title uniqueness and title lookups.
fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Iterator over every template, in identifier order.
pub type Templates<'a> = btree_map::Values<'a, String, Template>;

/// Iterator over the templates of one category, in identifier order.
///
/// A clone continues from the current position. Call
/// [`Catalog::list_by_category`] again to start over.
#[derive(Debug, Clone)]
pub struct CategoryTemplates<'a> {
    inner: Templates<'a>,
    category: Category,
}

impl<'a> Iterator for CategoryTemplates<'a> {
    type Item = &'a Template;

    fn next(&mut self) -> Option<Self::Item> {
        let category = self.category;
        self.inner.find(|template| template.category() == category)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Read-only collection of templates indexed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    templates: BTreeMap<String, Template>,
}

impl Catalog {
    /// Load the templates compiled into this crate with default options.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedTemplate`] if the embedded manifest or
    /// one of its templates fails validation.
    pub fn builtin() -> Result<Self> {
        Self::load(&EmbeddedTemplateRepository::new(), &CatalogOptions::default())
    }

    /// Load a catalog from the manifest and blobs of `repository`.
    ///
    /// Manifest source paths are resolved relative to the manifest's own
    /// directory. Blobs the manifest does not reference are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedTemplate`] when the manifest is missing
    /// or invalid, an entry references a missing or non UTF-8 blob, or an entry
    /// fails the validation described on [`CatalogBuilder::insert`].
    pub fn load<R>(repository: &R, options: &CatalogOptions) -> Result<Self>
    where
        R: TemplateRepository + ?Sized,
    {
        let manifest_path = options.manifest_path.as_str();
        let manifest_blob = repository.read_blob(manifest_path).ok_or_else(|| {
            CatalogError::malformed(
                manifest_path,
                format!("manifest not found in {} repository", repository.source()),
            )
        })?;
        let content = std::str::from_utf8(&manifest_blob).map_err(|e| {
            CatalogError::malformed(manifest_path, format!("manifest is not valid UTF-8: {e}"))
        })?;
        let manifest = parse_manifest_yaml(content, manifest_path)?;

        let base_dir = manifest_path.rsplit_once('/').map(|(dir, _)| dir);
        let mut builder = CatalogBuilder::new().strict_annotations(options.strict_annotations);
        let mut declared = HashSet::new();
        let mut referenced = HashSet::new();

        for entry in manifest.templates {
            if !declared.insert(entry.id.clone()) {
                return Err(CatalogError::malformed(&entry.id, "duplicate identifier"));
            }

            let blob_path = match base_dir {
                Some(dir) => format!("{dir}/{}", entry.source),
                None => entry.source.clone(),
            };
            referenced.insert(blob_path.clone());

            let category: Category = entry.category.parse().map_err(|_| {
                CatalogError::malformed(
                    &entry.id,
                    format!("unknown category '{}'", entry.category),
                )
            })?;
            if !options.includes(category) {
                debug!(template = %entry.id, category = %category, "Skipping filtered template");
                continue;
            }

            let runtime = entry
                .runtime
                .as_deref()
                .map(str::parse::<Runtime>)
                .transpose()
                .map_err(|e| CatalogError::malformed(&entry.id, e))?;

            let blob = repository.read_blob(&blob_path).ok_or_else(|| {
                CatalogError::malformed(&entry.id, format!("source blob '{blob_path}' not found"))
            })?;
            let body = String::from_utf8(blob.into_owned()).map_err(|e| {
                CatalogError::malformed(
                    &entry.id,
                    format!("source blob '{blob_path}' is not valid UTF-8: {e}"),
                )
            })?;

            let spec = TemplateSpec {
                identifier: entry.id,
                category,
                title: entry.title,
                body,
                runtime,
                overview: entry.overview,
                gallery: entry.gallery,
                tags: entry.tags,
            };
            builder.insert(spec)?;
        }

        for path in repository.blob_paths() {
            if path != manifest_path && !referenced.contains(&path) {
                debug!(blob = %path, "Ignoring blob not referenced by the manifest");
            }
        }

        let catalog = builder.build();
        info!(
            source = %repository.source(),
            template_count = catalog.len(),
            "Template catalog loaded"
        );

        Ok(catalog)
    }

    /// Get a template by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no template has `identifier`.
    pub fn get(&self, identifier: &str) -> Result<&Template> {
        self.templates
            .get(identifier)
            .ok_or_else(|| CatalogError::not_found(LookupKind::Identifier, identifier))
    }

    /// Every template, sorted by identifier.
    pub fn list(&self) -> Templates<'_> {
        self.templates.values()
    }

    /// Templates of `category`, sorted by identifier. Empty when none match.
    pub fn list_by_category(&self, category: Category) -> CategoryTemplates<'_> {
        CategoryTemplates {
            inner: self.templates.values(),
            category,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.templates.contains_key(identifier)
    }

    /// Categories with at least one template, in declaration order.
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .filter(|category| self.list_by_category(*category).next().is_some())
            .collect()
    }

    /// The handler template written for `trigger`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the catalog ships no template for
    /// the trigger. There is no fallback template.
    pub fn for_trigger(&self, trigger: Trigger) -> Result<&Template> {
        self.list()
            .find(|template| template.metadata().trigger == Some(trigger))
            .ok_or_else(|| CatalogError::not_found(LookupKind::Trigger, trigger.as_str()))
    }

    /// Find a template by display title, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no title matches.
    pub fn find_by_title(&self, title: &str) -> Result<&Template> {
        let wanted = title_key(title);
        self.list()
            .find(|template| title_key(template.title()) == wanted)
            .ok_or_else(|| CatalogError::not_found(LookupKind::Title, title))
    }

    /// Picker entries for `category`, sorted by label.
    pub fn picker_options(&self, category: Category) -> Vec<PickerOption> {
        let mut options: Vec<PickerOption> = self
            .list_by_category(category)
            .map(|template| PickerOption {
                label: template.title().to_string(),
                identifier: template.identifier().to_string(),
            })
            .collect();
        options.sort_by(|a, b| a.label.cmp(&b.label));
        options
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Template;
    type IntoIter = Templates<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.list()
    }
}

/// Everything needed to add one template to a [`CatalogBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub identifier: String,
    pub category: Category,
    pub title: String,
    pub body: String,
    /// Action runtime; action templates default to [`Runtime::default`]
    pub runtime: Option<Runtime>,
    /// Used when the body has no `@overview` annotation
    pub overview: Option<String>,
    /// Used when the body has no `@gallery` annotation
    pub gallery: Option<bool>,
    pub tags: Vec<String>,
}

impl TemplateSpec {
    pub fn new(
        identifier: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            category,
            title: title.into(),
            body: body.into(),
            runtime: None,
            overview: None,
            gallery: None,
            tags: Vec::new(),
        }
    }

    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn with_gallery(mut self, gallery: bool) -> Self {
        self.gallery = Some(gallery);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Validating builder for [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    templates: BTreeMap<String, Template>,
    strict_annotations: bool,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Create an empty builder with strict annotation parsing.
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            strict_annotations: true,
        }
    }

    /// Reject (`true`) or skip (`false`) unknown header annotations.
    pub fn strict_annotations(mut self, strict: bool) -> Self {
        self.strict_annotations = strict;
        self
    }

    /// Shorthand for inserting a [`TemplateSpec::new`] and chaining.
    ///
    /// # Errors
    ///
    /// See [`CatalogBuilder::insert`].
    pub fn add(
        mut self,
        identifier: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        self.insert(TemplateSpec::new(identifier, category, title, body))?;
        Ok(self)
    }

    /// Validate `spec` and add it to the catalog being built.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedTemplate`] when:
    ///
    /// - the identifier is not lowercase kebab-case or is already taken
    /// - the title is blank or already used by another template
    /// - a runtime is given for a category without a trigger
    /// - another template already serves the category's trigger
    /// - the body's header annotations are invalid
    pub fn insert(&mut self, spec: TemplateSpec) -> Result<()> {
        let TemplateSpec {
            identifier,
            category,
            title,
            body,
            runtime,
            overview,
            gallery,
            tags,
        } = spec;

        if !IDENTIFIER_RE.is_match(&identifier) {
            return Err(CatalogError::malformed(
                &identifier,
                "identifier must be lowercase kebab-case",
            ));
        }
        if self.templates.contains_key(&identifier) {
            return Err(CatalogError::malformed(&identifier, "duplicate identifier"));
        }

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::malformed(&identifier, "title must not be blank"));
        }
        let key = title_key(&title);
        if let Some(other) = self
            .templates
            .values()
            .find(|t| title_key(t.title()) == key)
        {
            return Err(CatalogError::malformed(
                &identifier,
                format!("title '{title}' is already used by '{}'", other.identifier()),
            ));
        }

        let trigger = category.trigger();
        let runtime = match (trigger, runtime) {
            (Some(_), runtime) => Some(runtime.unwrap_or_default()),
            (None, Some(runtime)) => {
                return Err(CatalogError::malformed(
                    &identifier,
                    format!("runtime {runtime} is only valid for action templates, not {category}"),
                ));
            }
            (None, None) => None,
        };
        if let Some(trigger) = trigger {
            if let Some(other) = self
                .templates
                .values()
                .find(|t| t.metadata().trigger == Some(trigger))
            {
                return Err(CatalogError::malformed(
                    &identifier,
                    format!("trigger {trigger} is already served by '{}'", other.identifier()),
                ));
            }
        }

        let annotations = parse_annotations(&identifier, &body, self.strict_annotations)?;

        let mut seen = HashSet::new();
        let tags = tags
            .into_iter()
            .chain(annotations.categories)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
            .collect();

        let metadata = TemplateMetadata {
            overview: annotations.overview.or(overview),
            gallery: annotations.gallery.or(gallery).unwrap_or(false),
            tags,
            trigger,
            runtime,
            header_title: annotations.title.filter(|header| *header != title),
        };

        debug!(
            template = %identifier,
            category = %category,
            body_len = body.len(),
            "Template loaded"
        );

        let template = Template::new(
            identifier.clone(),
            category,
            title,
            Arc::from(body),
            metadata,
        );
        self.templates.insert(identifier, template);
        Ok(())
    }

    pub fn build(self) -> Catalog {
        Catalog {
            templates: self.templates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templates::InMemoryTemplateRepository;

    const IP_ALLOW: &str = "function ipAddressAllowList(user, context, callback) {\n  return callback(null, user, context);\n}\n";
    const POST_CHANGE: &str = "/**\n * Handler that will be called during the execution of a PostChangePassword flow.\n *\n * @param {Event} event - Details about the user.\n */\nexports.onExecutePostChangePassword = async (event) => {\n};\n";

    fn two_template_catalog() -> Catalog {
        CatalogBuilder::new()
            .add(
                "post-change-password",
                Category::PostChangePassword,
                "Post change password",
                POST_CHANGE,
            )
            .unwrap()
            .add("ip-allow-list", Category::Rule, "IP address allow list", IP_ALLOW)
            .unwrap()
            .build()
    }

    #[test]
    fn test_get_returns_template() {
        let catalog = two_template_catalog();
        let template = catalog.get("ip-allow-list").unwrap();

        assert_eq!(template.category(), Category::Rule);
        assert!(template.body().contains("ipAddressAllowList"));
        assert_eq!(template.body(), IP_ALLOW);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let catalog = two_template_catalog();
        let err = catalog.get("nonexistent").unwrap_err();
        assert_eq!(
            err,
            CatalogError::not_found(LookupKind::Identifier, "nonexistent")
        );
    }

    #[test]
    fn test_list_is_sorted_by_identifier() {
        let catalog = two_template_catalog();
        let ids: Vec<&str> = catalog.list().map(Template::identifier).collect();
        assert_eq!(ids, vec!["ip-allow-list", "post-change-password"]);
        assert_eq!(catalog.list().len(), catalog.len());
    }

    #[test]
    fn test_list_by_category_filters_and_restarts() {
        let catalog = two_template_catalog();

        let rules = catalog.list_by_category(Category::Rule);
        let first: Vec<_> = rules.clone().map(Template::identifier).collect();
        let second: Vec<_> = rules.map(Template::identifier).collect();
        assert_eq!(first, vec!["ip-allow-list"]);
        assert_eq!(first, second);

        assert_eq!(catalog.list_by_category(Category::Branding).count(), 0);
    }

    #[test]
    fn test_categories_present() {
        let catalog = two_template_catalog();
        assert_eq!(
            catalog.categories(),
            vec![Category::PostChangePassword, Category::Rule]
        );
    }

    #[test]
    fn test_action_template_gets_trigger_and_default_runtime() {
        let catalog = two_template_catalog();
        let template = catalog.get("post-change-password").unwrap();

        assert_eq!(
            template.metadata().trigger,
            Some(Trigger::PostChangePassword)
        );
        assert_eq!(template.metadata().runtime, Some(Runtime::Node22));

        let rule = catalog.get("ip-allow-list").unwrap();
        assert_eq!(rule.metadata().trigger, None);
        assert_eq!(rule.metadata().runtime, None);
    }

    #[test]
    fn test_for_trigger() {
        let catalog = two_template_catalog();
        assert_eq!(
            catalog
                .for_trigger(Trigger::PostChangePassword)
                .unwrap()
                .identifier(),
            "post-change-password"
        );

        let err = catalog.for_trigger(Trigger::PostLogin).unwrap_err();
        assert_eq!(err, CatalogError::not_found(LookupKind::Trigger, "post-login"));
    }

    #[test]
    fn test_find_by_title_ignores_case() {
        let catalog = two_template_catalog();
        assert_eq!(
            catalog
                .find_by_title("  ip ADDRESS allow list ")
                .unwrap()
                .identifier(),
            "ip-allow-list"
        );
        assert!(catalog.find_by_title("Empty rule").unwrap_err().is_not_found());
    }

    #[test]
    fn test_picker_options_sorted_by_label() {
        let catalog = CatalogBuilder::new()
            .add("ip-deny-list", Category::Rule, "IP address deny list", "a")
            .unwrap()
            .add("add-email-to-access-token", Category::Rule, "Add email to access token", "b")
            .unwrap()
            .add("ip-allow-list", Category::Rule, "IP address allow list", "c")
            .unwrap()
            .build();

        let labels: Vec<String> = catalog
            .picker_options(Category::Rule)
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Add email to access token",
                "IP address allow list",
                "IP address deny list"
            ]
        );
        assert!(catalog.picker_options(Category::EmailProvider).is_empty());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = CatalogBuilder::new()
            .add("ip-allow-list", Category::Rule, "IP address allow list", IP_ALLOW)
            .unwrap()
            .add("ip-allow-list", Category::Rule, "Another title", IP_ALLOW)
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::malformed("ip-allow-list", "duplicate identifier")
        );
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        for identifier in ["", "IP-Allow", "ip_allow", "-ip", "ip--allow", "ip allow"] {
            let err = CatalogBuilder::new()
                .add(identifier, Category::Rule, "Title", "body")
                .unwrap_err();
            assert!(err.is_malformed(), "{identifier:?} should be rejected");
        }
    }

    #[test]
    fn test_blank_and_duplicate_titles_rejected() {
        let blank = CatalogBuilder::new()
            .add("blank", Category::Rule, "   ", "body")
            .unwrap_err();
        assert!(blank.to_string().contains("title must not be blank"));

        let dup = CatalogBuilder::new()
            .add("one", Category::Rule, "Same title", "body")
            .unwrap()
            .add("two", Category::Rule, "same TITLE", "body")
            .unwrap_err();
        assert!(dup.to_string().contains("already used by 'one'"));
    }

    #[test]
    fn test_titles_differing_in_non_ascii_case_rejected() {
        let err = CatalogBuilder::new()
            .add("upper", Category::Rule, "Écran rule", "body")
            .unwrap()
            .add("lower", Category::Rule, "écran rule", "body")
            .unwrap_err();
        assert!(err.to_string().contains("already used by 'upper'"));

        let catalog = CatalogBuilder::new()
            .add("upper", Category::Rule, "Écran rule", "body")
            .unwrap()
            .build();
        assert_eq!(catalog.find_by_title("ÉCRAN RULE").unwrap().identifier(), "upper");
        assert_eq!(catalog.find_by_title("écran rule").unwrap().identifier(), "upper");
    }

    #[test]
    fn test_runtime_on_rule_rejected() {
        let mut builder = CatalogBuilder::new();
        let err = builder
            .insert(
                TemplateSpec::new("ip-allow-list", Category::Rule, "IP address allow list", IP_ALLOW)
                    .with_runtime(Runtime::Node18),
            )
            .unwrap_err();
        assert!(err.to_string().contains("only valid for action templates"));
    }

    #[test]
    fn test_explicit_runtime_kept() {
        let mut builder = CatalogBuilder::new();
        builder
            .insert(
                TemplateSpec::new(
                    "custom-email-provider",
                    Category::EmailProvider,
                    "Custom email provider",
                    "exports.onExecuteCustomEmailProvider = async (event, api) => {};",
                )
                .with_runtime(Runtime::Node18),
            )
            .unwrap();
        let catalog = builder.build();
        assert_eq!(
            catalog
                .get("custom-email-provider")
                .unwrap()
                .metadata()
                .runtime,
            Some(Runtime::Node18)
        );
    }

    #[test]
    fn test_second_template_for_trigger_rejected() {
        let err = CatalogBuilder::new()
            .add("phone-a", Category::PhoneProvider, "Phone A", "a")
            .unwrap()
            .add("phone-b", Category::PhoneProvider, "Phone B", "b")
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("trigger custom-phone-provider is already served by 'phone-a'")
        );
    }

    #[test]
    fn test_annotations_populate_metadata() {
        let body = "/**\n * @title Email domain allow list\n * @overview Only allow some domains.\n * @gallery true\n * @category access control\n */\nfunction emailDomainAllowList() {}\n";
        let mut builder = CatalogBuilder::new();
        builder
            .insert(
                TemplateSpec::new(
                    "simple-domain-allow-list",
                    Category::Rule,
                    "Simple domain allow list",
                    body,
                )
                .with_overview("ignored, annotation wins")
                .with_gallery(false)
                .with_tag("access control")
                .with_tag("domains"),
            )
            .unwrap();
        let catalog = builder.build();
        let metadata = catalog.get("simple-domain-allow-list").unwrap().metadata();

        assert_eq!(metadata.overview.as_deref(), Some("Only allow some domains."));
        assert!(metadata.gallery);
        assert_eq!(
            metadata.tags,
            vec!["access control".to_string(), "domains".to_string()]
        );
        assert_eq!(
            metadata.header_title.as_deref(),
            Some("Email domain allow list")
        );
    }

    #[test]
    fn test_malformed_annotation_surfaces() {
        let err = CatalogBuilder::new()
            .add("bad", Category::Rule, "Bad", "/**\n * @gallery sometimes\n */\n")
            .unwrap_err();
        assert!(err.is_malformed());

        let lenient = CatalogBuilder::new()
            .strict_annotations(false)
            .add("lenient", Category::Rule, "Lenient", "/**\n * @author me\n */\n")
            .unwrap()
            .build();
        assert!(lenient.contains("lenient"));
    }

    #[test]
    fn test_load_from_in_memory_repository() {
        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "catalog/manifest.yml",
                "templates:\n  - id: ip-allow-list\n    category: rule\n    title: IP address allow list\n    source: rules/ip-allow-list.js\n",
            )
            .with_blob("catalog/rules/ip-allow-list.js", IP_ALLOW)
            .with_blob("catalog/rules/unused.js", "unused");
        let options = CatalogOptions {
            manifest_path: "catalog/manifest.yml".to_string(),
            ..Default::default()
        };

        let catalog = Catalog::load(&repo, &options).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("ip-allow-list").unwrap().body(), IP_ALLOW);
    }

    #[test]
    fn test_load_missing_manifest() {
        let repo = InMemoryTemplateRepository::new();
        let err = Catalog::load(&repo, &CatalogOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::malformed("manifest.yml", "manifest not found in in-memory repository")
        );
    }

    #[test]
    fn test_load_missing_blob() {
        let repo = InMemoryTemplateRepository::new().with_blob(
            "manifest.yml",
            "templates:\n  - id: ip-allow-list\n    category: rule\n    title: IP address allow list\n    source: rules/ip-allow-list.js\n",
        );
        let err = Catalog::load(&repo, &CatalogOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::malformed(
                "ip-allow-list",
                "source blob 'rules/ip-allow-list.js' not found"
            )
        );
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "manifest.yml",
                "templates:\n  - id: binary\n    category: rule\n    title: Binary\n    source: binary.js\n",
            )
            .with_blob("binary.js", vec![0xff, 0xfe, 0x00]);
        let err = Catalog::load(&repo, &CatalogOptions::default()).unwrap_err();
        assert!(err.to_string().contains("is not valid UTF-8"));
    }

    #[test]
    fn test_load_rejects_unknown_category_and_runtime() {
        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "manifest.yml",
                "templates:\n  - id: hook\n    category: hooks\n    title: Hook\n    source: hook.js\n",
            )
            .with_blob("hook.js", "");
        let err = Catalog::load(&repo, &CatalogOptions::default()).unwrap_err();
        assert_eq!(err, CatalogError::malformed("hook", "unknown category 'hooks'"));

        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "manifest.yml",
                "templates:\n  - id: send-phone-message\n    category: send-phone-message\n    title: Send phone message\n    source: send.js\n    runtime: node8\n",
            )
            .with_blob("send.js", "");
        let err = Catalog::load(&repo, &CatalogOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown runtime: node8"));
    }

    #[test]
    fn test_load_duplicate_identifier_even_when_filtered() {
        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "manifest.yml",
                "templates:\n  - id: dup\n    category: branding\n    title: One\n    source: a.js\n  - id: dup\n    category: branding\n    title: Two\n    source: b.js\n",
            )
            .with_blob("a.js", "")
            .with_blob("b.js", "");
        let options = CatalogOptions {
            categories: vec![Category::Rule],
            ..Default::default()
        };
        let err = Catalog::load(&repo, &options).unwrap_err();
        assert_eq!(err, CatalogError::malformed("dup", "duplicate identifier"));
    }

    #[test]
    fn test_load_category_filter() {
        let repo = InMemoryTemplateRepository::new()
            .with_blob(
                "manifest.yml",
                "templates:\n  - id: ip-allow-list\n    category: rule\n    title: IP address allow list\n    source: allow.js\n  - id: banner\n    category: branding\n    title: Banner\n    source: banner.js\n",
            )
            .with_blob("allow.js", IP_ALLOW)
            .with_blob("banner.js", "document.body;");
        let options = CatalogOptions {
            categories: vec![Category::Branding],
            ..Default::default()
        };

        let catalog = Catalog::load(&repo, &options).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("banner"));
        assert!(catalog.get("ip-allow-list").unwrap_err().is_not_found());
    }

    #[test]
    fn test_into_iterator_matches_list() {
        let catalog = two_template_catalog();
        let via_ref: Vec<&Template> = (&catalog).into_iter().collect();
        let via_list: Vec<&Template> = catalog.list().collect();
        assert_eq!(via_ref, via_list);
    }
}
