//! Template management use cases

use crate::application::{ApplicationError, TemplateLookup};
use crate::core::templates::Template;

/// Use case for listing all available templates
pub struct ListTemplatesUseCase<L: TemplateLookup> {
    lookup: L,
}

impl<L: TemplateLookup> ListTemplatesUseCase<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Render every template grouped by category.
    pub fn execute(&self) -> String {
        let mut output = String::from("Available templates:\n");

        let categories = self.lookup.categories();
        if categories.is_empty() {
            output.push_str("\n  (none)\n");
            return output;
        }

        for category in categories {
            output.push_str(&format!("\n{}:\n", category.heading()));
            for template in self.lookup.templates_in(category) {
                output.push_str(&format!("  {}\n", template.identifier()));
                output.push_str(&format!("    {}\n", template.title()));
            }
        }

        output
    }
}

/// Use case for showing template information
pub struct TemplateInfoUseCase<L: TemplateLookup> {
    lookup: L,
}

impl<L: TemplateLookup> TemplateInfoUseCase<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Render a human readable summary of one template.
    pub fn execute(&self, identifier: &str) -> Result<String, ApplicationError> {
        let template = self.lookup.get(identifier)?;
        Ok(describe(template))
    }

    /// Render one template, body included, as pretty JSON.
    pub fn execute_json(&self, identifier: &str) -> Result<String, ApplicationError> {
        let template = self.lookup.get(identifier)?;
        Ok(serde_json::to_string_pretty(template)?)
    }
}

fn describe(template: &Template) -> String {
    let metadata = template.metadata();

    let mut output = format!("Template: {}\n", template.identifier());
    output.push_str(&format!("Category: {}\n", template.category()));
    output.push_str(&format!("Title: {}\n", template.title()));

    if let Some(trigger) = metadata.trigger {
        output.push_str(&format!("Trigger: {trigger}\n"));
    }
    if let Some(runtime) = metadata.runtime {
        output.push_str(&format!("Runtime: {runtime}\n"));
    }
    if metadata.gallery {
        output.push_str("Gallery: yes\n");
    }
    if !metadata.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", metadata.tags.join(", ")));
    }
    if let Some(overview) = &metadata.overview {
        output.push_str(&format!("Overview: {overview}\n"));
    }
    if let Some(header_title) = &metadata.header_title {
        output.push_str(&format!("Header title: {header_title}\n"));
    }

    let body = template.body();
    output.push_str(&format!(
        "\nBody: {} bytes, {} lines\n",
        body.len(),
        body.lines().count()
    ));

    output
}
