//! Seams between the application layer and the catalog

use crate::core::error::Result;
use crate::core::templates::{Catalog, Category, Template};

/// Read access to a set of templates.
///
/// Use cases depend on this trait rather than on [`Catalog`] so hosts can hand
/// them a borrowed catalog, a shared one, or a test double.
pub trait TemplateLookup {
    /// Get a template by identifier.
    fn get(&self, identifier: &str) -> Result<&Template>;

    /// Templates of `category`, sorted by identifier.
    fn templates_in(&self, category: Category) -> Vec<&Template>;

    /// Categories with at least one template, in declaration order.
    fn categories(&self) -> Vec<Category>;
}

impl TemplateLookup for Catalog {
    fn get(&self, identifier: &str) -> Result<&Template> {
        Catalog::get(self, identifier)
    }

    fn templates_in(&self, category: Category) -> Vec<&Template> {
        self.list_by_category(category).collect()
    }

    fn categories(&self) -> Vec<Category> {
        Catalog::categories(self)
    }
}

impl<T: TemplateLookup + ?Sized> TemplateLookup for &T {
    fn get(&self, identifier: &str) -> Result<&Template> {
        (**self).get(identifier)
    }

    fn templates_in(&self, category: Category) -> Vec<&Template> {
        (**self).templates_in(category)
    }

    fn categories(&self) -> Vec<Category> {
        (**self).categories()
    }
}

impl<T: TemplateLookup + ?Sized> TemplateLookup for std::sync::Arc<T> {
    fn get(&self, identifier: &str) -> Result<&Template> {
        (**self).get(identifier)
    }

    fn templates_in(&self, category: Category) -> Vec<&Template> {
        (**self).templates_in(category)
    }

    fn categories(&self) -> Vec<Category> {
        (**self).categories()
    }
}
