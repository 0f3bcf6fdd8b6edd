//! The set of known categories
//!
//! A catalog is built once at startup, either from a user catalog file or from
//! the built-in definitions, and then passed explicitly to whoever needs it.

use super::category::Category;
use super::executor::ExecutableResolver;
use githooks_core::{ConfigStore, Error, Result};
use indexmap::IndexMap;

/// Categories keyed by hook name, in definition order
#[derive(Debug, Default)]
pub struct Catalog {
    categories: IndexMap<String, Category>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from categories; a later duplicate ID replaces an
    /// earlier one
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|c| (c.id().to_string(), c))
                .collect(),
        }
    }

    /// Whether the catalog has no categories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Category IDs in definition order
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Look up a category by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Mutable lookup, used to change selections
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.get_mut(id)
    }

    /// Look up a category, failing for unknown IDs
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `id` is not in the catalog
    pub fn require(&self, id: &str) -> Result<&Category> {
        self.get(id)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))
    }

    /// Categories in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Mutable categories in definition order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Category> {
        self.categories.values_mut()
    }

    /// Bind every action of every category to `store`
    pub fn set_config_store(&mut self, store: &dyn ConfigStore, resolver: &dyn ExecutableResolver) {
        for category in self.categories.values_mut() {
            category.set_config_store(store, resolver);
        }
    }
}
