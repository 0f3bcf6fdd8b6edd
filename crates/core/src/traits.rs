//! Configuration contract for persisted action state
//!
//! Actions never talk to a concrete storage backend. They hold a
//! [`SectionHandle`] obtained from a [`ConfigStore`] and read/write plain
//! string keys through it. The store decides where and when those values are
//! persisted.
//!
//! Handles for the same `(category, action)` pair share one logical section:
//! a write made through one handle is visible through every other handle
//! returned for that pair. Nothing is persisted until [`ConfigStore::save`] is
//! called.

use crate::Result;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A flat string key/value section scoped to one `(category, action)` pair
///
/// All methods take `&self`: sections are shared handles and mutate through
/// interior mutability.
pub trait ConfigSection {
    /// Check whether `key` has an associated value
    fn has(&self, key: &str) -> bool;

    /// Retrieve the value for `key`, or `default` when no value is set
    fn get_or_default(&self, key: &str, default: &str) -> String;

    /// Set the value for `key`
    fn set(&self, key: &str, value: &str);

    /// Remove the value for `key` (no-op if absent)
    fn remove(&self, key: &str);
}

/// Shared handle to a configuration section
pub type SectionHandle = Rc<dyn ConfigSection>;

/// Provider of configuration sections
///
/// # Examples
///
/// ```ignore
/// let section = store.section("post-commit", "GoFmt");
/// section.set("enabled", "true");
/// store.save()?;
/// ```
pub trait ConfigStore {
    /// Create or access the section for `category` / `action`
    ///
    /// Repeated calls with the same keys return handles to the same section.
    fn section(&self, category: &str, action: &str) -> SectionHandle;

    /// Persist every mutation made through any handle obtained from this store
    fn save(&self) -> Result<()>;
}

/// A pending modification of a section, relative to its persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionChange {
    /// Key was added or its value changed
    Set {
        /// Key name
        key: String,
        /// New value
        value: String,
    },
    /// Key was removed
    Remove {
        /// Key name
        key: String,
    },
}

/// In-memory section that tracks what has changed since it was last persisted
///
/// Store implementations hand out `Rc<SharedSection>` as their section handle
/// and use [`SharedSection::pending_changes`] to write back only what changed.
#[derive(Debug, Default)]
pub struct SharedSection {
    values: RefCell<IndexMap<String, String>>,
    persisted: RefCell<IndexMap<String, String>>,
}

impl SharedSection {
    /// Create an empty section
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a section from values that are already persisted
    #[must_use]
    pub fn with_values(values: IndexMap<String, String>) -> Self {
        Self {
            persisted: RefCell::new(values.clone()),
            values: RefCell::new(values),
        }
    }

    /// Current values, including unsaved modifications
    #[must_use]
    pub fn snapshot(&self) -> IndexMap<String, String> {
        self.values.borrow().clone()
    }

    /// Modifications made since the section was loaded or last persisted
    ///
    /// Removals are listed before sets, each group in key order of the
    /// respective map.
    #[must_use]
    pub fn pending_changes(&self) -> Vec<SectionChange> {
        let values = self.values.borrow();
        let persisted = self.persisted.borrow();

        let removed = persisted
            .keys()
            .filter(|key| !values.contains_key(*key))
            .map(|key| SectionChange::Remove { key: key.clone() });

        let set = values
            .iter()
            .filter(|(key, value)| persisted.get(*key) != Some(*value))
            .map(|(key, value)| SectionChange::Set {
                key: key.clone(),
                value: value.clone(),
            });

        removed.chain(set).collect()
    }

    /// Check whether there are unsaved modifications
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        *self.values.borrow() != *self.persisted.borrow()
    }

    /// Record the current values as persisted
    pub fn mark_persisted(&self) {
        let values = self.values.borrow().clone();
        *self.persisted.borrow_mut() = values;
    }
}

impl ConfigSection for SharedSection {
    fn has(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.values
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().shift_remove(key);
    }
}

type SectionMap = IndexMap<(String, String), Rc<SharedSection>>;

/// Non-persistent configuration store
///
/// Useful for dry runs and tests: sections behave exactly like the ones of a
/// persistent store, `save` only marks them as persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sections: RefCell<SectionMap>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a single value without creating the section
    #[must_use]
    pub fn value(&self, category: &str, action: &str, key: &str) -> Option<String> {
        self.sections
            .borrow()
            .get(&(category.to_string(), action.to_string()))
            .and_then(|section| section.snapshot().get(key).cloned())
    }

    /// Check whether any section has unsaved modifications
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.sections.borrow().values().any(|s| s.is_dirty())
    }

    fn shared(&self, category: &str, action: &str) -> Rc<SharedSection> {
        Rc::clone(
            self.sections
                .borrow_mut()
                .entry((category.to_string(), action.to_string()))
                .or_default(),
        )
    }
}

impl ConfigStore for MemoryStore {
    fn section(&self, category: &str, action: &str) -> SectionHandle {
        self.shared(category, action)
    }

    fn save(&self) -> Result<()> {
        for section in self.sections.borrow().values() {
            section.mark_persisted();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_section_get_or_default() {
        let section = SharedSection::new();
        assert!(!section.has("enabled"));
        assert_eq!(section.get_or_default("enabled", "false"), "false");

        section.set("enabled", "true");
        assert!(section.has("enabled"));
        assert_eq!(section.get_or_default("enabled", "false"), "true");
    }

    #[test]
    fn test_section_remove_absent_key_is_noop() {
        let section = SharedSection::new();
        section.remove("enabled");
        assert!(!section.has("enabled"));
        assert!(!section.is_dirty());
    }

    #[test]
    fn test_pending_changes_against_loaded_values() {
        let mut values = IndexMap::new();
        values.insert("enabled".to_string(), "true".to_string());
        values.insert("cmd".to_string(), "/usr/bin/gofmt".to_string());
        values.insert("custom".to_string(), "kept".to_string());
        let section = SharedSection::with_values(values);

        assert!(section.pending_changes().is_empty());

        section.remove("enabled");
        section.set("cmd", "/opt/go/bin/gofmt");

        assert_eq!(
            section.pending_changes(),
            vec![
                SectionChange::Remove {
                    key: "enabled".to_string()
                },
                SectionChange::Set {
                    key: "cmd".to_string(),
                    value: "/opt/go/bin/gofmt".to_string()
                },
            ]
        );

        section.mark_persisted();
        assert!(!section.is_dirty());
        assert_eq!(section.get_or_default("custom", ""), "kept");
    }

    #[test]
    fn test_set_then_remove_is_not_a_change() {
        let section = SharedSection::new();
        section.set("enabled", "true");
        section.remove("enabled");
        assert!(section.pending_changes().is_empty());
    }

    #[test]
    fn test_store_sections_share_state() {
        let store = MemoryStore::new();
        let first = store.section("post-commit", "GoFmt");
        let second = store.section("post-commit", "GoFmt");

        first.set("enabled", "true");
        assert_eq!(second.get_or_default("enabled", ""), "true");

        second.remove("enabled");
        assert!(!first.has("enabled"));
    }

    #[test]
    fn test_store_sections_are_scoped() {
        let store = MemoryStore::new();
        store.section("post-commit", "GoFmt").set("enabled", "true");

        assert!(!store.section("post-commit", "GoVet").has("enabled"));
        assert!(!store.section("commit-msg", "GoFmt").has("enabled"));
        assert_eq!(
            store.value("post-commit", "GoFmt", "enabled").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_store_save_clears_dirty_state() {
        let store = MemoryStore::new();
        store.section("commit-msg", "ChangeId").set("enabled", "true");
        assert!(store.is_dirty());

        store.save().unwrap();
        assert!(!store.is_dirty());
    }
}
