//! Catalog document structures
//!
//! Mirrors the JSON layout of a user catalog file:
//!
//! ```json
//! {
//!   "version": 1,
//!   "hooks": {
//!     "post-commit": {
//!       "name": "Post Commit",
//!       "actions": {
//!         "GoFmt": {
//!           "name": "Golang Format",
//!           "runType": "perFile",
//!           "priority": 10,
//!           "filePattern": "\\.go$",
//!           "shellCmd": ["gofmt", "-w", "<file>"]
//!         }
//!       }
//!     }
//!   }
//! }
//! ```

use super::action::{Action, RunType, ShellAction};
use super::category::Category;
use githooks_core::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The only catalog format version understood
pub const CATALOG_VERSION: i64 = 1;

/// Top-level catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Format version; 0 or absent means "no catalog"
    #[serde(default)]
    pub version: i64,

    /// Categories keyed by hook name
    #[serde(default)]
    pub hooks: IndexMap<String, CategoryConfig>,
}

/// One category in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Actions keyed by ID
    #[serde(default)]
    pub actions: IndexMap<String, ActionConfig>,
}

/// One action in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Execution cadence
    pub run_type: RunType,

    /// Execution priority (lower runs first)
    #[serde(default)]
    pub priority: i32,

    /// Regex matched against file base names; empty matches everything
    #[serde(default)]
    pub file_pattern: String,

    /// Executable followed by arguments, may contain placeholders
    #[serde(default)]
    pub shell_cmd: Vec<String>,
}

impl CategoryConfig {
    /// Validate and build the category with ID `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the ID or name is empty, or any action is invalid
    pub fn build(&self, id: &str) -> Result<Category> {
        if id.is_empty() {
            return Err(Error::Catalog("Invalid category ID".to_string()));
        }
        if self.name.is_empty() {
            return Err(Error::Catalog(format!(
                "Invalid category name for category {id}"
            )));
        }

        let actions = self
            .actions
            .iter()
            .map(|(action_id, action)| action.build(id, action_id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Category::new(id, self.name.clone(), actions))
    }
}

impl ActionConfig {
    /// Validate and build the action with ID `id` of category `category`
    ///
    /// # Errors
    ///
    /// Returns an error if the ID, name or command is empty, or the file
    /// pattern does not compile
    pub fn build(&self, category: &str, id: &str) -> Result<Box<dyn Action>> {
        if id.is_empty() {
            return Err(Error::Catalog(format!(
                "Invalid action ID in category {category}"
            )));
        }
        if self.name.is_empty() {
            return Err(Error::Catalog(format!("Invalid action name for action {id}")));
        }
        if self.shell_cmd.is_empty() {
            return Err(Error::Catalog(format!(
                "Invalid shell command for action {id}"
            )));
        }

        let action = ShellAction::new(
            id,
            self.name.clone(),
            self.priority,
            &self.file_pattern,
            self.shell_cmd.clone(),
            self.run_type,
        )?;
        Ok(Box::new(action))
    }
}
