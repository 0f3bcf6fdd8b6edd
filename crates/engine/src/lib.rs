//! # git-hooks engine
//!
//! Orchestrates per-repository git hooks:
//!
//! - **Catalog**: categories of tool actions, built-in or loaded from JSON
//! - **Selection**: per-action enabled state persisted through a config store
//! - **Change sets**: files added or modified by the latest commit
//! - **Execution**: command templating and tool invocation from the working
//!   tree root

pub mod changeset;
pub mod git;
pub mod hooks;

// Re-export error types from core
pub use githooks_core::{Error, Result};

// Re-export commonly used types
pub use changeset::{ChangeSet, head_change_set};
pub use git::Repository;
pub use hooks::{Action, Catalog, CatalogLoader, Category, HookRunner, SelectionState};
