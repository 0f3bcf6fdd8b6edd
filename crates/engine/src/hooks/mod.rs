//! Hook system
//!
//! Runs formatting and linting tools when git fires a hook.
//!
//! ## Execution Model
//!
//! - A [`Catalog`] holds one [`Category`] per git hook (`post-commit`,
//!   `commit-msg`, ...)
//! - Each category owns [`Action`]s executed strictly in priority order,
//!   lower first, one at a time
//! - An action runs once per commit or once per matching file
//! - Selection is persisted per `(category, action)` through a
//!   [`ConfigStore`](githooks_core::ConfigStore)
//!
//! ## Module Organization
//!
//! - `template`: placeholder expansion in command lines
//! - `executor`: executable lookup and process execution
//! - `action`: the action trait, shell actions and the selection state
//! - `category`: ordered action collections
//! - `catalog`, `config`, `loader`, `builtin`: catalog construction
//! - `runner`: change-set driven execution of a category

pub mod action;
pub mod builtin;
pub mod catalog;
pub mod category;
pub mod config;
pub mod executor;
pub mod loader;
pub mod runner;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, ActionReport, RunType, SelectionState, ShellAction};
pub use builtin::builtin_catalog;
pub use catalog::Catalog;
pub use category::{Category, CategoryReport};
pub use executor::{
    CommandExecutor, CommandOutput, ExecutableResolver, PathResolver, Resolution, ShellExecutor,
};
pub use loader::{CatalogLoader, parse_catalog};
pub use runner::HookRunner;
