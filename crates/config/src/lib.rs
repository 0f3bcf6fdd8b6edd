//! Configuration management for git-hooks
//!
//! This crate handles:
//! - Per-repository action state stored in `.git/config`
//! - Locating the user catalog file
//! - Logging initialization

pub mod dirs;
pub mod logging;
pub mod store;

// Re-export error types from core
pub use githooks_core::{Error, Result};

pub use dirs::{default_catalog_file, find_catalog_file, xdg_catalog_file};
pub use store::GitConfigStore;
