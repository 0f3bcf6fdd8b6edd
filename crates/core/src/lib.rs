//! Core types and utilities for git-hooks
//!
//! This is the foundation crate that all other git-hooks crates depend on.
//! It provides:
//! - Base error types
//! - The configuration contract (`ConfigStore`, `ConfigSection`) used by
//!   actions to persist their selection
//! - A shared in-memory section and a non-persistent store
//!
//! This crate has no dependencies on other git-hooks crates.

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{ConfigSection, ConfigStore, MemoryStore, SectionHandle, SharedSection};
