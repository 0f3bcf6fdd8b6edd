//! Base error types for git-hooks
//!
//! This module provides the foundation error types that all crates can use.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation failed
    #[error("Git error: {0}")]
    Git(String),

    /// HEAD is a root commit, so there is nothing to diff against
    #[error("Commit {commit} has no parent; cannot compute the list of changed files")]
    NoParentCommit {
        /// HEAD commit id
        commit: String,
    },

    /// Malformed catalog document
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Catalog document declares a version this build cannot read
    #[error("Unsupported catalog version {version} (supported: 1)")]
    UnsupportedCatalogVersion {
        /// Declared version
        version: i64,
    },

    /// File pattern of an action is not a valid regular expression
    #[error("Invalid file pattern '{pattern}' for action '{action}': {reason}")]
    InvalidPattern {
        /// Action ID
        action: String,
        /// Offending pattern
        pattern: String,
        /// Regex compiler message
        reason: String,
    },

    /// Tool process could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Executable that failed to start
        program: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration store error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Category id does not exist in the catalog
    #[error("Unknown hook category '{0}'")]
    UnknownCategory(String),

    /// Repository has no working tree (bare repository)
    #[error("Repository at {0} has no working tree")]
    NoWorkTree(PathBuf),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
