//! Error types for CLI commands
//!
//! Errors that decide the process exit status are modelled here. Everything
//! else travels as `anyhow::Error` and exits with status 1.

use thiserror::Error;

/// Exit status for usage errors
pub const EXIT_USAGE: u8 = 2;

/// Exit status for failed tools and fatal errors
pub const EXIT_FAILURE: u8 = 1;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// First argument names no known category
    #[error("Unknown hook category '{category}'. Known categories: {}", .known.join(", "))]
    UnknownCategory {
        /// The requested category
        category: String,
        /// Categories in the catalog
        known: Vec<String>,
    },

    /// Some tool invocations of a category run failed
    #[error("{failures} of {invocations} tool invocations failed in {category}")]
    ToolsFailed {
        /// Category that ran
        category: String,
        /// Failed invocations
        failures: usize,
        /// Total invocations
        invocations: usize,
    },

    /// Command needs an interactive terminal
    #[error("'{0}' needs an interactive terminal")]
    NotInteractive(&'static str),

    /// Library error
    #[error(transparent)]
    Core(#[from] githooks_core::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownCategory { .. } => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// Create an `UnknownCategory` error listing `known`
    pub fn unknown_category<'a>(
        category: &str,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownCategory {
            category: category.to_string(),
            known: known.into_iter().map(ToString::to_string).collect(),
        }
    }
}
