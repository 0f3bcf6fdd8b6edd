//! Command line templating
//!
//! Commands are stored as token lists. A token that exactly equals a
//! placeholder is replaced by run-time data before execution:
//!
//! - [`PLACEHOLDER_FILE`] is bound to the file currently being processed
//! - [`PLACEHOLDER_ARGS`] is bound to the arguments git passed to the hook
//!   (for example the message file path of a `commit-msg` hook)
//!
//! Substitution is a single pass over the input tokens. Tokens produced by a
//! substitution are never matched again, so `two -> three` and
//! `three -> four` turn `[two]` into `[three]`, not `[four]`.

use std::collections::HashMap;

/// Placeholder for a single matching file name
pub const PLACEHOLDER_FILE: &str = "<file>";

/// Placeholder for hook arguments, as supplied by git
pub const PLACEHOLDER_ARGS: &str = "<args>";

/// Replacement value for a placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Replace the token with exactly one token
    Single(String),
    /// Splice zero or more tokens in place of the token
    List(Vec<String>),
}

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for Substitution {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[String]> for Substitution {
    fn from(values: &[String]) -> Self {
        Self::List(values.to_vec())
    }
}

/// Placeholder token to replacement value
pub type Substitutions = HashMap<String, Substitution>;

/// Expand placeholder tokens in `tokens`
///
/// Tokens that do not match any key pass through unchanged. An empty input
/// yields an empty output.
///
/// # Examples
///
/// ```
/// use githooks_engine::hooks::template::{Substitution, Substitutions, substitute_command_line};
///
/// let mut subs = Substitutions::new();
/// subs.insert("<file>".to_string(), Substitution::from("main.go"));
///
/// let tokens = vec!["gofmt".to_string(), "-w".to_string(), "<file>".to_string()];
/// assert_eq!(substitute_command_line(&tokens, &subs), ["gofmt", "-w", "main.go"]);
/// ```
#[must_use]
pub fn substitute_command_line(tokens: &[String], substitutions: &Substitutions) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());

    for token in tokens {
        match substitutions.get(token) {
            Some(Substitution::Single(value)) => out.push(value.clone()),
            Some(Substitution::List(values)) => out.extend(values.iter().cloned()),
            None => out.push(token.clone()),
        }
    }

    out
}
