//! Change-set detection
//!
//! The change set of a commit is the list of paths it added or modified
//! relative to its first parent, in diff order. Deleted paths are never part
//! of it: there is nothing left to format or lint.

use crate::git::{Repository, git_err};
use githooks_core::{Error, Result};

/// Paths relative to the working tree root
pub type ChangeSet = Vec<String>;

/// How a path changed between two trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Path is new in the later tree
    Add,
    /// Content or mode changed
    Modify,
    /// Path is gone from the later tree
    Delete,
}

impl ChangeKind {
    /// Classify a git2 delta; deltas that do not describe a content change
    /// yield `None`
    #[must_use]
    pub fn from_delta(delta: git2::Delta) -> Option<Self> {
        match delta {
            git2::Delta::Added | git2::Delta::Copied => Some(Self::Add),
            git2::Delta::Modified | git2::Delta::Renamed | git2::Delta::Typechange => {
                Some(Self::Modify)
            }
            git2::Delta::Deleted => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Files added or modified by HEAD
///
/// # Errors
///
/// Returns [`Error::NoParentCommit`] when HEAD is a root commit, or a git
/// error if HEAD or the trees cannot be read
pub fn head_change_set(repo: &Repository) -> Result<ChangeSet> {
    let repo = repo.inner();
    let head = match repo.head().and_then(|head| head.peel_to_commit()) {
        Ok(commit) => commit,
        // Nothing committed yet, as seen by `commit-msg` of the first commit
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
            return Err(Error::NoParentCommit {
                commit: "HEAD".to_string(),
            });
        }
        Err(e) => return Err(git_err(e)),
    };

    if head.parent_count() == 0 {
        return Err(Error::NoParentCommit {
            commit: head.id().to_string(),
        });
    }
    let parent = head.parent(0).map_err(git_err)?;

    let old_tree = parent.tree().map_err(git_err)?;
    let new_tree = head.tree().map_err(git_err)?;

    // Parent first: the diff describes what HEAD did
    let diff = repo
        .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
        .map_err(git_err)?;

    let mut paths = Vec::new();
    for delta in diff.deltas() {
        match ChangeKind::from_delta(delta.status()) {
            Some(ChangeKind::Add | ChangeKind::Modify) => {
                if let Some(path) = delta.new_file().path() {
                    paths.push(path.to_string_lossy().into_owned());
                }
            }
            Some(ChangeKind::Delete) | None => {}
        }
    }

    tracing::debug!(commit = %head.id(), files = paths.len(), "Computed change set");
    Ok(paths)
}
