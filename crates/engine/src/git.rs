//! Repository access
//!
//! Thin helpers over git2 for locating the repository a hook runs in and
//! for reading what the latest commit changed.

use githooks_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to `githooks_core` errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn git_err(e: git2::Error) -> Error {
    Error::Git(e.message().to_string())
}

/// Repository a hook operates on
pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    /// Find the repository containing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a git repository
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path).map_err(git_err)?;
        tracing::debug!(git_dir = %repo.path().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Open the repository at exactly `path`
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a git repository
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            repo: git2::Repository::open(path).map_err(git_err)?,
        })
    }

    /// Underlying git2 handle
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.repo
    }

    /// Path of the `.git` directory
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Working tree root; tools run here
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoWorkTree`] for bare repositories
    pub fn work_tree(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| Error::NoWorkTree(self.repo.path().to_path_buf()))
    }

    /// Directory git looks for hook executables in
    ///
    /// Honors `core.hooksPath`, resolved against the working tree. Linked
    /// worktrees use the hooks of the main repository.
    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .repo
            .config()
            .ok()
            .and_then(|config| config.get_path("core.hooksPath").ok());

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self
                .repo
                .workdir()
                .unwrap_or_else(|| self.repo.path())
                .join(path),
            None => self.repo.commondir().join("hooks"),
        }
    }
}
