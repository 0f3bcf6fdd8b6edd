//! Git-config backed configuration store
//!
//! Every `(category, action)` pair maps to a `[<category> "<action>"]`
//! section of the repository's local `.git/config`:
//!
//! ```text
//! [post-commit "GoFmt"]
//!     enabled = true
//!     cmd = /opt/go/bin/gofmt
//! ```
//!
//! The file is read once when the store is opened. Mutations are staged in
//! memory and written by [`ConfigStore::save`], which applies them to a copy
//! of the file and renames the copy over the original. Readers never observe
//! a partially written config.

use githooks_core::traits::{ConfigStore, SectionChange, SectionHandle, SharedSection};
use githooks_core::{Error, Result};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Helper function to convert git2 errors to `githooks_core` errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
fn git_err(e: git2::Error) -> Error {
    Error::Git(e.message().to_string())
}

type SectionMap = IndexMap<(String, String), Rc<SharedSection>>;

/// Configuration store persisting into a git config file
#[derive(Debug)]
pub struct GitConfigStore {
    path: PathBuf,
    sections: RefCell<SectionMap>,
}

impl GitConfigStore {
    /// Open the local config of `repo`
    ///
    /// Linked worktrees share the config of the main repository, so the file
    /// is taken from the common directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed
    pub fn open(repo: &git2::Repository) -> Result<Self> {
        Self::open_path(&repo.commondir().join("config"))
    }

    /// Open a config file at an explicit path
    ///
    /// A missing file is treated as empty; it is created on the first save
    /// that has something to write.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut values: IndexMap<(String, String), IndexMap<String, String>> = IndexMap::new();

        if path.exists() {
            let config = git2::Config::open(path).map_err(git_err)?;
            let mut entries = config.entries(None).map_err(git_err)?;
            while let Some(entry) = entries.next() {
                let entry = entry.map_err(git_err)?;
                let (Some(name), Some(value)) = (entry.name(), entry.value()) else {
                    continue;
                };
                if let Some((section, subsection, key)) = split_key(name) {
                    values
                        .entry((section.to_string(), subsection.to_string()))
                        .or_default()
                        .insert(key.to_string(), value.to_string());
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            sections = values.len(),
            "Loaded repository config"
        );

        let sections = values
            .into_iter()
            .map(|(id, values)| (id, Rc::new(SharedSection::with_values(values))))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            sections: RefCell::new(sections),
        })
    }

    /// Path of the backing config file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply staged changes to the file at `target`
    fn apply_changes(target: &Path, dirty: &[(String, String, Vec<SectionChange>)]) -> Result<()> {
        let mut config = git2::Config::open(target).map_err(git_err)?;

        for (section, subsection, changes) in dirty {
            for change in changes {
                match change {
                    SectionChange::Set { key, value } => {
                        config
                            .set_str(&format!("{section}.{subsection}.{key}"), value)
                            .map_err(git_err)?;
                    }
                    SectionChange::Remove { key } => {
                        match config.remove(&format!("{section}.{subsection}.{key}")) {
                            Err(e) if e.code() != git2::ErrorCode::NotFound => {
                                return Err(git_err(e));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl ConfigStore for GitConfigStore {
    fn section(&self, category: &str, action: &str) -> SectionHandle {
        // Section names are case-insensitive in git and come back lowercased
        let id = (category.to_ascii_lowercase(), action.to_string());
        let section: Rc<SharedSection> =
            Rc::clone(self.sections.borrow_mut().entry(id).or_default());
        section
    }

    fn save(&self) -> Result<()> {
        let sections = self.sections.borrow();
        let dirty: Vec<(String, String, Vec<SectionChange>)> = sections
            .iter()
            .filter(|(_, section)| section.is_dirty())
            .map(|((name, sub), section)| (name.clone(), sub.clone(), section.pending_changes()))
            .collect();

        if dirty.is_empty() {
            tracing::debug!("No configuration changes to save");
            return Ok(());
        }

        let dir = self.path.parent().ok_or_else(|| {
            Error::Config(format!(
                "Cannot determine directory of {}",
                self.path.display()
            ))
        })?;

        // Stage into a sibling file so the final rename stays on one filesystem
        let staged = tempfile::Builder::new()
            .prefix(".config-githooks-")
            .tempfile_in(dir)?;
        if self.path.exists() {
            fs::copy(&self.path, staged.path())?;
        }

        Self::apply_changes(staged.path(), &dirty)?;

        staged
            .persist(&self.path)
            .map_err(|e| Error::Io(e.error))?;

        for section in sections.values() {
            section.mark_persisted();
        }

        tracing::debug!(
            path = %self.path.display(),
            sections = dirty.len(),
            "Saved repository config"
        );
        Ok(())
    }
}

/// Split `section.subsection.key` into its parts
///
/// The subsection may itself contain dots. Keys without a subsection
/// (`core.bare`) are not action sections and yield `None`.
fn split_key(name: &str) -> Option<(&str, &str, &str)> {
    let (section, rest) = name.split_once('.')?;
    let (subsection, key) = rest.rsplit_once('.')?;
    if subsection.is_empty() {
        return None;
    }
    Some((section, subsection, key))
}
