//! Install hook symlinks
//!
//! Every category gets a `<hooks-dir>/<category-id>` symlink pointing at the
//! running executable. git then runs the binary under the category's name.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::RuntimeContext;
use crate::ui::StatusIcon;

/// What happened to one hook file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Symlink created
    Created,
    /// Symlink already points at the executable
    Unchanged,
    /// Existing file replaced
    Replaced,
    /// Existing file left alone
    Skipped,
}

/// Link every category of the catalog into the hooks directory
pub fn run(context: &RuntimeContext, force: bool) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let hooks_dir = context.repo.hooks_dir();

    let results = install(&hooks_dir, &exe, &context.catalog.ids(), force)?;

    for (id, outcome) in &results {
        let link = hook_path(&hooks_dir, id);
        match outcome {
            InstallOutcome::Created | InstallOutcome::Replaced => println!(
                "{} Installed {}",
                StatusIcon::Success.get().green(),
                link.display().cyan()
            ),
            InstallOutcome::Unchanged => println!(
                "{} Already installed {}",
                StatusIcon::Success.get().green(),
                link.display()
            ),
            InstallOutcome::Skipped => println!(
                "{} Skipped {} (file exists, use --force to replace)",
                StatusIcon::Warning.get().yellow(),
                link.display().yellow()
            ),
        }
    }

    Ok(())
}

/// Create `hooks_dir/<id>` symlinks to `exe` for every id
pub fn install(
    hooks_dir: &Path,
    exe: &Path,
    ids: &[&str],
    force: bool,
) -> Result<Vec<(String, InstallOutcome)>> {
    fs::create_dir_all(hooks_dir)
        .with_context(|| format!("Failed to create {}", hooks_dir.display()))?;

    ids.iter()
        .map(|id| {
            let outcome = install_one(&hook_path(hooks_dir, id), exe, force)?;
            tracing::debug!(hook = *id, ?outcome, "Installed hook");
            Ok(((*id).to_string(), outcome))
        })
        .collect()
}

fn install_one(link: &Path, exe: &Path, force: bool) -> Result<InstallOutcome> {
    let existing = match fs::symlink_metadata(link) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", link.display()));
        }
    };

    let Some(meta) = existing else {
        symlink(exe, link)?;
        return Ok(InstallOutcome::Created);
    };

    if meta.file_type().is_symlink() && fs::read_link(link).ok().as_deref() == Some(exe) {
        return Ok(InstallOutcome::Unchanged);
    }

    if !force {
        return Ok(InstallOutcome::Skipped);
    }
    if meta.is_dir() {
        bail!("Refusing to replace directory {}", link.display());
    }

    fs::remove_file(link).with_context(|| format!("Failed to remove {}", link.display()))?;
    symlink(exe, link)?;
    Ok(InstallOutcome::Replaced)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("Failed to link {} to {}", link.display(), target.display()))
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<()> {
    bail!("Hook symlinks are not supported on this platform: {}", link.display())
}

/// Path the hook for `id` would be installed at
#[must_use]
pub fn hook_path(hooks_dir: &Path, id: &str) -> PathBuf {
    hooks_dir.join(id)
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("git-hooks");
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        let hooks_dir = temp.path().join(".git/hooks");
        (temp, exe, hooks_dir)
    }

    #[test]
    fn test_install_creates_symlinks() {
        let (_temp, exe, hooks_dir) = setup();

        let results = install(&hooks_dir, &exe, &["post-commit", "commit-msg"], false).unwrap();

        assert_eq!(
            results,
            vec![
                ("post-commit".to_string(), InstallOutcome::Created),
                ("commit-msg".to_string(), InstallOutcome::Created),
            ]
        );
        assert_eq!(fs::read_link(hook_path(&hooks_dir, "post-commit")).unwrap(), exe);
    }

    #[test]
    fn test_install_is_idempotent() {
        let (_temp, exe, hooks_dir) = setup();
        install(&hooks_dir, &exe, &["post-commit"], false).unwrap();

        let results = install(&hooks_dir, &exe, &["post-commit"], false).unwrap();
        assert_eq!(results[0].1, InstallOutcome::Unchanged);
    }

    #[test]
    fn test_install_skips_foreign_hook() {
        let (_temp, exe, hooks_dir) = setup();
        fs::create_dir_all(&hooks_dir).unwrap();
        let existing = hook_path(&hooks_dir, "post-commit");
        fs::write(&existing, "#!/bin/sh\necho mine\n").unwrap();

        let results = install(&hooks_dir, &exe, &["post-commit"], false).unwrap();
        assert_eq!(results[0].1, InstallOutcome::Skipped);
        assert_eq!(
            fs::read_to_string(&existing).unwrap(),
            "#!/bin/sh\necho mine\n"
        );
    }

    #[test]
    fn test_install_force_replaces_foreign_hook() {
        let (_temp, exe, hooks_dir) = setup();
        fs::create_dir_all(&hooks_dir).unwrap();
        let existing = hook_path(&hooks_dir, "post-commit");
        fs::write(&existing, "#!/bin/sh\n").unwrap();

        let results = install(&hooks_dir, &exe, &["post-commit"], true).unwrap();
        assert_eq!(results[0].1, InstallOutcome::Replaced);
        assert_eq!(fs::read_link(&existing).unwrap(), exe);
    }
}
