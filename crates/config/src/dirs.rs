//! Catalog file locations
//!
//! The user catalog is looked up in two places, first match wins:
//! - `~/.githooks.json`
//! - `$XDG_CONFIG_HOME/git-hooks/catalog.json` (`~/.config/git-hooks/catalog.json`)

use std::path::PathBuf;
use xdg::BaseDirectories;

/// File name of the catalog in the home directory
pub const HOME_CATALOG_NAME: &str = ".githooks.json";

/// File name of the catalog in the XDG config directory
pub const XDG_CATALOG_NAME: &str = "catalog.json";

/// Get the catalog path in the home directory
///
/// Returns `~/.githooks.json`
#[must_use]
pub fn default_catalog_file() -> Option<PathBuf> {
    ::dirs::home_dir().map(|home| home.join(HOME_CATALOG_NAME))
}

/// Get the catalog path in the XDG config directory
///
/// Returns `$XDG_CONFIG_HOME/git-hooks/catalog.json`
#[must_use]
pub fn xdg_catalog_file() -> Option<PathBuf> {
    BaseDirectories::with_prefix("git-hooks")
        .get_config_home()
        .map(|dir| dir.join(XDG_CATALOG_NAME))
}

/// Find the first existing catalog file
///
/// Returns `None` when no user catalog is installed, in which case the
/// built-in catalog applies.
#[must_use]
pub fn find_catalog_file() -> Option<PathBuf> {
    [default_catalog_file(), xdg_catalog_file()]
        .into_iter()
        .flatten()
        .find(|path| path.is_file())
}
