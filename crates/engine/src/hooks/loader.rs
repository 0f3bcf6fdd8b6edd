//! Catalog loading
//!
//! Reads a user catalog file (JSON). Version 0, or a document without a
//! version, describes no categories. Version 1 is the current format. Any
//! other version is rejected.

use super::builtin::builtin_catalog;
use super::catalog::Catalog;
use super::config::{CATALOG_VERSION, CatalogDocument};
use githooks_core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load a catalog from a file
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    /// Create a loader for the catalog at `path`
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Path of the catalog file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the catalog file exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the user catalog
    ///
    /// A missing file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, declares an
    /// unsupported version or contains an invalid definition
    pub fn load(&self) -> Result<Catalog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Catalog file does not exist: {}", self.path.display());
                return Ok(Catalog::new());
            }
            Err(e) => return Err(e.into()),
        };

        parse_catalog(&content).map_err(|e| match e {
            Error::Catalog(msg) => {
                Error::Catalog(format!("{}: {msg}", self.path.display()))
            }
            other => other,
        })
    }

    /// Load the user catalog, falling back to the built-in one when the
    /// user catalog defines nothing
    ///
    /// # Errors
    ///
    /// Returns an error if the user catalog exists but is invalid
    pub fn load_or_builtin(&self) -> Result<Catalog> {
        let catalog = self.load()?;
        if catalog.is_empty() {
            tracing::debug!("Using built-in catalog");
            return builtin_catalog();
        }

        tracing::debug!(
            path = %self.path.display(),
            categories = catalog.len(),
            "Loaded user catalog"
        );
        Ok(catalog)
    }
}

/// Parse a catalog document
///
/// # Errors
///
/// Returns an error if the JSON is malformed, the version is unsupported or a
/// definition is invalid
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| Error::Catalog(format!("Malformed catalog: {e}")))?;
    // Derived structs also accept the sequence form; a catalog is an object
    if !value.is_object() {
        return Err(Error::Catalog(
            "Malformed catalog: expected a JSON object".to_string(),
        ));
    }
    let document: CatalogDocument = serde_json::from_value(value)
        .map_err(|e| Error::Catalog(format!("Malformed catalog: {e}")))?;

    if document.version == 0 {
        return Ok(Catalog::new());
    }
    if document.version != CATALOG_VERSION {
        return Err(Error::UnsupportedCatalogVersion {
            version: document.version,
        });
    }

    let categories = document
        .hooks
        .iter()
        .map(|(id, category)| category.build(id))
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog::from_categories(categories))
}
