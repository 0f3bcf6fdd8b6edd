//! Common state shared across CLI commands

use anyhow::{Context, Result};
use githooks_config::GitConfigStore;
use githooks_engine::hooks::{Catalog, CatalogLoader, PathResolver, builtin_catalog};
use githooks_engine::Repository;
use std::path::{Path, PathBuf};

/// Everything a command needs: the repository, its config store and the
/// catalog bound to that store
pub struct RuntimeContext {
    /// Repository containing the current directory
    pub repo: Repository,
    /// Per-repository action state
    pub store: GitConfigStore,
    /// Known categories, bound to `store`
    pub catalog: Catalog,
}

impl RuntimeContext {
    /// Open the repository around the current directory and load the catalog
    ///
    /// `catalog_path` overrides catalog discovery. Without a user catalog the
    /// built-in one is used.
    pub fn new(catalog_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::open(&cwd, catalog_path)
    }

    /// Like [`RuntimeContext::new`], starting the repository search at `dir`
    pub fn open(dir: &Path, catalog_path: Option<&Path>) -> Result<Self> {
        let repo = Repository::discover(dir)
            .with_context(|| format!("Not inside a git repository: {}", dir.display()))?;
        let work_tree = repo.work_tree()?.to_path_buf();

        let store = GitConfigStore::open(repo.inner())
            .context("Failed to read repository configuration")?;

        let mut catalog = load_catalog(catalog_path)?;
        catalog.set_config_store(&store, &PathResolver::new(&work_tree));

        Ok(Self {
            repo,
            store,
            catalog,
        })
    }
}

fn load_catalog(catalog_path: Option<&Path>) -> Result<Catalog> {
    let path: Option<PathBuf> = catalog_path
        .map(Path::to_path_buf)
        .or_else(githooks_config::find_catalog_file);

    match path {
        Some(path) => CatalogLoader::new(&path)
            .load_or_builtin()
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => {
            tracing::debug!("No user catalog installed");
            Ok(builtin_catalog()?)
        }
    }
}
