//! Non-interactive category execution
//!
//! Invoked when git fires a hook: compute what HEAD changed, then run the
//! category's actions against it from the working tree root.

use super::category::CategoryReport;
use super::catalog::Catalog;
use super::executor::{CommandExecutor, ShellExecutor};
use crate::changeset::{ChangeSet, head_change_set};
use crate::git::Repository;
use githooks_core::Result;

/// Runs categories of a catalog against a repository
pub struct HookRunner<'a> {
    repo: &'a Repository,
    catalog: &'a Catalog,
}

impl<'a> HookRunner<'a> {
    /// Create a runner; the catalog must already be bound to a config store
    #[must_use]
    pub fn new(repo: &'a Repository, catalog: &'a Catalog) -> Self {
        Self { repo, catalog }
    }

    /// Files changed by HEAD
    ///
    /// # Errors
    ///
    /// Returns [`githooks_core::Error::NoParentCommit`] when HEAD has no parent, or a git
    /// error if the repository cannot be read
    pub fn change_set(&self) -> Result<ChangeSet> {
        head_change_set(self.repo)
    }

    /// Run `category_id` with the arguments git passed to the hook
    ///
    /// Tools run in the working tree root.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is unknown, the repository has no
    /// working tree or the change set cannot be computed, including when HEAD
    /// is the first commit
    pub fn run(&self, category_id: &str, args: &[String]) -> Result<CategoryReport> {
        let executor = ShellExecutor::new(self.repo.work_tree()?);
        self.run_with(category_id, args, &executor)
    }

    /// Run `category_id` through a specific executor
    ///
    /// # Errors
    ///
    /// Returns an error if the category is unknown or the change set cannot be
    /// computed
    pub fn run_with(
        &self,
        category_id: &str,
        args: &[String],
        executor: &dyn CommandExecutor,
    ) -> Result<CategoryReport> {
        let category = self.catalog.require(category_id)?;
        let change_set = self.change_set()?;

        let report = category.run(&change_set, args, executor);
        tracing::debug!(
            category = category_id,
            invocations = report.invocations(),
            failures = report.failures(),
            "Category finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::changeset::test_repo::commit;
    use crate::hooks::action::{RunType, ShellAction};
    use crate::hooks::category::Category;
    use crate::hooks::testing::{RecordingExecutor, StaticResolver, strings};
    use githooks_core::{ConfigStore, Error, MemoryStore};
    use tempfile::TempDir;

    fn repo_with_history() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let git = git2::Repository::init(temp.path()).unwrap();
        commit(&git, &[("README.md", "readme\n")], &[]);
        commit(&git, &[("a.go", "package a\n"), ("b.txt", "b\n")], &[]);
        let repo = Repository::open(temp.path()).unwrap();
        (temp, repo)
    }

    fn catalog(pattern: &str, command: &[&str], run_type: RunType) -> Catalog {
        let action =
            ShellAction::new("Tool", "Tool", 0, pattern, strings(command), run_type).unwrap();
        Catalog::from_categories([Category::new(
            "post-commit",
            "Post Commit",
            vec![Box::new(action)],
        )])
    }

    fn enable(catalog: &mut Catalog, tools: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        store.section("post-commit", "Tool").set("enabled", "true");
        catalog.set_config_store(&store, &StaticResolver::with(tools));
        store
    }

    #[test]
    fn test_per_file_runs_on_matching_changes_only() {
        let (_temp, repo) = repo_with_history();
        let mut catalog = catalog(r"\.go$", &["gofmt", "-w", "<file>"], RunType::PerFile);
        let _store = enable(&mut catalog, &["gofmt"]);
        let executor = RecordingExecutor::new();

        let report = HookRunner::new(&repo, &catalog)
            .run_with("post-commit", &[], &executor)
            .unwrap();

        assert_eq!(report.invocations(), 1);
        assert_eq!(
            executor.commands(),
            vec![strings(&["/usr/bin/gofmt", "-w", "a.go"])]
        );
    }

    #[test]
    fn test_per_commit_runs_once() {
        let (_temp, repo) = repo_with_history();
        let mut catalog = catalog(".*", &["go", "vet"], RunType::PerCommit);
        let _store = enable(&mut catalog, &["go"]);
        let executor = RecordingExecutor::new();

        HookRunner::new(&repo, &catalog)
            .run_with("post-commit", &[], &executor)
            .unwrap();

        assert_eq!(executor.commands(), vec![strings(&["/usr/bin/go", "vet"])]);
    }

    #[test]
    fn test_unknown_category() {
        let (_temp, repo) = repo_with_history();
        let catalog = catalog(".*", &["go", "vet"], RunType::PerCommit);

        let err = HookRunner::new(&repo, &catalog)
            .run_with("pre-push", &[], &RecordingExecutor::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(_)));
    }

    #[test]
    fn test_root_commit_is_an_error() {
        let temp = TempDir::new().unwrap();
        let git = git2::Repository::init(temp.path()).unwrap();
        commit(&git, &[("a.go", "package a\n")], &[]);
        let repo = Repository::open(temp.path()).unwrap();

        let mut catalog = catalog(r"\.go$", &["gofmt", "-w", "<file>"], RunType::PerFile);
        let _store = enable(&mut catalog, &["gofmt"]);
        let executor = RecordingExecutor::new();

        let err = HookRunner::new(&repo, &catalog)
            .run_with("post-commit", &[], &executor)
            .unwrap_err();
        assert!(matches!(err, Error::NoParentCommit { .. }));
        assert!(executor.commands().is_empty());
    }

    #[test]
    fn test_run_executes_in_work_tree() {
        let (temp, repo) = repo_with_history();
        let mut catalog = catalog(r"\.go$", &["sh", "-c", "test -f a.go"], RunType::PerCommit);
        let store = MemoryStore::new();
        store.section("post-commit", "Tool").set("enabled", "true");
        let resolver = crate::hooks::executor::PathResolver::new(temp.path());
        catalog.set_config_store(&store, &resolver);

        let report = HookRunner::new(&repo, &catalog)
            .run("post-commit", &[])
            .unwrap();
        assert_eq!(report.invocations(), 1);
        assert!(report.is_success());
    }
}
