//! End-to-end tests for the git-hooks binary

#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_git-hooks");

const CATALOG: &str = r#"{
    "version": 1,
    "hooks": {
        "post-commit": {
            "name": "Post Commit",
            "actions": {
                "Record": {
                    "name": "Record Files",
                    "runType": "perFile",
                    "priority": 10,
                    "filePattern": "\\.go$",
                    "shellCmd": ["sh", "-c", "echo \"$1\" >> ran.log", "record", "<file>"]
                },
                "Broken": {
                    "name": "Broken Tool",
                    "runType": "perCommit",
                    "priority": 20,
                    "filePattern": ".*",
                    "shellCmd": ["sh", "-c", "echo broken >&2; exit 3"]
                },
                "Missing": {
                    "name": "Missing Tool",
                    "runType": "perCommit",
                    "filePattern": ".*",
                    "shellCmd": ["definitely-not-installed-tool"]
                }
            }
        }
    }
}"#;

struct Fixture {
    temp: TempDir,
    catalog: PathBuf,
}

impl Fixture {
    /// Repository with two commits; the second adds `a.go` and `b.txt`
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("repo");
        let repo = git2::Repository::init(&work).unwrap();
        commit(&repo, &[("README.md", "readme\n")]);
        commit(&repo, &[("a.go", "package a\n"), ("b.txt", "b\n")]);

        let catalog = temp.path().join("catalog.json");
        fs::write(&catalog, CATALOG).unwrap();

        Self { temp, catalog }
    }

    fn work(&self) -> PathBuf {
        self.temp.path().join("repo")
    }

    fn enable(&self, action: &str) {
        let repo = git2::Repository::open(self.work()).unwrap();
        repo.config()
            .unwrap()
            .set_str(&format!("post-commit.{action}.enabled"), "true")
            .unwrap();
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(self.work())
            .env("GITHOOKS_CATALOG", &self.catalog)
            .env_remove("GITHOOKS_LOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(Path::new(BIN)).args(args).output().unwrap()
    }
}

fn commit(repo: &git2::Repository, files: &[(&str, &str)]) {
    let work = repo.workdir().unwrap();
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        fs::write(work.join(path), content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = git2::Signature::now("Test", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, "test", &tree, &parents)
        .unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_list_shows_markers() {
    let fixture = Fixture::new();
    fixture.enable("Record");
    fixture.enable("Missing");

    let output = fixture.run(&["list"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Post Commit (post-commit)"), "{text}");
    assert!(text.contains("[ ] Broken Tool"), "{text}");
    assert!(text.contains("[✘] Missing Tool"), "{text}");
    assert!(text.contains("[✔] Record Files"), "{text}");
}

#[test]
fn test_unknown_category_is_a_usage_error() {
    let fixture = Fixture::new();

    let output = fixture.run(&["pre-push"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Unknown hook category 'pre-push'"), "{err}");
    assert!(err.contains("post-commit"), "{err}");
}

#[test]
fn test_run_category_by_name() {
    let fixture = Fixture::new();
    fixture.enable("Record");

    let output = fixture.run(&["post-commit"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let log = fs::read_to_string(fixture.work().join("ran.log")).unwrap();
    assert_eq!(log, "a.go\n");
}

#[test]
fn test_failing_tool_exits_with_failure() {
    let fixture = Fixture::new();
    fixture.enable("Record");
    fixture.enable("Broken");

    let output = fixture.run(&["run", "post-commit"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1 of 2 tool invocations failed"));
    // The other action still ran
    assert!(fixture.work().join("ran.log").exists());
}

#[cfg(unix)]
#[test]
fn test_install_and_symlink_dispatch() {
    let fixture = Fixture::new();
    fixture.enable("Record");

    let output = fixture.run(&["install"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let hook = fixture.work().join(".git/hooks/post-commit");
    assert!(fs::symlink_metadata(&hook).unwrap().file_type().is_symlink());

    let output = fixture.command(&hook).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let log = fs::read_to_string(fixture.work().join("ran.log")).unwrap();
    assert_eq!(log, "a.go\n");
}

#[test]
fn test_first_commit_fails_without_running_tools() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("repo");
    let repo = git2::Repository::init(&work).unwrap();
    commit(&repo, &[("a.go", "package a\n")]);
    repo.config()
        .unwrap()
        .set_str("post-commit.Record.enabled", "true")
        .unwrap();
    let catalog = temp.path().join("catalog.json");
    fs::write(&catalog, CATALOG).unwrap();

    let output = Command::new(BIN)
        .arg("post-commit")
        .current_dir(&work)
        .env("GITHOOKS_CATALOG", &catalog)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("has no parent"), "{}", stderr(&output));
    assert!(!work.join("ran.log").exists());
}

#[test]
fn test_outside_repository_fails() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(BIN)
        .arg("list")
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Not inside a git repository"));
}
