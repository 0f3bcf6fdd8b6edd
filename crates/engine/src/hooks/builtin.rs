//! Built-in catalog
//!
//! Used when no user catalog is installed. Tools that are not present on the
//! machine simply show up as unavailable.

use super::action::{Action, RunType, ShellAction};
use super::catalog::Catalog;
use super::category::Category;
use super::template::{PLACEHOLDER_ARGS, PLACEHOLDER_FILE};
use githooks_core::Result;

const PRIORITY_FORMAT: i32 = 10;
const PRIORITY_LINT: i32 = 20;

struct Entry {
    id: &'static str,
    name: &'static str,
    priority: i32,
    pattern: &'static str,
    command: &'static [&'static str],
    fallbacks: &'static [&'static str],
    run_type: RunType,
}

const DEPOT_TOOLS_GIT_CL: &str = "third_party/depot_tools/git-cl";

const CPP: &str = r"\.(c|cc|h|hh|cpp|hpp)$";

const POST_COMMIT: &[Entry] = &[
    Entry {
        id: "GoFmt",
        name: "Golang Format",
        priority: PRIORITY_FORMAT,
        pattern: r"\.go$",
        command: &["gofmt", "-w", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "GoVet",
        name: "Golang Vet",
        priority: PRIORITY_LINT,
        pattern: r"\.go$",
        command: &["go", "vet"],
        fallbacks: &[],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "ClangFmt",
        name: "Clang Format",
        priority: PRIORITY_FORMAT,
        pattern: CPP,
        command: &["clang-format", "-style=file", "-i", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "ClangTidy",
        name: "Clang Tidy",
        priority: PRIORITY_LINT,
        pattern: CPP,
        command: &["clang-tidy", "-format-style=file", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "JavaFmt",
        name: "Java Format",
        priority: PRIORITY_FORMAT,
        pattern: r"\.java$",
        command: &[
            "google-java-format",
            "-a",
            "-r",
            "--skip-sorting-imports",
            "--fix-imports-only",
            PLACEHOLDER_FILE,
        ],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "RustFmt",
        name: "Rust Format",
        priority: PRIORITY_FORMAT,
        pattern: r"\.rs$",
        command: &["rustfmt", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "RustTidy",
        name: "Rust Tidy (Clippy)",
        priority: PRIORITY_LINT,
        pattern: r"\.rs$",
        command: &["cargo", "clippy", "--fix", "--allow-dirty"],
        fallbacks: &[],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "PythonFmt",
        name: "Python Format (black)",
        priority: PRIORITY_FORMAT,
        pattern: r"\.py$",
        command: &["black", "-q", "-t", "py310", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "ChromeClFmt",
        name: "Chrome CL Format",
        priority: PRIORITY_FORMAT,
        pattern: ".*",
        command: &["git-cl", "format"],
        fallbacks: &[DEPOT_TOOLS_GIT_CL],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "ChromeClPresubmit",
        name: "Chrome CL Presubmit",
        priority: PRIORITY_LINT,
        pattern: ".*",
        command: &["git-cl", "presubmit"],
        fallbacks: &[DEPOT_TOOLS_GIT_CL],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "ChromeGnDeps",
        name: "Chrome GN Deps",
        priority: PRIORITY_LINT,
        pattern: r"^(.*\.gn[i]?|DEPS)$",
        command: &["gn", "gen", "out/android.debug.arm", "--check"],
        fallbacks: &[],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "ChromeJsonFmt",
        name: "Chrome JSON Format",
        priority: PRIORITY_FORMAT,
        pattern: r"\.json$",
        command: &["testing/variations/PRESUBMIT.py", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
    Entry {
        id: "ChromeHistogramFmt",
        name: "Chrome Histogram Format",
        priority: PRIORITY_FORMAT,
        pattern: r"^(histograms|enums)\.xml$",
        command: &["tools/metrics/histograms/validate_format.py", PLACEHOLDER_FILE],
        fallbacks: &[],
        run_type: RunType::PerFile,
    },
];

const COMMIT_MSG: &[Entry] = &[
    Entry {
        id: "ChangeId",
        name: "Git Add ChangeID",
        priority: PRIORITY_FORMAT,
        pattern: ".",
        command: &["git-add-changeid", PLACEHOLDER_ARGS],
        fallbacks: &[],
        run_type: RunType::PerCommit,
    },
    Entry {
        id: "ReflowMsg",
        name: "Reflow Git Commit message",
        priority: PRIORITY_FORMAT,
        pattern: ".",
        command: &["fmt", "-g", "70", PLACEHOLDER_ARGS],
        fallbacks: &[],
        run_type: RunType::PerCommit,
    },
];

fn category(id: &str, name: &str, entries: &[Entry]) -> Result<Category> {
    let actions = entries
        .iter()
        .map(|e| {
            let command = e.command.iter().map(ToString::to_string).collect();
            let fallbacks = e.fallbacks.iter().map(ToString::to_string).collect();
            ShellAction::new(e.id, e.name, e.priority, e.pattern, command, e.run_type)
                .map(|a| Box::new(a.with_fallbacks(fallbacks)) as Box<dyn Action>)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Category::new(id, name, actions))
}

/// Build the built-in catalog
///
/// # Errors
///
/// Returns an error if a built-in pattern fails to compile
pub fn builtin_catalog() -> Result<Catalog> {
    Ok(Catalog::from_categories([
        category("post-commit", "Post Commit", POST_COMMIT)?,
        category("commit-msg", "Commit Message", COMMIT_MSG)?,
    ]))
}
