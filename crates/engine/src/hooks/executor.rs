//! Shell executor
//!
//! Two independent responsibilities:
//! - [`ExecutableResolver`]: turn a tool name into an absolute path, or report
//!   that the tool is not installed
//! - [`CommandExecutor`]: run a fully expanded command line and capture its
//!   output
//!
//! Both are rooted at an explicit directory (the repository working tree).
//! The process working directory is never consulted or changed.

use githooks_core::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Outcome of looking up an executable
///
/// Absence is a normal outcome: the action is simply unavailable on this
/// machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Absolute path of the executable, or the name as given when not found
    pub path: PathBuf,
    /// Whether the executable exists
    pub available: bool,
}

impl Resolution {
    /// Executable found at `path`
    #[must_use]
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            available: true,
        }
    }

    /// Executable `name` could not be located
    #[must_use]
    pub fn missing(name: impl Into<PathBuf>) -> Self {
        Self {
            path: name.into(),
            available: false,
        }
    }
}

/// Locates executables for actions
pub trait ExecutableResolver {
    /// Resolve `name` to an executable path
    fn resolve(&self, name: &str) -> Resolution;
}

/// Resolver searching `PATH`, then the base directory
///
/// Tools shipped inside a repository (`tools/metrics/validate_format.py`) are
/// found relative to the base directory, which is normally the working tree
/// root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
    search_path: Option<OsString>,
}

impl PathResolver {
    /// Create a resolver using the process `PATH`
    #[must_use]
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Replace the search path (colon separated on Unix)
    #[must_use]
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }
}

impl ExecutableResolver for PathResolver {
    fn resolve(&self, name: &str) -> Resolution {
        if name.is_empty() {
            return Resolution::missing(name);
        }

        if let Ok(path) = which::which_in(name, self.search_path.as_ref(), &self.base_dir) {
            tracing::trace!(name, path = %path.display(), "Resolved executable");
            return Resolution::found(path);
        }

        // Not on PATH (or not executable): accept any file under the base dir
        let candidate = self.base_dir.join(name);
        if candidate.is_file() {
            tracing::trace!(
                name,
                path = %candidate.display(),
                "Resolved file relative to base dir"
            );
            return Resolution::found(candidate);
        }

        tracing::debug!(name, "Executable not found");
        Resolution::missing(name)
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub status: Option<i32>,
    /// Standard output, trimmed
    pub stdout: String,
    /// Standard error, trimmed
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs expanded command lines
pub trait CommandExecutor {
    /// Run `command` (token 0 is the program) and wait for it to exit
    ///
    /// A non-zero exit is a successful call reporting a failed status.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is empty or the process cannot be started
    fn execute(&self, command: &[String]) -> Result<CommandOutput>;
}

/// Executor spawning processes directly (no shell) via duct
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    work_dir: PathBuf,
}

impl ShellExecutor {
    /// Create an executor running commands in `work_dir`
    #[must_use]
    pub fn new(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
        }
    }

    /// Directory commands run in
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl CommandExecutor for ShellExecutor {
    #[tracing::instrument(skip(self), fields(work_dir = %self.work_dir.display()))]
    fn execute(&self, command: &[String]) -> Result<CommandOutput> {
        let Some((program, args)) = command.split_first() else {
            return Err(Error::Message("Empty command".to_string()));
        };

        tracing::debug!("Executing command: {} {:?}", program, args);

        let output = duct::cmd(program, args)
            .dir(&self.work_dir)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
