//! Actions: single tool bindings
//!
//! An action couples a tool command line with a file filter, a run cadence
//! and a selection state persisted in its configuration section.
//!
//! ## Selection
//!
//! - `selected` is the user's choice and is written to the `enabled` key
//! - `available` is decided once, when the configuration section is bound,
//!   by resolving the executable; the user cannot change it
//! - a selected action whose tool is missing stays selected but never runs
//!
//! Mutating selection or running an action before a section is bound is a
//! programming error and panics.

use super::executor::{CommandExecutor, ExecutableResolver};
use super::template::{
    PLACEHOLDER_ARGS, PLACEHOLDER_FILE, Substitution, Substitutions, substitute_command_line,
};
use githooks_core::{Error, Result, SectionHandle};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Configuration key controlling whether the action is enabled
pub const KEY_ENABLED: &str = "enabled";

/// Configuration key overriding the executable path
pub const KEY_COMMAND: &str = "cmd";

const VALUE_TRUE: &str = "true";

/// Execution cadence of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunType {
    /// Run once per commit, if any file matches
    PerCommit,
    /// Run once for every matching file
    PerFile,
}

impl RunType {
    /// Get the catalog name of this run type
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RunType::PerCommit => "perCommit",
            RunType::PerFile => "perFile",
        }
    }
}

/// Selection state as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No preference persisted yet
    Unknown,
    /// Selected, but the tool is not installed
    Unavailable,
    /// Explicitly deselected
    Disabled,
    /// Selected and runnable
    Enabled,
}

/// Result of running one action against a change set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Number of tool invocations
    pub invocations: usize,
    /// Invocations that exited non-zero or could not be started
    pub failures: usize,
}

impl ActionReport {
    fn record(&mut self, success: bool) {
        self.invocations += 1;
        if !success {
            self.failures += 1;
        }
    }

    /// Whether every invocation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// Capabilities shared by every kind of action
pub trait Action: fmt::Debug {
    /// Unique ID within the category, used as config subsection
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Execution priority, lower runs first
    fn priority(&self) -> i32;

    /// Whether the user wants this action to run
    fn is_selected(&self) -> bool;

    /// Whether the backing tool is installed
    fn is_available(&self) -> bool;

    /// Combined selection state for presentation
    fn state(&self) -> SelectionState;

    /// Change and persist the selection
    fn set_selected(&mut self, selected: bool);

    /// Flip the selection; always legal
    fn toggle(&mut self) {
        let selected = !self.is_selected();
        self.set_selected(selected);
    }

    /// Attach the configuration section and resolve the tool
    fn bind_config(&mut self, section: SectionHandle, resolver: &dyn ExecutableResolver);

    /// Run against `files` with the hook arguments `args`
    fn run(
        &self,
        files: &[String],
        args: &[String],
        executor: &dyn CommandExecutor,
    ) -> ActionReport;
}

/// Action executing a tool from the shell
pub struct ShellAction {
    id: String,
    name: String,
    priority: i32,
    file_pattern: Regex,
    shell_command: Vec<String>,
    fallbacks: Vec<String>,
    run_type: RunType,
    selected: bool,
    available: bool,
    preference_seen: bool,
    config: Option<SectionHandle>,
}

impl ShellAction {
    /// Create a new action
    ///
    /// # Errors
    ///
    /// Returns an error if `file_pattern` is not a valid regular expression or
    /// `shell_command` is empty
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        priority: i32,
        file_pattern: &str,
        shell_command: Vec<String>,
        run_type: RunType,
    ) -> Result<Self> {
        let id = id.into();

        let file_pattern = Regex::new(file_pattern).map_err(|e| Error::InvalidPattern {
            action: id.clone(),
            pattern: file_pattern.to_string(),
            reason: e.to_string(),
        })?;

        if shell_command.first().is_none_or(String::is_empty) {
            return Err(Error::Catalog(format!(
                "Action '{id}' has an empty shell command"
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            priority,
            file_pattern,
            shell_command,
            fallbacks: Vec::new(),
            run_type,
            selected: false,
            available: false,
            preference_seen: false,
            config: None,
        })
    }

    /// Executables tried in order when token 0 cannot be resolved
    ///
    /// Ignored when the config section overrides the command.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Execution cadence
    #[must_use]
    pub fn run_type(&self) -> RunType {
        self.run_type
    }

    /// Pattern matched against file base names
    #[must_use]
    pub fn file_pattern(&self) -> &Regex {
        &self.file_pattern
    }

    /// Command tokens; token 0 is the resolved executable once bound
    #[must_use]
    pub fn shell_command(&self) -> &[String] {
        &self.shell_command
    }

    fn section(&self) -> &SectionHandle {
        match &self.config {
            Some(section) => section,
            None => panic!("action '{}' used before a config section was bound", self.id),
        }
    }

    /// Whether the base name of `file` matches the file pattern
    #[must_use]
    pub fn matches(&self, file: &str) -> bool {
        let base = Path::new(file)
            .file_name()
            .map_or(file.into(), |name| name.to_string_lossy());
        self.file_pattern.is_match(&base)
    }

    fn invoke(&self, command: &[String], executor: &dyn CommandExecutor) -> bool {
        match executor.execute(command) {
            Ok(output) => {
                if !output.stdout.is_empty() {
                    tracing::info!("{} output: {}", self.name, output.stdout);
                }
                if output.success() {
                    if !output.stderr.is_empty() {
                        tracing::warn!("{} error: {}", self.name, output.stderr);
                    }
                    true
                } else {
                    tracing::error!(
                        action = %self.id,
                        status = ?output.status,
                        "{} failed: {}",
                        self.name,
                        output.stderr
                    );
                    false
                }
            }
            Err(e) => {
                tracing::error!(action = %self.id, "{} failed: {}", self.name, e);
                false
            }
        }
    }
}

impl fmt::Debug for ShellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellAction")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("file_pattern", &self.file_pattern.as_str())
            .field("shell_command", &self.shell_command)
            .field("fallbacks", &self.fallbacks)
            .field("run_type", &self.run_type)
            .field("selected", &self.selected)
            .field("available", &self.available)
            .field("bound", &self.config.is_some())
            .finish()
    }
}

impl Action for ShellAction {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn state(&self) -> SelectionState {
        match (self.selected, self.available) {
            (true, true) => SelectionState::Enabled,
            (true, false) => SelectionState::Unavailable,
            (false, _) if self.preference_seen => SelectionState::Disabled,
            (false, _) => SelectionState::Unknown,
        }
    }

    fn set_selected(&mut self, selected: bool) {
        let section = self.section();
        if selected {
            section.set(KEY_ENABLED, VALUE_TRUE);
        } else {
            section.remove(KEY_ENABLED);
        }

        self.selected = selected;
        self.preference_seen = true;
        tracing::debug!(
            action = %self.id,
            selected,
            available = self.available,
            "Selection changed"
        );
    }

    fn bind_config(&mut self, section: SectionHandle, resolver: &dyn ExecutableResolver) {
        let resolution = if section.has(KEY_COMMAND) {
            resolver.resolve(&section.get_or_default(KEY_COMMAND, ""))
        } else {
            let mut resolution = resolver.resolve(&self.shell_command[0]);
            for fallback in &self.fallbacks {
                if resolution.available {
                    break;
                }
                resolution = resolver.resolve(fallback);
            }
            resolution
        };
        if resolution.available {
            self.shell_command[0] = resolution.path.to_string_lossy().into_owned();
        }
        self.available = resolution.available;

        // Absent and "false" both mean not selected
        if section.has(KEY_ENABLED) {
            self.selected = section.get_or_default(KEY_ENABLED, "") == VALUE_TRUE;
            self.preference_seen = true;
        }

        self.config = Some(section);
    }

    fn run(
        &self,
        files: &[String],
        args: &[String],
        executor: &dyn CommandExecutor,
    ) -> ActionReport {
        let _ = self.section();
        let mut report = ActionReport::default();

        if !self.selected {
            return report;
        }
        if !self.available {
            tracing::debug!(
                "Cannot run {} - missing command {}",
                self.name,
                self.shell_command[0]
            );
            return report;
        }

        let mut substitutions = Substitutions::new();
        substitutions.insert(PLACEHOLDER_ARGS.to_string(), Substitution::from(args));

        for file in files {
            if !self.matches(file) {
                continue;
            }

            substitutions.insert(PLACEHOLDER_FILE.to_string(), Substitution::from(file.as_str()));
            let command = substitute_command_line(&self.shell_command, &substitutions);

            match self.run_type {
                RunType::PerCommit => tracing::info!("Running {}", self.name),
                RunType::PerFile => tracing::info!("Running {} on {}", self.name, file),
            }

            report.record(self.invoke(&command, executor));

            if self.run_type == RunType::PerCommit {
                break;
            }
        }

        report
    }
}
