//! git-hooks CLI library
//!
//! This library contains all the CLI logic for git-hooks, making it reusable
//! for testing.
//!
//! The binary is usually invoked by git through a symlink in `.git/hooks`.
//! In that case the symlink's file name is the category to run and every
//! argument belongs to the hook.

pub mod cmd;
pub mod common;
pub mod error;
pub mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use common::RuntimeContext;
use error::CommandError;

/// Name of the installed binary
pub const BIN_NAME: &str = "git-hooks";

/// git-hooks - per-repository git hook manager
#[derive(Parser, Debug)]
#[command(name = "git-hooks")]
#[command(about = "Select and run formatting and linting tools from git hooks")]
#[command(version)]
#[command(long_about = "Select and run formatting and linting tools from git hooks

Tools are grouped by the git hook that triggers them. The selection is stored
in the repository's .git/config, so every clone decides for itself.

Run without arguments to pick tools interactively, then `git-hooks install`
to link the hooks into the repository.")]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, global = true, env = "GITHOOKS_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to the catalog file (default: ~/.githooks.json)
    #[arg(long, global = true, env = "GITHOOKS_CATALOG", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute (default: configure)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for git-hooks
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose which tools run, interactively
    Configure,

    /// Run the tools of a category against the files changed by HEAD
    Run {
        /// Category to run, such as post-commit
        category: String,

        /// Arguments passed by git to the hook
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List categories and the selection state of their tools
    List,

    /// Link every category into the repository's hooks directory
    Install {
        /// Replace existing hook files
        #[arg(short, long)]
        force: bool,
    },

    /// Run a category by name: `git-hooks post-commit`
    #[command(external_subcommand)]
    Category(Vec<String>),
}

impl Cli {
    /// Parse process arguments, honoring invocation through a hook symlink
    ///
    /// When the program name is not [`BIN_NAME`] it is taken as the category
    /// to run and all arguments are passed to that category unparsed.
    #[must_use]
    pub fn parse_invocation<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().collect();

        if let Some(category) = args.first().and_then(|arg0| hook_name(arg0)) {
            tracing::trace!(category, "Invoked through hook symlink");
            let hook_args = args.split_off(1);
            let mut rewritten: Vec<OsString> =
                vec![BIN_NAME.into(), "run".into(), category.into(), "--".into()];
            rewritten.extend(hook_args);
            return Self::parse_from(rewritten);
        }

        Self::parse_from(args)
    }
}

/// Category named by the program name, if invoked through a hook symlink
fn hook_name(arg0: &OsStr) -> Option<String> {
    let name = Path::new(arg0).file_name()?.to_str()?;
    let name = name.strip_suffix(".exe").unwrap_or(name);
    (name != BIN_NAME && !name.is_empty()).then(|| name.to_string())
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The repository or catalog cannot be opened
/// - Command execution fails, including failed tools
pub fn run(cli: Cli) -> Result<()> {
    githooks_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let mut context = RuntimeContext::new(cli.catalog.as_deref())?;

    match cli.command.unwrap_or(Commands::Configure) {
        Commands::Configure => cmd::configure::run(&mut context)?,
        Commands::Run { category, args } => cmd::run::run(&context, &category, &args)?,
        Commands::List => cmd::list::run(&context)?,
        Commands::Install { force } => cmd::install::run(&context, force)?,
        Commands::Category(mut words) => {
            if words.is_empty() {
                return Err(CommandError::unknown_category("", context.catalog.ids()).into());
            }
            let category = words.remove(0);
            cmd::run::run(&context, &category, &words)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_invocation(args.iter().map(OsString::from))
    }

    #[test]
    fn test_hook_name() {
        assert_eq!(hook_name(OsStr::new("git-hooks")), None);
        assert_eq!(hook_name(OsStr::new("/usr/local/bin/git-hooks")), None);
        assert_eq!(hook_name(OsStr::new("git-hooks.exe")), None);
        assert_eq!(
            hook_name(OsStr::new(".git/hooks/post-commit")).as_deref(),
            Some("post-commit")
        );
    }

    #[test]
    fn test_no_arguments_configures() {
        let cli = parse(&["git-hooks"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_symlink_invocation_runs_category() {
        let cli = parse(&[".git/hooks/commit-msg", ".git/COMMIT_EDITMSG"]);
        match cli.command {
            Some(Commands::Run { category, args }) => {
                assert_eq!(category, "commit-msg");
                assert_eq!(args, vec![".git/COMMIT_EDITMSG"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_symlink_invocation_keeps_dashed_arguments() {
        let cli = parse(&["/repo/.git/hooks/pre-push", "-v", "origin"]);
        match cli.command {
            Some(Commands::Run { category, args }) => {
                assert_eq!(category, "pre-push");
                assert_eq!(args, vec!["-v", "origin"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_category_as_first_argument() {
        let cli = parse(&["git-hooks", "post-commit", "extra"]);
        match cli.command {
            Some(Commands::Category(words)) => assert_eq!(words, vec!["post-commit", "extra"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_subcommand() {
        let cli = parse(&["git-hooks", "-v", "run", "commit-msg", "msg.txt"]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Run { category, args }) => {
                assert_eq!(category, "commit-msg");
                assert_eq!(args, vec!["msg.txt"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_install_force() {
        let cli = parse(&["git-hooks", "install", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Install { force: true })));
    }

    #[test]
    fn test_catalog_flag() {
        let cli = parse(&["git-hooks", "--catalog", "/tmp/catalog.json", "list"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(matches!(cli.command, Some(Commands::List)));
    }
}
