//! Run a category
//!
//! This is what git executes through the hook symlinks.

use anyhow::Result;
use githooks_engine::HookRunner;
use owo_colors::OwoColorize;

use crate::common::RuntimeContext;
use crate::error::CommandError;
use crate::ui::StatusIcon;

/// Run `category` with the arguments git passed to the hook
///
/// Every selected action runs. Afterwards the run fails if any tool failed, so
/// blocking hooks such as `commit-msg` stop the commit.
pub fn run(context: &RuntimeContext, category: &str, args: &[String]) -> Result<()> {
    if context.catalog.get(category).is_none() {
        return Err(CommandError::unknown_category(category, context.catalog.ids()).into());
    }

    let report = HookRunner::new(&context.repo, &context.catalog).run(category, args)?;

    if report.is_success() {
        if report.invocations() > 0 {
            tracing::debug!(category, invocations = report.invocations(), "All tools passed");
        }
        return Ok(());
    }

    eprintln!(
        "{} {}",
        StatusIcon::Error.get().red(),
        format!("{category}: some tools reported problems").red()
    );
    Err(CommandError::ToolsFailed {
        category: category.to_string(),
        failures: report.failures(),
        invocations: report.invocations(),
    }
    .into())
}
