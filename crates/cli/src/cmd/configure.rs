//! Interactive selection
//!
//! One multi-select prompt per category. Pressing Esc abandons the session
//! without writing anything.

use anyhow::Result;
use dialoguer::{MultiSelect, theme::ColorfulTheme};
use githooks_core::ConfigStore;
use githooks_engine::{Category, SelectionState};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};

use crate::common::RuntimeContext;
use crate::error::CommandError;
use crate::ui::{Marker, StatusIcon};

/// Prompt for the selection of every category, then save
pub fn run(context: &mut RuntimeContext) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Err(CommandError::NotInteractive("configure").into());
    }

    let theme = ColorfulTheme::default();

    for category in context.catalog.iter_mut() {
        if category.is_empty() {
            continue;
        }

        let actions = category.actions_by_name();
        let items: Vec<String> = actions.iter().map(|a| label(a.name(), a.state())).collect();
        let defaults: Vec<bool> = actions.iter().map(|a| a.is_selected()).collect();
        let order: Vec<String> = actions.iter().map(|a| a.id().to_string()).collect();

        let prompt = format!("{} ({})", category.name(), category.id());
        let Some(chosen) = MultiSelect::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .defaults(&defaults)
            .interact_opt()?
        else {
            println!("{}", "Cancelled, nothing saved.".yellow());
            return Ok(());
        };

        apply_selection(category, &order, &chosen);
    }

    context.store.save()?;
    println!(
        "{} Saved selection to {}",
        StatusIcon::Success.get().green(),
        context.store.path().display().cyan()
    );
    Ok(())
}

/// Prompt label for an action
fn label(name: &str, state: SelectionState) -> String {
    if state == SelectionState::Unavailable {
        format!("{name} {}", Marker(state).plain())
    } else {
        name.to_string()
    }
}

/// Toggle actions of `category` so that exactly the `chosen` indices of
/// `order` end up selected
///
/// Untouched actions keep their persisted state verbatim.
pub fn apply_selection(category: &mut Category, order: &[String], chosen: &[usize]) {
    for (index, id) in order.iter().enumerate() {
        let wanted = chosen.contains(&index);
        if let Some(action) = category.action_mut(id)
            && action.is_selected() != wanted
        {
            action.toggle();
        }
    }
}
