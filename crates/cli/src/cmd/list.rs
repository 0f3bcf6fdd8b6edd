//! List categories and their actions

use anyhow::Result;
use githooks_engine::SelectionState;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

use crate::common::RuntimeContext;
use crate::ui::Marker;

/// Print every category with the selection marker of each action
pub fn run(context: &RuntimeContext) -> Result<()> {
    let color = io::stdout().is_terminal();
    let mut out = io::stdout().lock();
    render(context, color, &mut out)?;
    Ok(())
}

/// Write the listing to `out`
///
/// Actions are shown in name order. Selected actions whose tool is missing
/// name the missing executable.
pub fn render(context: &RuntimeContext, color: bool, out: &mut impl Write) -> io::Result<()> {
    for (index, category) in context.catalog.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }

        if color {
            writeln!(out, "{} ({})", category.name().bold(), category.id().dimmed())?;
        } else {
            writeln!(out, "{} ({})", category.name(), category.id())?;
        }

        if category.is_empty() {
            writeln!(out, "  (no actions)")?;
            continue;
        }

        for action in category.actions_by_name() {
            let marker = Marker(action.state());
            let marker = if color { marker.colored() } else { marker.plain() };

            if action.state() == SelectionState::Unavailable {
                let note = "(not installed)";
                if color {
                    writeln!(out, "  {marker} {} {}", action.name(), note.dimmed())?;
                } else {
                    writeln!(out, "  {marker} {} {note}", action.name())?;
                }
            } else {
                writeln!(out, "  {marker} {}", action.name())?;
            }
        }
    }

    Ok(())
}
