//! Selection markers and status icons

use githooks_engine::SelectionState;
use owo_colors::OwoColorize;

/// Icon constants
pub struct Icons;

impl Icons {
    /// Selected and runnable
    pub const ENABLED: &'static str = "✔";
    /// Selected, tool missing
    pub const UNAVAILABLE: &'static str = "✘";
    /// Not selected
    pub const DISABLED: &'static str = " ";

    /// Success status
    pub const STATUS_SUCCESS: &'static str = "✓";
    /// Warning status
    pub const STATUS_WARNING: &'static str = "⚠";
    /// Error status
    pub const STATUS_ERROR: &'static str = "✗";
}

/// Bracketed marker for an action's selection state
///
/// `[✔]` runs, `[✘]` is selected but its tool is missing, `[ ]` does not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker(pub SelectionState);

impl Marker {
    /// Symbol inside the brackets
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self.0 {
            SelectionState::Enabled => Icons::ENABLED,
            SelectionState::Unavailable => Icons::UNAVAILABLE,
            SelectionState::Disabled | SelectionState::Unknown => Icons::DISABLED,
        }
    }

    /// Uncolored marker, such as `[✔]`
    #[must_use]
    pub fn plain(self) -> String {
        format!("[{}]", self.symbol())
    }

    /// Marker colored for a terminal
    #[must_use]
    pub fn colored(self) -> String {
        let symbol = self.symbol();
        let symbol = match self.0 {
            SelectionState::Enabled => symbol.green().to_string(),
            SelectionState::Unavailable => symbol.red().to_string(),
            SelectionState::Disabled | SelectionState::Unknown => symbol.to_string(),
        };
        format!("[{symbol}]")
    }
}

/// Status icon types
#[derive(Debug, Clone, Copy)]
pub enum StatusIcon {
    /// Operation succeeded
    Success,
    /// Operation finished with something to look at
    Warning,
    /// Operation failed
    Error,
}

impl StatusIcon {
    /// Icon character for this status
    #[must_use]
    pub fn get(self) -> &'static str {
        match self {
            Self::Success => Icons::STATUS_SUCCESS,
            Self::Warning => Icons::STATUS_WARNING,
            Self::Error => Icons::STATUS_ERROR,
        }
    }
}
