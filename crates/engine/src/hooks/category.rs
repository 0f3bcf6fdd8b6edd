//! Categories: actions grouped under one git hook

use super::action::{Action, ActionReport};
use super::executor::{CommandExecutor, ExecutableResolver};
use githooks_core::ConfigStore;
use std::fmt;

/// Summary of a category run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    /// Per-action reports, in execution order
    pub actions: Vec<(String, ActionReport)>,
}

impl CategoryReport {
    /// Total tool invocations
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.actions.iter().map(|(_, r)| r.invocations).sum()
    }

    /// Total failed invocations
    #[must_use]
    pub fn failures(&self) -> usize {
        self.actions.iter().map(|(_, r)| r.failures).sum()
    }

    /// Whether every invocation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Actions bound to one trigger point, such as `post-commit`
///
/// Membership is fixed at construction. Only the selection of individual
/// actions changes afterwards.
pub struct Category {
    id: String,
    name: String,
    actions: Vec<Box<dyn Action>>,
}

impl Category {
    /// Create a category owning `actions`, kept in discovery order
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        actions: Vec<Box<dyn Action>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            actions,
        }
    }

    /// Hook name, used as config section name and symlink name
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the category has no actions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Look up an action by ID
    #[must_use]
    pub fn action(&self, id: &str) -> Option<&dyn Action> {
        self.actions
            .iter()
            .find(|a| a.id() == id)
            .map(AsRef::as_ref)
    }

    /// Mutable lookup by ID, for selection changes
    pub fn action_mut(&mut self, id: &str) -> Option<&mut (dyn Action + 'static)> {
        self.actions
            .iter_mut()
            .find(|a| a.id() == id)
            .map(AsMut::as_mut)
    }

    /// Actions in execution order
    ///
    /// Ascending priority. Equal priorities keep discovery order.
    #[must_use]
    pub fn actions_by_priority(&self) -> Vec<&dyn Action> {
        let mut actions: Vec<&dyn Action> = self.actions.iter().map(AsRef::as_ref).collect();
        actions.sort_by_key(|a| a.priority());
        actions
    }

    /// Actions in presentation order
    #[must_use]
    pub fn actions_by_name(&self) -> Vec<&dyn Action> {
        let mut actions: Vec<&dyn Action> = self.actions.iter().map(AsRef::as_ref).collect();
        actions.sort_by(|a, b| a.name().cmp(b.name()));
        actions
    }

    /// Bind every action to its section in `store`
    pub fn set_config_store(&mut self, store: &dyn ConfigStore, resolver: &dyn ExecutableResolver) {
        for action in &mut self.actions {
            let section = store.section(&self.id, action.id());
            action.bind_config(section, resolver);
        }
        tracing::debug!(category = %self.id, actions = self.actions.len(), "Bound configuration");
    }

    /// Run every action in priority order against the same inputs
    ///
    /// A failing action never stops the ones after it.
    pub fn run(
        &self,
        change_set: &[String],
        args: &[String],
        executor: &dyn CommandExecutor,
    ) -> CategoryReport {
        tracing::debug!(
            category = %self.id,
            files = change_set.len(),
            args = ?args,
            "Running category"
        );

        let actions = self
            .actions_by_priority()
            .into_iter()
            .map(|action| {
                let report = action.run(change_set, args, executor);
                (action.id().to_string(), report)
            })
            .collect();

        CategoryReport { actions }
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("id", &self.id)
            .field("name", &self.name)
            .field(
                "actions",
                &self.actions.iter().map(|a| a.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
