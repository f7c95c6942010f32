//! Registry of template actions, keyed by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::github::error::DispatchError;

use super::action::TemplateAction;

/// Action catalogue the template engine resolves steps against.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Arc<dyn TemplateAction>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its id, replacing any previous registration.
    pub fn register(&mut self, action: Arc<dyn TemplateAction>) {
        self.actions.insert(action.id().to_owned(), action);
    }

    /// Resolves an action by id.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownAction`] when no action is registered
    /// under the id.
    pub fn get(&self, id: &str) -> Result<Arc<dyn TemplateAction>, DispatchError> {
        self.actions
            .get(id)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownAction { id: id.to_owned() })
    }

    /// Lists the registered action ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }
}
