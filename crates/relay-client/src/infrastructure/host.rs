//! Host-side command registry.
//!
//! A real screen reader host exposes its own extensions, focus tree and
//! command tables through [`ScopeSource`].  The relay binary has none of
//! that; [`CommandHost`] stands in with the key bindings from the config file:
//!
//! ```text
//! ScopeSnapshot
//!   focus_ancestors = [root]     ← propagating bindings answer here
//!   global_commands = root       ← everything else
//! ```

use std::collections::HashMap;

use relay_core::{
    Action, ActionError, ActionProvider, KeyCombo, KeyNameError, ScopeSnapshot, ScopeSource,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::synthesize_key::InputSynthesizer;
use crate::infrastructure::storage::config::CommandBinding;

/// A configured binding whose key combination does not parse.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid key binding for command {name:?}: {source}")]
pub struct BindingError {
    pub name: String,
    #[source]
    pub source: KeyNameError,
}

/// Named action registry.
#[derive(Debug, Default)]
pub struct CommandTable {
    owner_module: Option<String>,
    actions: HashMap<String, Action>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that reports `module` as its owner.
    pub fn owned_by(module: impl Into<String>) -> Self {
        Self {
            owner_module: Some(module.into()),
            actions: HashMap::new(),
        }
    }

    /// Adds `action`, returning the one it replaced.
    pub fn register(&mut self, action: Action) -> Option<Action> {
        self.actions.insert(action.name().to_string(), action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionProvider for CommandTable {
    fn owner_module(&self) -> Option<&str> {
        self.owner_module.as_deref()
    }

    fn lookup(&self, name: &str) -> Option<Action> {
        self.actions.get(name).cloned()
    }
}

/// [`ScopeSource`] backed by configured key bindings.
#[derive(Debug)]
pub struct CommandHost {
    root: CommandTable,
}

impl CommandHost {
    /// Builds one key-emulating command per binding.
    ///
    /// A later binding with the same name replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError`] for the first binding whose keys do not parse.
    pub fn from_bindings(
        bindings: &[CommandBinding],
        synthesizer: &InputSynthesizer,
    ) -> Result<Self, BindingError> {
        let mut root = CommandTable::new();
        for binding in bindings {
            let combo: KeyCombo = binding.keys.parse().map_err(|source| BindingError {
                name: binding.name.clone(),
                source,
            })?;
            let action = key_command(&binding.name, combo, synthesizer.clone());
            let action = if binding.propagate {
                action.propagating()
            } else {
                action
            };
            if root.register(action).is_some() {
                warn!(command = %binding.name, "duplicate command binding; keeping the last one");
            }
        }
        debug!(commands = root.len(), "command host ready");
        Ok(Self { root })
    }

    pub fn commands(&self) -> &CommandTable {
        &self.root
    }
}

impl ScopeSource for CommandHost {
    fn snapshot(&self) -> ScopeSnapshot<'_> {
        ScopeSnapshot {
            focus_ancestors: vec![&self.root],
            global_commands: Some(&self.root),
            ..Default::default()
        }
    }
}

/// An action that emulates `combo` when invoked.
fn key_command(name: &str, combo: KeyCombo, synthesizer: InputSynthesizer) -> Action {
    let action_name = name.to_string();
    Action::new(name, move |_| {
        synthesizer.emulate_combo(&combo).map_err(|e| ActionError {
            action: action_name.clone(),
            reason: e.to_string(),
        })
    })
}
