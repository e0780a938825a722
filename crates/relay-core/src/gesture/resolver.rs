//! Resolution of remote gestures to local actions.
//!
//! A gesture's [`ScriptPath`] names an action and the extension that owns
//! it.  [`ActionResolver::resolve`] looks that action up across an ordered
//! chain of [`Scope`]s and returns the first match:
//!
//! ```text
//! "kb:" marker ──────────────────────────────► KeyEmulation (no search)
//! GlobalExtension → ApplicationExtension → AccessibilityEnhancer
//!   → DocumentInterceptor → FocusedElement → AncestorElement → GlobalDefault
//! ```
//!
//! The resolver holds no state.  Everything it searches is passed in per call
//! as a [`ScopeSnapshot`] borrowed from the host, so the same gesture can
//! resolve differently as focus moves.  A miss returns `None`; it is never an
//! error, because remote gestures routinely arrive for keys with nothing
//! bound to them.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{trace, warn};

use super::descriptor::{GestureDescriptor, OwnerKind, ScriptPath};
use crate::keymap::KeyCombo;

/// Marker prefix of action names that emulate a key press.
pub const KEY_EMULATION_PREFIX: &str = "kb:";

/// Error returned by a failing action handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("action {action} failed: {reason}")]
pub struct ActionError {
    pub action: String,
    pub reason: String,
}

/// Shared handler invoked when an action runs.
pub type ActionHandler = Arc<dyn Fn(&GestureDescriptor) -> Result<(), ActionError> + Send + Sync>;

/// A bound, invocable action.
#[derive(Clone)]
pub struct Action {
    name: String,
    can_propagate: bool,
    handler: ActionHandler,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&GestureDescriptor) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            can_propagate: false,
            handler: Arc::new(handler),
        }
    }

    /// Marks the action as usable when found on an ancestor of the focus.
    pub fn propagating(mut self) -> Self {
        self.can_propagate = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn can_propagate(&self) -> bool {
        self.can_propagate
    }

    /// Runs the action for `gesture`.
    ///
    /// # Errors
    ///
    /// Returns whatever [`ActionError`] the handler reports.
    pub fn invoke(&self, gesture: &GestureDescriptor) -> Result<(), ActionError> {
        (self.handler)(gesture)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("can_propagate", &self.can_propagate)
            .finish_non_exhaustive()
    }
}

/// Anything that can hand out actions by name.
pub trait ActionProvider {
    /// Identity of the module that defines this provider, if it has one.
    fn owner_module(&self) -> Option<&str> {
        None
    }

    /// Returns the action bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<Action>;
}

/// A document/tree interceptor attached to the focused element.
pub trait DocumentInterceptor: ActionProvider {
    /// `false` while the interceptor is still loading; it is skipped then.
    fn is_ready(&self) -> bool;
}

/// Read-only view of the host registries for one `resolve` call.
#[derive(Default)]
pub struct ScopeSnapshot<'a> {
    /// Currently running global extensions.
    pub global_extensions: Vec<&'a dyn ActionProvider>,
    /// Extension of the focused application.
    pub focused_application: Option<&'a dyn ActionProvider>,
    /// Active accessibility-enhancement providers.
    pub enhancement_providers: Vec<&'a dyn ActionProvider>,
    /// Interceptor attached to the focused element.
    pub document_interceptor: Option<&'a dyn DocumentInterceptor>,
    /// The focused element.
    pub focus: Option<&'a dyn ActionProvider>,
    /// Ancestors of the focus, nearest first.
    pub focus_ancestors: Vec<&'a dyn ActionProvider>,
    /// Global default command registry.
    pub global_commands: Option<&'a dyn ActionProvider>,
}

/// Host side of the resolver: produces a snapshot of its registries.
pub trait ScopeSource {
    fn snapshot(&self) -> ScopeSnapshot<'_>;
}

/// Search domains, in the order they are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    GlobalExtension,
    ApplicationExtension,
    AccessibilityEnhancer,
    DocumentInterceptor,
    FocusedElement,
    AncestorElement,
    GlobalDefault,
}

impl Scope {
    /// Every scope, in search order.
    pub const SEARCH_ORDER: [Scope; 7] = [
        Scope::GlobalExtension,
        Scope::ApplicationExtension,
        Scope::AccessibilityEnhancer,
        Scope::DocumentInterceptor,
        Scope::FocusedElement,
        Scope::AncestorElement,
        Scope::GlobalDefault,
    ];
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub enum ResolvedAction {
    /// Emulate the key combination named after the `kb:` marker.
    KeyEmulation(KeyCombo),
    /// Invoke an action found in `scope`.
    Bound { scope: Scope, action: Action },
}

/// Stateless gesture → action resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionResolver;

impl ActionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolves `gesture` against the registries in `scopes`.
    ///
    /// Returns `None` when the gesture has no script path, when a `kb:` name
    /// does not parse, or when no scope binds the action.
    pub fn resolve(
        &self,
        gesture: &GestureDescriptor,
        scopes: &ScopeSnapshot<'_>,
    ) -> Option<ResolvedAction> {
        let path = gesture.script_path()?;

        if let Some(keys) = path.action_name.strip_prefix(KEY_EMULATION_PREFIX) {
            return match keys.parse::<KeyCombo>() {
                Ok(combo) => Some(ResolvedAction::KeyEmulation(combo)),
                Err(e) => {
                    warn!(action = %path.action_name, "cannot emulate key gesture: {e}");
                    None
                }
            };
        }

        let resolved = Scope::SEARCH_ORDER.iter().find_map(|&scope| {
            self.search(scope, path, scopes)
                .map(|action| ResolvedAction::Bound { scope, action })
        });
        if resolved.is_none() {
            trace!(action = %path.action_name, "no scope binds remote gesture");
        }
        resolved
    }

    /// Searches a single scope.
    fn search(&self, scope: Scope, path: &ScriptPath, scopes: &ScopeSnapshot<'_>) -> Option<Action> {
        let name = path.action_name.as_str();
        match scope {
            Scope::GlobalExtension => {
                owned_lookup(&scopes.global_extensions, OwnerKind::GlobalExtension, path)
            }
            Scope::ApplicationExtension => owned_lookup(
                scopes.focused_application.as_slice(),
                OwnerKind::ApplicationExtension,
                path,
            ),
            Scope::AccessibilityEnhancer => owned_lookup(
                &scopes.enhancement_providers,
                OwnerKind::AccessibilityEnhancer,
                path,
            ),
            Scope::DocumentInterceptor => scopes
                .document_interceptor
                .filter(|interceptor| interceptor.is_ready())
                .and_then(|interceptor| interceptor.lookup(name)),
            Scope::FocusedElement => scopes.focus.and_then(|focus| focus.lookup(name)),
            Scope::AncestorElement => scopes
                .focus_ancestors
                .iter()
                .filter_map(|ancestor| ancestor.lookup(name))
                .find(Action::can_propagate),
            Scope::GlobalDefault => scopes.global_commands.and_then(|commands| commands.lookup(name)),
        }
    }
}

/// Looks `path` up on the first provider owned by its module with `kind`.
fn owned_lookup(
    providers: &[&dyn ActionProvider],
    kind: OwnerKind,
    path: &ScriptPath,
) -> Option<Action> {
    providers
        .iter()
        .filter(|provider| path.is_owned_by(&kind, provider.owner_module()))
        .find_map(|provider| provider.lookup(&path.action_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
