//! DispatchGestureUseCase: replays remote gestures and key events locally.
//!
//! Two kinds of input arrive from the controlling side:
//!
//! - **Raw key events** go straight to the [`InputSynthesizer`].
//! - **Gestures** are bound once against the host's scopes.  The bound
//!   gesture then either invokes a local action, emulates the key combination
//!   named by a `kb:` action, or does nothing when nothing is bound.
//!
//! Events are handled one at a time, in arrival order.

use relay_core::{ActionError, BoundGesture, GestureDescriptor, ResolvedAction, Scope, ScopeSnapshot};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::synthesize_key::{InjectionError, InputSynthesizer};

/// Error type for dispatching remote input.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The bound action reported a failure.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The OS rejected a synthesized key event.
    #[error("key injection failed: {0}")]
    Injection(#[from] InjectionError),
}

/// A raw key transition sent by the controlling side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RemoteKeyEvent {
    #[serde(default)]
    pub vk_code: Option<u16>,
    #[serde(default)]
    pub scan_code: Option<u16>,
    #[serde(default)]
    pub extended: bool,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

fn default_pressed() -> bool {
    true
}

/// What happened to a dispatched gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A bound action ran.
    Invoked { scope: Scope, action: String },
    /// A `kb:` key combination was emulated.
    KeysEmulated(String),
    /// Nothing is bound to the gesture.
    Unbound,
}

/// The Dispatch Gesture use case.
pub struct DispatchGestureUseCase {
    synthesizer: InputSynthesizer,
}

impl DispatchGestureUseCase {
    pub fn new(synthesizer: InputSynthesizer) -> Self {
        Self { synthesizer }
    }

    /// Binds `gesture` against `scopes` and executes the result.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Action`] if the bound action fails, or
    /// [`DispatchError::Injection`] if key emulation fails.
    pub fn handle_gesture(
        &self,
        gesture: GestureDescriptor,
        scopes: &ScopeSnapshot<'_>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let (gesture, resolution) = BoundGesture::bind(gesture, scopes).into_parts();

        match resolution {
            Some(ResolvedAction::Bound { scope, action }) => {
                debug!(action = action.name(), ?scope, source = gesture.source(), "invoking bound action");
                action.invoke(&gesture)?;
                Ok(DispatchOutcome::Invoked {
                    scope,
                    action: action.name().to_string(),
                })
            }
            Some(ResolvedAction::KeyEmulation(combo)) => {
                debug!(keys = %combo, "emulating remote key gesture");
                self.synthesizer.emulate_combo(&combo)?;
                Ok(DispatchOutcome::KeysEmulated(combo.name().to_string()))
            }
            None => {
                trace!(source = gesture.source(), "gesture has no bound action");
                Ok(DispatchOutcome::Unbound)
            }
        }
    }

    /// Replays a raw key event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Injection`] if the OS event injection fails.
    pub fn handle_key(&self, event: &RemoteKeyEvent) -> Result<(), DispatchError> {
        self.synthesizer
            .send_key(event.vk_code, event.scan_code, event.extended, event.pressed)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
