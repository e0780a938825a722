//! Remote gestures and their resolution to local actions.
//!
//! - [`descriptor`] – the validated gesture value built from wire fields.
//! - [`resolver`] – the ordered scope search that finds the action to run.

pub mod descriptor;
pub mod resolver;

pub use descriptor::{GestureDescriptor, OwnerKind, RawGesture, ScriptPath, REMOTE_SOURCE_PREFIX};
pub use resolver::{
    Action, ActionError, ActionHandler, ActionProvider, ActionResolver, DocumentInterceptor,
    ResolvedAction, Scope, ScopeSnapshot, ScopeSource, KEY_EMULATION_PREFIX,
};

/// A gesture paired with the action it resolved to.
///
/// Resolution happens once, in [`BoundGesture::bind`]; later reads of
/// [`BoundGesture::resolution`] return the cached result even if the host's
/// registries have changed since.
#[derive(Debug, Clone)]
pub struct BoundGesture {
    gesture: GestureDescriptor,
    resolution: Option<ResolvedAction>,
}

impl BoundGesture {
    /// Resolves `gesture` against `scopes` and keeps the result.
    pub fn bind(gesture: GestureDescriptor, scopes: &ScopeSnapshot<'_>) -> Self {
        let resolution = ActionResolver::new().resolve(&gesture, scopes);
        Self {
            gesture,
            resolution,
        }
    }

    pub fn gesture(&self) -> &GestureDescriptor {
        &self.gesture
    }

    /// The action found at bind time, if any.
    pub fn resolution(&self) -> Option<&ResolvedAction> {
        self.resolution.as_ref()
    }

    pub fn into_parts(self) -> (GestureDescriptor, Option<ResolvedAction>) {
        (self.gesture, self.resolution)
    }
}
