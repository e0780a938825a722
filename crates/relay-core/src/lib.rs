//! # relay-core
//!
//! Shared library for the remote relay: pairing URL and address handling,
//! remote gesture descriptors, the gesture → action resolver, and the key name
//! tables used for key emulation.
//!
//! It has no dependencies on OS APIs or network sockets.  Injecting keys into
//! the operating system lives in `relay-client`.
//!
//! # Architecture overview
//!
//! Two machines share a session: the *controller* sends gestures, the
//! *controlled* machine replays them.  Both sides agree on a session through a
//! pairing URL such as `nvdaremote://relay.example.org?key=abc&mode=master`.
//!
//! - **`protocol`** – Host/port text handling and the [`ConnectionDescriptor`]
//!   that is parsed from and rendered to pairing URLs.
//!
//! - **`gesture`** – The [`GestureDescriptor`] received from the remote side
//!   and the [`ActionResolver`] that searches the local scopes, in a fixed
//!   order, for the action it should trigger.
//!
//! - **`keymap`** – Key name and scan code tables turning `kb:control+a` style
//!   names into [`KeyCombo`]s of Windows virtual keys.

pub mod gesture;
pub mod keymap;
pub mod protocol;

pub use gesture::{
    Action, ActionError, ActionProvider, ActionResolver, BoundGesture, DocumentInterceptor,
    GestureDescriptor, OwnerKind, RawGesture, ResolvedAction, Scope, ScopeSnapshot, ScopeSource,
    ScriptPath,
};
pub use keymap::{KeyCombo, KeyNameError, KeyStroke};
pub use protocol::{
    format_address, parse_address, AddressError, ConnectionDescriptor, ConnectionRole,
    ConnectionState, UrlParsingError, DEFAULT_PORT, URL_SCHEME,
};
