//! relay-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does relay-client do?
//!
//! The client runs on the *controlled* machine of a paired session.  The
//! controlling side forwards two kinds of input:
//!
//! 1. Raw key events, replayed directly as OS keyboard input.
//! 2. Gestures (braille display keys, routing buttons, …) carrying the name of
//!    the action they triggered on the controlling side.  The client looks
//!    that action up in its own scopes and runs it, or emulates the key
//!    combination a `kb:` action names.
//!
//! Key injection goes through `SendInput` on Windows.

/// Application layer: use cases for the client.
pub mod application;

/// Infrastructure layer: OS adapters, inbound events, and config storage.
pub mod infrastructure;
