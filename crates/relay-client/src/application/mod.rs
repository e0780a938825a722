//! Application layer use cases for the client application.
//!
//! - **`synthesize_key`** – Builds native key events and submits them through
//!   a `KeyInjector` implementation injected at construction time.
//!
//! - **`dispatch_gesture`** – Binds remote gestures to local actions and
//!   replays raw key events, in arrival order.

pub mod dispatch_gesture;
pub mod synthesize_key;
