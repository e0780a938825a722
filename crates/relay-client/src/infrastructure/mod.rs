//! Infrastructure layer for the client application.
//!
//! Contains OS-facing adapters and I/O.
//!
//! **Dependency rule**: this layer may depend on `application` and `relay_core`,
//! but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`input_injection`** – `KeyInjector` implementations.  `SendInput` on
//!   Windows, and a recording mock for tests and other platforms.
//!
//! - **`host`** – A command table built from configured key bindings, exposed
//!   to the resolver as the global command scope.
//!
//! - **`inbound`** – Decodes newline-delimited JSON input events.
//!
//! - **`storage`** – TOML configuration file persistence.

pub mod host;
pub mod inbound;
pub mod input_injection;
pub mod storage;
