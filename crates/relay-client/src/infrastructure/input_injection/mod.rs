//! Platform-specific key injection implementations.
//!
//! The correct implementation is selected at compile time via `#[cfg(target_os = ...)]`.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

pub use mock::MockKeyInjector;

#[cfg(target_os = "windows")]
pub use windows::WindowsKeyInjector;
