//! Mock key injector.
//!
//! Records every injected [`NativeKeyEvent`] in a `Mutex<Vec<_>>` instead of
//! calling the OS, so tests can inspect exactly what was sent and in what
//! order.  Scan codes come from the static set-1 table in
//! [`relay_core::keymap::windows_vk`].
//!
//! The relay binary also uses it on platforms without a real injector; each
//! event is then logged at debug level.
//!
//! Set `should_fail = true` to make every injection fail, which exercises the
//! error paths of callers without a broken OS.

use std::sync::{Mutex, PoisonError};

use relay_core::keymap::windows_vk;
use tracing::debug;

use crate::application::synthesize_key::{InjectionError, KeyInjector, NativeKeyEvent};

/// A key injector that records events without performing OS calls.
#[derive(Debug, Default)]
pub struct MockKeyInjector {
    /// Every event passed to `inject`, in order.
    pub events: Mutex<Vec<NativeKeyEvent>>,
    /// When `true`, `inject` returns `InjectionError::Platform`.
    pub should_fail: bool,
}

impl MockKeyInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the events recorded so far.
    pub fn recorded(&self) -> Vec<NativeKeyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl KeyInjector for MockKeyInjector {
    fn virtual_key_to_scan_code(&self, virtual_key: u16) -> u16 {
        u8::try_from(virtual_key)
            .map(windows_vk::vk_to_scan_code)
            .unwrap_or(0)
    }

    fn inject(&self, event: &NativeKeyEvent) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        debug!(
            vk = event.virtual_key,
            scan = event.scan_code,
            flags = event.flags(),
            "key event recorded"
        );
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
        Ok(())
    }
}
