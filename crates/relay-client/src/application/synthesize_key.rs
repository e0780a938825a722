//! InputSynthesizer: turns remote key requests into OS keyboard events.
//!
//! The synthesizer sits at the application layer and delegates the OS call
//! to a [`KeyInjector`] trait object.  The platform implementations live in
//! `infrastructure::input_injection`.
//!
//! Every call builds exactly one [`NativeKeyEvent`] per key transition.  When
//! the caller supplies no scan code, it is derived from the virtual key through
//! the injector at call time, so a keyboard layout change takes effect on the
//! next event.

use std::sync::Arc;

use relay_core::KeyCombo;
use thiserror::Error;
use tracing::trace;

/// `KEYEVENTF_EXTENDEDKEY`: the key is on the extended part of the keyboard.
pub const KEYEVENTF_EXTENDEDKEY: u32 = 0x0001;
/// `KEYEVENTF_KEYUP`: the event is a release.
pub const KEYEVENTF_KEYUP: u32 = 0x0002;

/// Error type for key injection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// Neither a virtual key nor a scan code was supplied.
    #[error("key event names neither a virtual key nor a scan code")]
    NoKey,

    /// The OS rejected the synthesized event.
    #[error("platform error: {0}")]
    Platform(String),
}

/// One synthesized key transition, in the shape the OS consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeKeyEvent {
    pub virtual_key: u16,
    pub scan_code: u16,
    pub extended: bool,
    pub key_up: bool,
}

impl NativeKeyEvent {
    /// The OS flag word for this event.
    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.extended {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        if self.key_up {
            flags |= KEYEVENTF_KEYUP;
        }
        flags
    }
}

/// The OS keyboard primitive.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait KeyInjector: Send + Sync {
    /// Maps a virtual key to its scan code under the current keyboard layout.
    ///
    /// Returns `0` when the key has no scan code.
    fn virtual_key_to_scan_code(&self, virtual_key: u16) -> u16;

    /// Submits one key event to the OS input stream.
    fn inject(&self, event: &NativeKeyEvent) -> Result<(), InjectionError>;
}

/// Synthesizes key presses through a [`KeyInjector`].
#[derive(Clone)]
pub struct InputSynthesizer {
    injector: Arc<dyn KeyInjector>,
}

impl InputSynthesizer {
    pub fn new(injector: Arc<dyn KeyInjector>) -> Self {
        Self { injector }
    }

    /// Sends one key transition.
    ///
    /// A missing or zero `scan_code` is looked up from `virtual_key`.
    /// `pressed = false` sends a release.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::NoKey`] when both codes are absent, or the
    /// injector's error if the OS rejects the event.
    pub fn send_key(
        &self,
        virtual_key: Option<u16>,
        scan_code: Option<u16>,
        extended: bool,
        pressed: bool,
    ) -> Result<(), InjectionError> {
        let virtual_key = virtual_key.unwrap_or(0);
        let scan_code = match scan_code {
            Some(code) if code != 0 => code,
            _ if virtual_key != 0 => self.injector.virtual_key_to_scan_code(virtual_key),
            _ => return Err(InjectionError::NoKey),
        };

        let event = NativeKeyEvent {
            virtual_key,
            scan_code,
            extended,
            key_up: !pressed,
        };
        trace!(?event, "injecting key event");
        self.injector.inject(&event)
    }

    /// Presses every key of `combo` in order, then releases them in reverse.
    ///
    /// If a press fails, the keys already down are released before the error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`InjectionError`] encountered.
    pub fn emulate_combo(&self, combo: &KeyCombo) -> Result<(), InjectionError> {
        let keys = combo.keys();
        for (pressed_count, key) in keys.iter().enumerate() {
            if let Err(e) = self.send_key(Some(u16::from(key.virtual_key)), None, key.extended, true) {
                self.release_all(&keys[..pressed_count]);
                return Err(e);
            }
        }

        let mut result = Ok(());
        for key in keys.iter().rev() {
            let released = self.send_key(Some(u16::from(key.virtual_key)), None, key.extended, false);
            if result.is_ok() {
                result = released;
            }
        }
        result
    }

    fn release_all(&self, keys: &[relay_core::KeyStroke]) {
        for key in keys.iter().rev() {
            // Best effort; the press error is what gets reported.
            let _ = self.send_key(Some(u16::from(key.virtual_key)), None, key.extended, false);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ── Recording injector ────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingInjector {
        events: Mutex<Vec<NativeKeyEvent>>,
        lookups: Mutex<Vec<u16>>,
        /// Fail the n-th injection (0-based).
        fail_at: Option<usize>,
    }

    impl KeyInjector for RecordingInjector {
        fn virtual_key_to_scan_code(&self, virtual_key: u16) -> u16 {
            self.lookups.lock().unwrap().push(virtual_key);
            virtual_key + 0x100
        }

        fn inject(&self, event: &NativeKeyEvent) -> Result<(), InjectionError> {
            let mut events = self.events.lock().unwrap();
            if self.fail_at == Some(events.len()) {
                events.push(*event);
                return Err(InjectionError::Platform("injected failure".to_string()));
            }
            events.push(*event);
            Ok(())
        }
    }

    fn synthesizer(injector: &Arc<RecordingInjector>) -> InputSynthesizer {
        InputSynthesizer::new(Arc::clone(injector) as Arc<dyn KeyInjector>)
    }

    // ── flags ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_flags_combine_extended_and_key_up() {
        let mut event = NativeKeyEvent {
            virtual_key: 0x25,
            scan_code: 0x4B,
            extended: false,
            key_up: false,
        };
        assert_eq!(event.flags(), 0);
        event.extended = true;
        assert_eq!(event.flags(), KEYEVENTF_EXTENDEDKEY);
        event.key_up = true;
        assert_eq!(event.flags(), KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP);
    }

    // ── send_key ──────────────────────────────────────────────────────────────

    #[test]
    fn test_send_key_derives_scan_code_when_absent() {
        // Arrange
        let injector = Arc::new(RecordingInjector::default());

        // Act
        synthesizer(&injector).send_key(Some(0x41), None, false, true).unwrap();

        // Assert
        let events = injector.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].scan_code, 0x141);
        assert_eq!(events[0].flags(), 0);
    }

    #[test]
    fn test_send_key_treats_zero_scan_code_as_absent() {
        let injector = Arc::new(RecordingInjector::default());
        synthesizer(&injector).send_key(Some(0x41), Some(0), false, true).unwrap();
        assert_eq!(injector.events.lock().unwrap()[0].scan_code, 0x141);
    }

    #[test]
    fn test_send_key_keeps_supplied_scan_code_without_lookup() {
        let injector = Arc::new(RecordingInjector::default());

        synthesizer(&injector).send_key(Some(0x41), Some(0x1E), false, true).unwrap();

        assert_eq!(injector.events.lock().unwrap()[0].scan_code, 0x1E);
        assert!(injector.lookups.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_key_release_sets_key_up_flag() {
        let injector = Arc::new(RecordingInjector::default());

        synthesizer(&injector).send_key(Some(0x25), None, true, false).unwrap();

        let event = injector.events.lock().unwrap()[0];
        assert!(event.key_up);
        assert_eq!(event.flags(), KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP);
    }

    #[test]
    fn test_send_key_scan_code_only_uses_zero_virtual_key() {
        let injector = Arc::new(RecordingInjector::default());

        synthesizer(&injector).send_key(None, Some(0x1C), false, true).unwrap();

        let event = injector.events.lock().unwrap()[0];
        assert_eq!(event.virtual_key, 0);
        assert_eq!(event.scan_code, 0x1C);
    }

    #[test]
    fn test_send_key_without_any_code_fails() {
        let injector = Arc::new(RecordingInjector::default());

        let result = synthesizer(&injector).send_key(None, None, false, true);

        assert_eq!(result, Err(InjectionError::NoKey));
        assert!(injector.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_press_then_release_builds_one_event_each() {
        // Arrange
        let injector = Arc::new(RecordingInjector::default());
        let synth = synthesizer(&injector);

        // Act
        synth.send_key(Some(0x41), None, false, true).unwrap();
        synth.send_key(Some(0x41), None, false, false).unwrap();

        // Assert
        let events = injector.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.virtual_key == 0x41));
        assert_eq!((events[0].key_up, events[1].key_up), (false, true));
        // Scan code is looked up per call, never cached.
        assert_eq!(*injector.lookups.lock().unwrap(), vec![0x41, 0x41]);
    }

    // ── emulate_combo ─────────────────────────────────────────────────────────

    #[test]
    fn test_emulate_combo_presses_in_order_and_releases_in_reverse() {
        // Arrange
        let injector = Arc::new(RecordingInjector::default());
        let combo: KeyCombo = "control+shift+a".parse().unwrap();

        // Act
        synthesizer(&injector).emulate_combo(&combo).unwrap();

        // Assert
        let sequence: Vec<(u16, bool)> = injector
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.virtual_key, e.key_up))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (0x11, false),
                (0x10, false),
                (0x41, false),
                (0x41, true),
                (0x10, true),
                (0x11, true),
            ]
        );
    }

    #[test]
    fn test_emulate_combo_releases_pressed_keys_when_a_press_fails() {
        // Arrange – the second press fails
        let injector = Arc::new(RecordingInjector {
            fail_at: Some(1),
            ..Default::default()
        });
        let combo: KeyCombo = "control+a".parse().unwrap();

        // Act
        let result = synthesizer(&injector).emulate_combo(&combo);

        // Assert
        assert!(matches!(result, Err(InjectionError::Platform(_))));
        let events = injector.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!((events[2].virtual_key, events[2].key_up), (0x11, true));
    }
}
