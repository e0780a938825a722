//! Windows key injection via the SendInput API.
//!
//! Scan codes are looked up with `MapVirtualKeyW` under the active keyboard
//! layout; events are injected one `KEYBDINPUT` at a time.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    MapVirtualKeyW, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    MAPVK_VK_TO_VSC, VIRTUAL_KEY,
};

use crate::application::synthesize_key::{InjectionError, KeyInjector, NativeKeyEvent};

/// Windows implementation of [`KeyInjector`] using SendInput.
#[derive(Debug, Default)]
pub struct WindowsKeyInjector;

impl WindowsKeyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl KeyInjector for WindowsKeyInjector {
    fn virtual_key_to_scan_code(&self, virtual_key: u16) -> u16 {
        // SAFETY: MapVirtualKeyW has no preconditions
        let scan = unsafe { MapVirtualKeyW(u32::from(virtual_key), MAPVK_VK_TO_VSC) };
        u16::try_from(scan).unwrap_or(0)
    }

    fn inject(&self, event: &NativeKeyEvent) -> Result<(), InjectionError> {
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(event.virtual_key),
                    wScan: event.scan_code,
                    dwFlags: KEYBD_EVENT_FLAGS(event.flags()),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        // SAFETY: input is a valid KEYBDINPUT structure on the stack
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            // Input blocked by another thread or by UIPI.
            return Err(InjectionError::Platform(
                windows::core::Error::from_win32().to_string(),
            ));
        }
        Ok(())
    }
}
