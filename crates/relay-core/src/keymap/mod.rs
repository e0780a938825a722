//! Key name parsing for key-emulation gestures.
//!
//! A key-emulation gesture names its keys in text, for example
//! `kb:control+shift+a`.  This module turns the part after the `kb:` marker
//! into a [`KeyCombo`]: an ordered list of [`KeyStroke`]s carrying Windows
//! Virtual Key codes and extended-key flags, ready to be handed to an input
//! synthesizer.

pub mod windows_vk;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a key combination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyNameError {
    /// The combination text is empty or has an empty `+`-separated part.
    #[error("empty key name in {0:?}")]
    Empty(String),

    /// A part does not name any known key.
    #[error("unknown key name: {0:?}")]
    Unknown(String),
}

/// One key of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    /// Windows Virtual Key code.
    pub virtual_key: u8,
    /// Whether the key is sent with `KEYEVENTF_EXTENDEDKEY`.
    pub extended: bool,
}

/// An ordered key combination: modifiers first, main key last.
///
/// Emulating a combo presses every key in order and releases them in
/// reverse order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    name: String,
    keys: Vec<KeyStroke>,
}

impl KeyCombo {
    /// The text this combo was parsed from (without the `kb:` marker).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys in press order.
    pub fn keys(&self) -> &[KeyStroke] {
        &self.keys
    }
}

impl FromStr for KeyCombo {
    type Err = KeyNameError;

    /// Parses `+`-separated, case-insensitive key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split('+')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    return Err(KeyNameError::Empty(s.to_string()));
                }
                windows_vk::key_name_to_vk(part)
                    .map(|(virtual_key, extended)| KeyStroke {
                        virtual_key,
                        extended,
                    })
                    .ok_or_else(|| KeyNameError::Unknown(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: s.to_string(),
            keys,
        })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
