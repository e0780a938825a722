//! Inbound input events.
//!
//! The controlling side sends one JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"key","vk_code":65,"pressed":true}
//! {"type":"braille_input","source":"freedomScientific","scriptPath":["globalCommands","GlobalCommands","sayAll"]}
//! ```
//!
//! [`EventReader`] pulls these from any async line source.  A line that does
//! not decode is reported with its line number and does not end the stream.

use relay_core::RawGesture;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::application::dispatch_gesture::RemoteKeyEvent;

/// Error type for reading inbound events.
#[derive(Debug, Error)]
pub enum InboundError {
    /// The underlying reader failed.
    #[error("failed to read inbound event: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid event.
    #[error("invalid event on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl InboundError {
    /// `true` when the stream cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// One decoded inbound event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A raw key transition.
    Key(RemoteKeyEvent),
    /// A gesture from the remote side's input devices.
    BrailleInput(RawGesture),
}

/// Decodes a single event line.
///
/// # Errors
///
/// Returns the `serde_json` error when the line is not a valid event.
pub fn parse_event(line: &str) -> Result<InboundEvent, serde_json::Error> {
    serde_json::from_str(line)
}

/// Reads newline-delimited events from `R`.
pub struct EventReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Returns the next event, or `None` at end of input.  Blank lines are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`InboundError::Io`] if reading fails and
    /// [`InboundError::Decode`] for a malformed line; the reader stays usable
    /// after a decode error.
    pub async fn next_event(&mut self) -> Result<Option<InboundEvent>, InboundError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_number += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return parse_event(line)
                .map(Some)
                .map_err(|source| InboundError::Decode {
                    line: self.line_number,
                    source,
                });
        }
        Ok(None)
    }
}
