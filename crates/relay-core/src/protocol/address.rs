//! Conversion between `(hostname, port)` pairs and canonical address strings.
//!
//! IPv6 literals contain colons, so they must be wrapped in square brackets
//! before a `:port` suffix can be appended unambiguously:
//!
//! ```text
//! ("example.com", 6837) <-> "example.com:6837"
//! ("::1", 6837)         <-> "[::1]:6837"
//! ```
//!
//! No hostname syntax validation happens here; any string is accepted as-is.

use thiserror::Error;

/// Errors returned by [`parse_address`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The host part is empty or has an unterminated `[` bracket.
    #[error("invalid host in address: {0:?}")]
    InvalidHost(String),

    /// The port part is not a number in `0..=65535`.
    #[error("invalid port in address: {0:?}")]
    InvalidPort(String),
}

/// Formats `hostname` and `port` as a `host:port` address string.
///
/// A hostname containing a colon is treated as an IPv6 literal and bracketed.
pub fn format_address(hostname: &str, port: u16) -> String {
    if hostname.contains(':') {
        format!("[{hostname}]:{port}")
    } else {
        format!("{hostname}:{port}")
    }
}

/// Splits an address string back into `(hostname, port)`.
///
/// Accepts `host`, `host:port`, `[v6]`, `[v6]:port` and bare IPv6 literals
/// such as `::1` (more than one colon means the whole string is the host).
/// `default_port` is used when no port is present.
///
/// # Errors
///
/// Returns [`AddressError::InvalidHost`] for an empty host or an unterminated
/// bracket, and [`AddressError::InvalidPort`] for a non-numeric or
/// out-of-range port.
pub fn parse_address(address: &str, default_port: u16) -> Result<(String, u16), AddressError> {
    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| AddressError::InvalidHost(address.to_string()))?;
        let port = match tail {
            "" => None,
            _ => Some(
                tail.strip_prefix(':')
                    .ok_or_else(|| AddressError::InvalidPort(tail.to_string()))?,
            ),
        };
        (host, port)
    } else if address.matches(':').count() > 1 {
        (address, None)
    } else {
        match address.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (address, None),
        }
    };

    if host.is_empty() {
        return Err(AddressError::InvalidHost(address.to_string()));
    }

    let port = match port {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| AddressError::InvalidPort(text.to_string()))?,
        None => default_port,
    };

    Ok((host.to_string(), port))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
