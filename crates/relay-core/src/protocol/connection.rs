//! Connection descriptors and the pairing URL format.
//!
//! A [`ConnectionDescriptor`] describes one side of a paired remote session:
//! where the relay server lives, which shared key authenticates the session,
//! and which role this side plays. It serializes to a pairing URL:
//!
//! ```text
//! nvdaremote://<host-or-[ipv6]>:<port>?key=<secret>&mode=<master|slave>[&insecure=true]
//! ```
//!
//! # Role flipping
//!
//! The two sides of a session must hold complementary roles. The URL a
//! controller hands out to be dialled by its peer therefore carries the
//! *opposite* role: [`ConnectionDescriptor::to_invitation_url`] produces it,
//! while [`ConnectionDescriptor::to_connection_url`] keeps the descriptor's
//! own role.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::{form_urlencoded, Host, Url};

use super::address::format_address;
use super::{DEFAULT_PORT, URL_SCHEME};

/// Reasons a pairing URL (or a directly built descriptor) is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlParsingError {
    /// The URL authority carries no hostname.
    #[error("No hostname provided")]
    MissingHostname,

    /// The `key` query parameter is absent or empty.
    #[error("No key provided")]
    MissingKey,

    /// The `mode` query parameter is absent or empty.
    #[error("No mode provided")]
    MissingMode,

    /// The `mode` query parameter is not a known role.
    #[error("Invalid mode provided: {0:?}")]
    InvalidMode(String),

    /// The authority carries a port outside `0..=65535`.
    #[error("Invalid port provided: {0}")]
    InvalidPort(String),

    /// The text is not a URL at all.
    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// The two complementary roles of a paired session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionRole {
    /// Drives input on the peer. Wire name `master`.
    Controller,
    /// Receives input from the peer. Wire name `slave`.
    Controlled,
}

impl ConnectionRole {
    /// Returns the wire name used in the `mode` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "master",
            Self::Controlled => "slave",
        }
    }

    /// Returns the complementary role.
    pub fn flipped(self) -> Self {
        match self {
            Self::Controller => Self::Controlled,
            Self::Controlled => Self::Controller,
        }
    }
}

impl fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionRole {
    type Err = UrlParsingError;

    /// Accepts `master`/`slave` and `controller`/`controlled`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Err(UrlParsingError::MissingMode),
            "master" | "controller" => Ok(Self::Controller),
            "slave" | "controlled" => Ok(Self::Controlled),
            _ => Err(UrlParsingError::InvalidMode(s.to_string())),
        }
    }
}

/// Lifecycle of a session as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The relay address is being dialled.
    Connecting,
    /// The session is established.
    Connected,
    /// The session is being torn down.
    Disconnecting,
    /// No session is active.
    Disconnected,
}

impl ConnectionState {
    /// Returns the lowercase name shown in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one side of a pairing session.
///
/// Fields are private so a descriptor can only exist in a validated state:
/// non-empty hostname and key, a defined role, and a concrete port.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConnectionDescriptor {
    hostname: String,
    port: u16,
    role: ConnectionRole,
    key: String,
    insecure: bool,
}

impl ConnectionDescriptor {
    /// Builds a descriptor from its parts.
    ///
    /// A `port` of `0` selects [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns [`UrlParsingError::MissingHostname`] or
    /// [`UrlParsingError::MissingKey`] when the corresponding value is empty,
    /// and [`UrlParsingError::Malformed`] when the hostname holds a character
    /// that cannot appear in a URL authority.
    pub fn new(
        hostname: impl Into<String>,
        role: ConnectionRole,
        key: impl Into<String>,
        port: u16,
        insecure: bool,
    ) -> Result<Self, UrlParsingError> {
        let hostname = hostname.into();
        let key = key.into();
        if hostname.is_empty() {
            return Err(UrlParsingError::MissingHostname);
        }
        if hostname.chars().any(is_forbidden_host_char) {
            return Err(UrlParsingError::Malformed(format!("invalid hostname {hostname:?}")));
        }
        if key.is_empty() {
            return Err(UrlParsingError::MissingKey);
        }
        Ok(Self {
            hostname,
            port: if port == 0 { DEFAULT_PORT } else { port },
            role,
            key,
            insecure,
        })
    }

    /// Parses a pairing URL.
    ///
    /// The hostname and port come from the authority; `key`, `mode` and
    /// `insecure` come from the query string. For each parameter the first
    /// non-empty value wins. `insecure` is set only by the value `true`
    /// (any case). The scheme is not checked; an explicit port is kept even
    /// when it is the scheme's well-known default. Percent-encoded hostnames
    /// are decoded.
    ///
    /// # Errors
    ///
    /// Returns a [`UrlParsingError`] naming the first missing or invalid part,
    /// checked in the order hostname, key, mode.
    pub fn parse(input: &str) -> Result<Self, UrlParsingError> {
        let url = Url::parse(input).map_err(|e| match e {
            url::ParseError::EmptyHost | url::ParseError::RelativeUrlWithoutBase => {
                UrlParsingError::MissingHostname
            }
            url::ParseError::InvalidPort => UrlParsingError::InvalidPort(input.to_string()),
            other => UrlParsingError::Malformed(other.to_string()),
        })?;

        let hostname = match url.host() {
            // Hosts of unknown schemes stay percent-encoded in `Url`.
            Some(Host::Domain(domain)) if !domain.is_empty() => urlencoding::decode(domain)
                .map_err(|e| UrlParsingError::Malformed(e.to_string()))?
                .into_owned(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(UrlParsingError::MissingHostname),
        };

        let key = query_value(&url, "key").ok_or(UrlParsingError::MissingKey)?;
        let mode = query_value(&url, "mode").ok_or(UrlParsingError::MissingMode)?;
        let role = mode.parse::<ConnectionRole>()?;
        let insecure = query_value(&url, "insecure")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        Self::new(hostname, role, key, explicit_port(&url, input).unwrap_or(0), insecure)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn role(&self) -> ConnectionRole {
        self.role
    }

    /// The shared session secret.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `true` when transport security negotiation is disabled.
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    /// Returns the `host:port` address, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        format_address(&self.hostname, self.port)
    }

    /// Serializes this descriptor, with its own role, as a pairing URL.
    pub fn to_connection_url(&self) -> String {
        self.build_url(self.role)
    }

    /// Serializes this descriptor with the role flipped.
    ///
    /// This is the URL handed to the peer: when they connect with it, their
    /// role complements this side's role.
    pub fn to_invitation_url(&self) -> String {
        self.build_url(self.role.flipped())
    }

    fn build_url(&self, role: ConnectionRole) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("key", &self.key);
        query.append_pair("mode", role.as_str());
        if self.insecure {
            query.append_pair("insecure", "true");
        }
        format!("{URL_SCHEME}://{}?{}", self.address(), query.finish())
    }
}

impl FromStr for ConnectionDescriptor {
    type Err = UrlParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    // The key authenticates the session; keep it out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("role", &self.role)
            .field("key", &"<redacted>")
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// Characters that end or corrupt a URL authority.
fn is_forbidden_host_char(c: char) -> bool {
    c.is_whitespace() || c.is_control() || "/?#@[]\\%<>^|".contains(c)
}

/// The port written in `input`'s authority, if any.
///
/// `Url::port` hides a port equal to the scheme's default (`https://h:443`),
/// so the authority text is consulted before falling back to that default.
fn explicit_port(url: &Url, input: &str) -> Option<u16> {
    url.port().or_else(|| {
        let authority = input.split_once("://")?.1;
        let authority = authority.split(['/', '?', '#']).next()?;
        let host_port = authority.rsplit('@').next()?;
        let after_host = host_port.rsplit(']').next()?;
        let (_, port) = after_host.rsplit_once(':')?;
        if port.is_empty() {
            None
        } else {
            url.port_or_known_default()
        }
    })
}

/// Returns the first non-empty value of query parameter `name`.
fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == name && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
