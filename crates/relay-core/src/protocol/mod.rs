//! Pairing protocol: address strings and connection descriptors.

pub mod address;
pub mod connection;

pub use address::{format_address, parse_address, AddressError};
pub use connection::{ConnectionDescriptor, ConnectionRole, ConnectionState, UrlParsingError};

/// Port the relay server listens on when a pairing URL names none.
pub const DEFAULT_PORT: u16 = 6837;

/// Scheme of every pairing URL this crate produces.
pub const URL_SCHEME: &str = "nvdaremote";
