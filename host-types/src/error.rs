//! Foundational error types shared across the workspace crates.

use displaydoc::Display;
use ics20_primitives::prelude::*;

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, serde::Serialize)]
pub enum IdentifierError {
    /// id `{actual}` has invalid length; must be between [`{min}`,`{max}`)
    InvalidLength { actual: String, min: u64, max: u64 },
    /// id `{0}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter(String),
    /// invalid prefix: `{0}`
    InvalidPrefix(String),
    /// failed to parse `{value}`: `{description}`
    FailedToParse { value: String, description: String },
}

/// Errors that arise while handling packets and acknowledgements.
#[derive(Debug, Display)]
pub enum PacketError {
    /// acknowledgement is empty
    InvalidAcknowledgement,
    /// acknowledgement status cannot be empty
    EmptyAcknowledgementStatus,
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {}
