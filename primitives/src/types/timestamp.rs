//! Defines the representation of timestamps used in packet timeouts.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::str::FromStr;

use displaydoc::Display as DisplayDoc;

use crate::prelude::*;

/// A timestamp in nanoseconds since the UNIX epoch.
///
/// The zero value carries the conventional "timeout disabled" meaning used
/// by packet timeout fields, surfaced through [`Timestamp::is_set`].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Returns a timestamp with the "disabled" sentinel value.
    pub fn none() -> Self {
        Self(0)
    }

    pub fn nanoseconds(&self) -> u64 {
        self.0
    }

    /// Returns `true` unless the timestamp holds the zero sentinel.
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `self` is strictly after `other`.
    pub fn after(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }
}

impl From<Timestamp> for u64 {
    fn from(timestamp: Timestamp) -> u64 {
        timestamp.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>().map_err(TimestampError::FailedToParse)?))
    }
}

#[derive(Debug, DisplayDoc)]
pub enum TimestampError {
    /// failed to parse timestamp: `{0}`
    FailedToParse(ParseIntError),
}

#[cfg(feature = "std")]
impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FailedToParse(e) => Some(e),
        }
    }
}
