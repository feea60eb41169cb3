use ics20_primitives::prelude::*;

use crate::error::IdentifierError;

/// The sequence number of a packet enforces ordering among packets from the same source.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Sequence(u64);

impl core::str::FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            IdentifierError::FailedToParse {
                value: s.to_string(),
                description: e.to_string(),
            }
        })?))
    }
}

impl Sequence {
    /// Gives the sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the sequence number is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Increments the sequence number by one.
    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }

    /// Encodes the sequence number into a byte array in big endian.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl core::fmt::Display for Sequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.0)
    }
}
