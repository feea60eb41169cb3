use core::fmt::{Display, Error as FmtError, Formatter};

use ics20_primitives::prelude::*;

/// The height of a chain, comprising the revision number (incremented on hard
/// forks) and the block height within that revision.
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
pub struct Height {
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
