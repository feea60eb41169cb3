//! Defines the memo type, carried alongside a transfer for the receiver or
//! intermediate middleware to interpret.

use core::convert::Infallible;
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ics20_primitives::prelude::*;

/// An arbitrary string attached to a transfer, opaque to the relay logic.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Memo(String);

impl Memo {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Memo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Memo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Memo {
    fn from(memo: String) -> Self {
        Self(memo)
    }
}

impl From<&str> for Memo {
    fn from(memo: &str) -> Self {
        Self(memo.to_owned())
    }
}

impl FromStr for Memo {
    type Err = Infallible;

    fn from_str(memo: &str) -> Result<Self, Self::Err> {
        Ok(Self(memo.to_owned()))
    }
}
