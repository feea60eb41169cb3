//! Defines the representation of packet timeout heights.

use core::fmt::{Display, Error as FmtError, Formatter};

use ics20_primitives::prelude::*;

use crate::height::Height;

/// Indicates a height on the destination chain after which the packet will no
/// longer be processed, and will instead count as having timed-out.
///
/// The IBC protocol represents the absence of a timeout as a zero height,
/// which this type models explicitly with the `Never` variant.
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
pub enum TimeoutHeight {
    #[default]
    Never,
    At(Height),
}

impl TimeoutHeight {
    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Returns `true` unless the timeout is disabled.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Check if a height is *strictly past* the timeout height, and thus the
    /// packet has timed out.
    pub fn has_expired(&self, height: &Height) -> bool {
        match self {
            Self::At(timeout_height) => height > timeout_height,
            // When there's no timeout, the packet never times out.
            Self::Never => false,
        }
    }
}

impl From<Height> for TimeoutHeight {
    fn from(height: Height) -> Self {
        Self::At(height)
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_height) => write!(f, "{timeout_height}"),
            Self::Never => write!(f, "no timeout"),
        }
    }
}
