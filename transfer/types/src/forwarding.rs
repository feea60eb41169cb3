//! Defines the forwarding path carried by a transfer that hops across
//! several channels within one logical transfer.

use core::fmt::{Display, Error as FmtError, Formatter};

use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_primitives::prelude::*;

use super::memo::Memo;

/// The maximum number of forwarding hops a single transfer may carry.
///
/// The hop list bounds the recursion depth of forwarded sends by
/// construction; this cap additionally bounds the worst-case work a single
/// inbound packet can trigger.
pub const MAX_HOPS: usize = 8;

/// A single forwarding hop: the channel end on which the intermediate chain
/// must send the transfer onward.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Hop {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl Hop {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }
}

impl Display for Hop {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// The remaining forwarding path of a transfer.
///
/// The `memo` travels with the forwarding path and is only attached to the
/// packet of the final hop; intermediate legs are sent without a memo. A
/// non-empty hop list is mutually exclusive with a user memo on the outer
/// packet.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ForwardingInfo {
    pub hops: Vec<Hop>,
    pub memo: Memo,
}

impl ForwardingInfo {
    pub fn new(hops: Vec<Hop>, memo: Memo) -> Self {
        Self { hops, memo }
    }

    /// Returns a forwarding path with no hops left.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_hops(&self) -> bool {
        !self.hops.is_empty()
    }
}
