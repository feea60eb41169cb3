//! Defines the packet type delivered by the transport layer.

use ics20_primitives::prelude::*;
use ics20_primitives::Timestamp;

use crate::identifiers::{ChannelId, PortId, Sequence};
use crate::timeout::TimeoutHeight;

/// A packet as delivered to the application by the transport layer.
///
/// The `data` field carries the opaque application payload; for token
/// transfers it holds the JSON-encoded packet data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: Timestamp,
}
