//! Deterministic derivation of the module-controlled accounts used by the
//! transfer application.

use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_primitives::prelude::*;
use ics20_primitives::Signer;
use sha2::{Digest, Sha256};

use crate::VERSION;

/// Domain prefix for the per-channel forwarding intermediary accounts.
const FORWARD_ADDRESS_PREFIX: &str = "forwarding";

/// Number of bytes kept from the address hash, per ADR-028 module account
/// derivation.
const ADDRESS_LEN: usize = 20;

/// Returns the escrow account owned by the chain for the given channel end.
///
/// Tokens of which this chain is the source zone are locked here while they
/// live on other chains. The derivation is a pure function of the channel
/// end; no state is consulted.
pub fn get_escrow_address(port_id: &PortId, channel_id: &ChannelId) -> Signer {
    address_hash(VERSION, port_id, channel_id)
}

/// Returns the intermediary account that receives tokens on behalf of the
/// final receiver while a multi-hop transfer is in flight on this chain.
///
/// Derived per channel end like the escrow account, under a separate domain
/// prefix so the two accounts never collide.
pub fn get_forward_address(port_id: &PortId, channel_id: &ChannelId) -> Signer {
    address_hash(FORWARD_ADDRESS_PREFIX, port_id, channel_id)
}

fn address_hash(domain: &str, port_id: &PortId, channel_id: &ChannelId) -> Signer {
    // A slash creates domain separation between the port and channel
    // identifiers to prevent collisions between accounts derived for
    // different channels.
    let contents = format!("{port_id}/{channel_id}");

    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update([0u8]);
    hasher.update(contents.as_bytes());
    let hash = hasher.finalize();

    Signer::new(hex::encode(&hash[..ADDRESS_LEN]))
}
