//! Defines the token transfer message type

use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_host_types::TimeoutHeight;
use ics20_primitives::prelude::*;
use ics20_primitives::{Signer, Timestamp};

use crate::error::TokenTransferError;
use crate::{ForwardingInfo, Memo, RawCoin, MAX_HOPS};

/// Message used to build an ICS20 token transfer packet.
///
/// Note that this message is not a packet yet, as it lacks the proper sequence
/// number, and destination port/channel. This is by design. The sender of the
/// packet, which might be the user of a command line application, should only
/// have to specify the information related to the transfer of the token, and
/// let the library figure out how to build the packet properly.
///
/// Token denominations are carried in their local form: the base denomination
/// for native tokens, or the `ibc/{hash}` voucher reference for tokens that
/// arrived over IBC. The send handler resolves voucher references through the
/// trace table before constructing the packet data.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgTransfer {
    /// the port on which the packet will be sent
    pub port_id_on_a: PortId,
    /// the channel by which the packet will be sent
    pub chan_id_on_a: ChannelId,
    /// the tokens to be transferred, under their local denominations
    pub tokens: Vec<RawCoin>,
    pub sender: Signer,
    pub receiver: Signer,
    /// optional user memo, forbidden when forwarding hops are present
    pub memo: Memo,
    /// remaining hops for a multi-hop transfer
    pub forwarding: ForwardingInfo,
    /// Timeout height relative to the current block height.
    /// The timeout is disabled when set to None.
    pub timeout_height_on_b: TimeoutHeight,
    /// Timeout timestamp relative to the current block timestamp.
    /// The timeout is disabled when set to 0.
    pub timeout_timestamp_on_b: Timestamp,
}

impl MsgTransfer {
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        if self.sender.is_empty() || self.receiver.is_empty() {
            return Err(TokenTransferError::EmptySigner);
        }

        if self.tokens.is_empty() {
            return Err(TokenTransferError::EmptyTokenList);
        }

        for token in &self.tokens {
            if token.denom.is_empty() || token.amount.is_zero() {
                return Err(TokenTransferError::InvalidCoin {
                    coin: token.to_string(),
                });
            }
        }

        if self.forwarding.has_hops() && !self.memo.is_empty() {
            return Err(TokenTransferError::InvalidMemoSpecification);
        }

        if self.forwarding.hops.len() > MAX_HOPS {
            return Err(TokenTransferError::TooManyHops {
                hops: self.forwarding.hops.len() as u64,
                max: MAX_HOPS as u64,
            });
        }

        // Packet timeout height and packet timeout timestamp cannot both be unset.
        if !self.timeout_height_on_b.is_set() && !self.timeout_timestamp_on_b.is_set() {
            return Err(TokenTransferError::MissingTimeout);
        }

        Ok(())
    }
}
