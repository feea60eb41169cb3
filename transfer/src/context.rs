//! Defines the main context traits through which the relay logic consumes its
//! host collaborators: the bank ledger, the packet transport, the trace
//! store, and the application parameters.

use ics20_host_types::identifiers::{ChannelId, PortId, Sequence};
use ics20_host_types::TimeoutHeight;
use ics20_primitives::prelude::*;
use ics20_primitives::{Signer, Timestamp};
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::{Amount, PrefixedCoin, PrefixedDenom, TraceHash};

/// Methods required in token transfer validation, to be implemented by the host
pub trait TokenTransferValidationContext {
    type AccountId: TryFrom<Signer>;

    /// get_port returns the portID for the transfer module.
    fn get_port(&self) -> Result<PortId, TokenTransferError>;

    /// Returns Ok() if the host chain supports sending coins.
    fn can_send_coins(&self) -> Result<(), TokenTransferError>;

    /// Returns Ok() if the host chain supports receiving coins.
    fn can_receive_coins(&self) -> Result<(), TokenTransferError>;

    /// Returns the counterparty channel end of the given local channel end.
    fn channel_counterparty(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(PortId, ChannelId), TokenTransferError>;

    /// Returns Ok() if this module owns the capability for the given channel
    /// end.
    fn check_channel_capability(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), TokenTransferError>;

    /// Returns the timeout bounds the host assigns to packets created for
    /// intermediate forwarding hops.
    fn forwarded_packet_timeout(
        &self,
    ) -> Result<(TimeoutHeight, Timestamp), TokenTransferError>;

    /// Returns true if transfers to the given account are forbidden by the
    /// host chain.
    fn is_blocked_account(&self, account: &Self::AccountId) -> bool;

    /// Returns true if bank metadata is already registered for the given
    /// local denomination.
    fn has_denom_metadata(&self, denom: &str) -> bool;

    /// Looks up a registered denomination trace by its hash.
    fn denom_trace(&self, hash: &TraceHash) -> Option<PrefixedDenom>;

    /// Returns true if a denomination trace is registered under the given
    /// hash.
    fn has_denom_trace(&self, hash: &TraceHash) -> bool;

    /// Returns the running total held in escrow for the given local
    /// denomination, zero when nothing is tracked.
    fn total_escrow(&self, denom: &str) -> Amount;
}

/// Methods required in token transfer execution, to be implemented by the host
pub trait TokenTransferExecutionContext: TokenTransferValidationContext {
    /// Transfers coins between two accounts on the host ledger.
    ///
    /// An insufficient balance is an expected failure and must be surfaced
    /// as an ordinary error.
    fn send_coins(
        &mut self,
        from_account: &Self::AccountId,
        to_account: &Self::AccountId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// This function to enable minting ibc tokens to a user account
    fn mint_coins(
        &mut self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// This function should enable burning of minted tokens in a user account
    fn burn_coins(
        &mut self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// Registers bank metadata for the voucher denomination of the given
    /// trace.
    fn set_denom_metadata(&mut self, trace: &PrefixedDenom) -> Result<(), TokenTransferError>;

    /// Registers a denomination trace under its hash.
    ///
    /// Callers guarantee idempotency by checking
    /// [`TokenTransferValidationContext::has_denom_trace`] first.
    fn set_denom_trace(&mut self, trace: &PrefixedDenom) -> Result<(), TokenTransferError>;

    /// Stores the running escrow total for the given local denomination.
    fn set_total_escrow(&mut self, denom: String, amount: Amount)
        -> Result<(), TokenTransferError>;

    /// Hands a fully built packet payload to the transport layer and returns
    /// the sequence number it was assigned.
    fn send_packet(
        &mut self,
        port_id_on_a: &PortId,
        chan_id_on_a: &ChannelId,
        timeout_height_on_b: &TimeoutHeight,
        timeout_timestamp_on_b: &Timestamp,
        data: Vec<u8>,
    ) -> Result<Sequence, TokenTransferError>;
}
