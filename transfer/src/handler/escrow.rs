//! Escrow bookkeeping: moves coins in and out of the per-channel escrow
//! account while maintaining the per-denomination escrow totals.

use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_primitives::prelude::*;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::{get_escrow_address, PrefixedCoin};

use crate::context::TokenTransferExecutionContext;

/// Sends the given coin from `from_account` to the escrow account of the
/// channel end, and adds the amount to the escrow total of its denomination.
///
/// A transfer failure (e.g. insufficient balance) is returned unchanged; it
/// is an expected outcome that aborts the enclosing transition.
pub fn escrow_token<Ctx: TokenTransferExecutionContext>(
    ctx: &mut Ctx,
    from_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
) -> Result<(), TokenTransferError> {
    let escrow_account: Ctx::AccountId = get_escrow_address(port_id, channel_id)
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    ctx.send_coins(from_account, &escrow_account, coin)?;

    // Track the total amount in escrow keyed by denomination to allow for
    // efficient iteration.
    let denom = coin.denom.hashed_denom();
    let new_total = ctx
        .total_escrow(&denom)
        .checked_add(coin.amount)
        .ok_or_else(|| TokenTransferError::EscrowOverflow {
            denom: denom.clone(),
        })?;
    ctx.set_total_escrow(denom, new_total)
}

/// Sends the given coin from the escrow account of the channel end to
/// `to_account`, and deducts the amount from the escrow total of its
/// denomination.
///
/// The escrow account must always hold at least what was escrowed, so a
/// transfer failure here, or a total that would drop below zero, indicates a
/// malicious counterparty module or a bug. Both are surfaced as errors rather
/// than panics so that receive processing can still produce a failure
/// acknowledgement.
pub fn unescrow_token<Ctx: TokenTransferExecutionContext>(
    ctx: &mut Ctx,
    to_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
) -> Result<(), TokenTransferError> {
    let escrow_account: Ctx::AccountId = get_escrow_address(port_id, channel_id)
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    ctx.send_coins(&escrow_account, to_account, coin)
        .map_err(|err| TokenTransferError::FailedToUnescrow {
            description: err.to_string(),
        })?;

    let denom = coin.denom.hashed_denom();
    let new_total = ctx
        .total_escrow(&denom)
        .checked_sub(coin.amount)
        .ok_or_else(|| TokenTransferError::EscrowUnderflow {
            denom: denom.clone(),
        })?;
    ctx.set_total_escrow(denom, new_total)
}
