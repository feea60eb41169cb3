//! Implements the processing logic for ICS20 (token transfer) messages.
mod escrow;
mod forward;
mod on_recv_packet;
mod send_transfer;

pub use escrow::*;
pub use forward::*;
pub use on_recv_packet::*;
pub use send_transfer::*;

use ics20_host_types::Packet;
use ics20_primitives::prelude::*;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::is_sender_chain_source;
use ics20_transfer_types::packet::PacketData;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

/// Refunds every token of a packet back to its original sender, after a
/// failure acknowledgement or a timeout.
///
/// Source-vs-sink is recomputed per token from the original send-time channel
/// end: tokens escrowed at send time are unescrowed, tokens burnt at send
/// time are minted back. A mint that cannot be delivered at this stage is
/// unrecoverable, since the refunded value has already been created; it is
/// classified as a distinct fatal error for the host to abort on.
pub fn refund_packet_tokens_execute<Ctx: TokenTransferExecutionContext>(
    ctx_a: &mut Ctx,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender: Ctx::AccountId = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    for token in &data.tokens {
        if is_sender_chain_source(
            packet.port_id_on_a.clone(),
            packet.chan_id_on_a.clone(),
            &token.denom,
        ) {
            // unescrow tokens back to sender
            unescrow_token(
                ctx_a,
                &sender,
                &packet.port_id_on_a,
                &packet.chan_id_on_a,
                token,
            )?;
        }
        // mint vouchers back to sender
        else {
            ctx_a
                .mint_coins(&sender, token)
                .map_err(|err| TokenTransferError::FailedRefund {
                    receiver: data.sender.to_string(),
                    description: err.to_string(),
                })?;
        }
    }

    Ok(())
}

/// Checks that a refund of the given packet could be executed: the sender
/// address must parse into a host account.
pub fn refund_packet_tokens_validate<Ctx: TokenTransferValidationContext>(
    _ctx_a: &Ctx,
    _packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let _sender: Ctx::AccountId = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    Ok(())
}
