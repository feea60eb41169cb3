use core::str::FromStr;

use ics20_host_types::identifiers::Sequence;
use ics20_host_types::ModuleExtras;
use ics20_primitives::prelude::*;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::events::TransferEvent;
use ics20_transfer_types::msgs::transfer::MsgTransfer;
use ics20_transfer_types::packet::PacketData;
use ics20_transfer_types::{
    is_sender_chain_source, PrefixedCoin, PrefixedDenom, RawCoin, TraceHash, DENOM_PREFIX,
};

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::handler::escrow_token;

/// Initiate a token transfer. Equivalent to calling [`send_transfer_validate`], followed by [`send_transfer_execute`].
///
/// There are two possible cases per token:
///
/// 1. Sender chain is acting as the source zone. The coin is transferred to
///    the escrow address (i.e. locked) on the sender chain, to be unlocked
///    when it eventually returns. The receiving chain will mint vouchers.
///
/// 2. Sender chain is acting as the sink zone. The coin (a voucher) is burnt
///    on the sender chain. The receiving chain, which had previously sent the
///    original denomination, will unescrow it.
///
/// The token's timeline determines the case: each send to any chain other
/// than the one it was previously received from is a movement forwards in the
/// token's timeline, prefixing the destination channel end onto the
/// denomination; sending it back to the chain it came from strips that prefix
/// instead.
pub fn send_transfer<Ctx>(
    ctx_a: &mut Ctx,
    msg: MsgTransfer,
) -> Result<(Sequence, ModuleExtras), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    send_transfer_validate(ctx_a, &msg)?;
    send_transfer_execute(ctx_a, msg)
}

/// Validates the token transfer. If this succeeds, then it is legal to initiate the transfer with [`send_transfer_execute`].
pub fn send_transfer_validate<Ctx>(ctx_a: &Ctx, msg: &MsgTransfer) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    ctx_a.can_send_coins()?;

    msg.validate_basic()?;

    ctx_a.check_channel_capability(&msg.port_id_on_a, &msg.chan_id_on_a)?;

    let (_port_id_on_b, _chan_id_on_b) =
        ctx_a.channel_counterparty(&msg.port_id_on_a, &msg.chan_id_on_a)?;

    let _sender: Ctx::AccountId = msg
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    Ok(())
}

/// Executes the token transfer. A prior call to [`send_transfer_validate`] MUST have succeeded.
///
/// Returns the sequence number assigned to the outbound packet, along with
/// the events and log entries to be emitted once the transition commits.
pub fn send_transfer_execute<Ctx>(
    ctx_a: &mut Ctx,
    msg: MsgTransfer,
) -> Result<(Sequence, ModuleExtras), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let sender: Ctx::AccountId = msg
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    let mut tokens = Vec::with_capacity(msg.tokens.len());

    for coin in &msg.tokens {
        // NOTE: the packet carries the denomination as it is known on this
        // chain, with voucher references resolved to their full path. The
        // receiving chain performs denom prefixing as necessary.
        let denom = resolve_local_denom(ctx_a, coin)?;

        let token = PrefixedCoin {
            denom,
            amount: coin.amount,
        };

        if is_sender_chain_source(
            msg.port_id_on_a.clone(),
            msg.chan_id_on_a.clone(),
            &token.denom,
        ) {
            // obtain the escrow address for the source channel end
            escrow_token(
                ctx_a,
                &sender,
                &msg.port_id_on_a,
                &msg.chan_id_on_a,
                &token,
            )?;
        } else {
            ctx_a.burn_coins(&sender, &token)?;
        }

        tokens.push(token);
    }

    let packet_data = PacketData {
        tokens,
        sender: msg.sender,
        receiver: msg.receiver,
        memo: msg.memo,
        forwarding: msg.forwarding,
    };

    let data = serde_json::to_vec(&packet_data)
        .expect("PacketData's infallible Serialize impl failed");

    let sequence = ctx_a.send_packet(
        &msg.port_id_on_a,
        &msg.chan_id_on_a,
        &msg.timeout_height_on_b,
        &msg.timeout_timestamp_on_b,
        data,
    )?;

    let extras = {
        let mut extras = ModuleExtras::empty();

        for token in &packet_data.tokens {
            extras.log.push(format!(
                "IBC fungible token transfer: {} --({})--> {}",
                packet_data.sender, token, packet_data.receiver
            ));

            let transfer_event = TransferEvent {
                sender: packet_data.sender.clone(),
                receiver: packet_data.receiver.clone(),
                amount: token.amount,
                denom: token.denom.clone(),
                memo: packet_data.memo.clone(),
            };
            extras.events.push(transfer_event.into());
        }

        extras
    };

    Ok((sequence, extras))
}

/// Resolves a locally held denomination into its full path: an `ibc/{hash}`
/// voucher reference is looked up in the trace table, anything else is
/// parsed directly.
///
/// A voucher reference whose trace is unknown fails the transfer; the chain
/// cannot have minted a voucher without learning its trace first.
fn resolve_local_denom<Ctx: TokenTransferValidationContext>(
    ctx: &Ctx,
    coin: &RawCoin,
) -> Result<PrefixedDenom, TokenTransferError> {
    match coin
        .denom
        .strip_prefix(DENOM_PREFIX)
        .and_then(|suffix| suffix.strip_prefix('/'))
    {
        Some(hex_hash) => {
            let hash = TraceHash::from_str(hex_hash)?;
            ctx.denom_trace(&hash)
                .ok_or_else(|| TokenTransferError::TraceNotFound {
                    hash: hex_hash.to_string(),
                })
        }
        None => PrefixedDenom::from_str(&coin.denom),
    }
}
