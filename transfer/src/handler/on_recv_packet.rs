use ics20_host_types::{ModuleExtras, Packet};
use ics20_primitives::prelude::*;
use ics20_primitives::Signer;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::events::DenomTraceEvent;
use ics20_transfer_types::packet::PacketData;
use ics20_transfer_types::{
    get_forward_address, is_receiver_chain_source, RawCoin, TracePrefix,
};

use crate::context::TokenTransferExecutionContext;
use crate::handler::{forward_packet_tokens, unescrow_token};

/// This function handles the transfer receiving logic.
///
/// Note that validation steps are performed inline rather than through a
/// separate `on_recv_packet_validate()` callback, because regardless of
/// whether or not the app succeeds to receive the packet, the `execute()`
/// phase must run: when the app fails to receive, a failure acknowledgement
/// gets relayed back to the sender so that the escrowed tokens can be
/// refunded. Events accumulated up to a failure are returned alongside the
/// error so the host can still attach them to the failure acknowledgement.
pub fn process_recv_packet_execute<Ctx: TokenTransferExecutionContext>(
    ctx_b: &mut Ctx,
    packet: &Packet,
    data: PacketData,
) -> Result<ModuleExtras, (ModuleExtras, TokenTransferError)> {
    ctx_b
        .can_receive_coins()
        .map_err(|err| (ModuleExtras::empty(), err))?;

    data.validate_basic()
        .map_err(|err| (ModuleExtras::empty(), err))?;

    // When the packet carries forwarding hops, the immediate receiver is the
    // per-channel forwarding intermediary account, and the packet's receiver
    // field is reinterpreted as the final receiver once forwarding completes.
    let receiver: Signer = if data.forwarding.has_hops() {
        get_forward_address(&packet.port_id_on_b, &packet.chan_id_on_b)
    } else {
        data.receiver.clone()
    };

    let receiver_account: Ctx::AccountId = receiver.clone().try_into().map_err(|_| {
        (
            ModuleExtras::empty(),
            TokenTransferError::ParseAccountFailure,
        )
    })?;

    let mut extras = ModuleExtras::empty();
    let mut received_tokens: Vec<RawCoin> = Vec::with_capacity(data.tokens.len());

    for token in &data.tokens {
        // This is the prefix that would have been prefixed to the
        // denomination on the sender chain IF and only if the token
        // originally came from this chain.
        //
        // NOTE: the check uses the packet's *source* port and channel,
        // because the counterparty would have prefixed with the destination
        // port and channel of its own receive, which this channel end is.
        if is_receiver_chain_source(
            packet.port_id_on_a.clone(),
            packet.chan_id_on_a.clone(),
            &token.denom,
        ) {
            // sender chain is not the source, unescrow tokens

            // remove the prefix added by the sender chain
            let prefix = TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());
            let coin = {
                let mut c = token.clone();
                c.denom.remove_trace_prefix(&prefix);
                c
            };

            if ctx_b.is_blocked_account(&receiver_account) {
                return Err((
                    extras,
                    TokenTransferError::UnauthorizedReceiver {
                        account: receiver.to_string(),
                    },
                ));
            }

            unescrow_token(
                ctx_b,
                &receiver_account,
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                &coin,
            )
            .map_err(|err| (extras.clone(), err))?;

            extras
                .log
                .push(format!("unescrowed {coin} to {receiver}"));

            received_tokens.push(RawCoin {
                denom: coin.denom.hashed_denom(),
                amount: coin.amount,
            });
        } else {
            // sender chain is the source, mint vouchers

            // since the send did not prefix the denomination, we must prefix
            // it here with this channel end
            let prefix = TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
            let coin = {
                let mut c = token.clone();
                c.denom.add_trace_prefix(prefix);
                c
            };

            // register the trace the first time this voucher is seen
            let trace_hash = coin.denom.trace_hash();
            if !ctx_b.has_denom_trace(&trace_hash) {
                ctx_b
                    .set_denom_trace(&coin.denom)
                    .map_err(|err| (extras.clone(), err))?;

                let denom_trace_event = DenomTraceEvent {
                    trace_hash,
                    denom: coin.denom.clone(),
                };
                extras.events.push(denom_trace_event.into());
            }

            let voucher_denom = coin.denom.hashed_denom();
            if !ctx_b.has_denom_metadata(&voucher_denom) {
                ctx_b
                    .set_denom_metadata(&coin.denom)
                    .map_err(|err| (extras.clone(), err))?;
            }

            ctx_b
                .mint_coins(&receiver_account, &coin)
                .map_err(|err| (extras.clone(), err))?;

            extras
                .log
                .push(format!("minted {} of {voucher_denom} to {receiver}", coin.amount));

            received_tokens.push(RawCoin {
                denom: voucher_denom,
                amount: coin.amount,
            });
        }
    }

    // Hand the received balances to the forwarding engine for the remaining
    // hops. A failed forward fails this receive as a whole; the transition's
    // state is discarded and a failure acknowledgement is produced for the
    // original inbound packet.
    if data.forwarding.has_hops() {
        let (_sequence, forward_extras) = forward_packet_tokens(
            ctx_b,
            received_tokens,
            receiver,
            data.receiver.clone(),
            &data.forwarding,
        )
        .map_err(|err| (extras.clone(), err))?;

        extras.events.extend(forward_extras.events);
        extras.log.extend(forward_extras.log);
    }

    Ok(extras)
}
