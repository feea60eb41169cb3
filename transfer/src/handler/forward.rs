use ics20_host_types::identifiers::Sequence;
use ics20_host_types::ModuleExtras;
use ics20_primitives::prelude::*;
use ics20_primitives::Signer;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::msgs::transfer::MsgTransfer;
use ics20_transfer_types::{ForwardingInfo, Memo, RawCoin};

use crate::context::TokenTransferExecutionContext;
use crate::handler::send_transfer;

/// Sends the balances received by an inbound packet onward over the next
/// forwarding hop, by re-entering the send transition within the same atomic
/// unit as the receive that triggered it.
///
/// The carried memo is applied only to the final leg; intermediate legs are
/// sent without a memo and with the remaining hop list. Recursion is bounded
/// by the hop list, which shrinks by one on every leg.
pub fn forward_packet_tokens<Ctx: TokenTransferExecutionContext>(
    ctx: &mut Ctx,
    received_tokens: Vec<RawCoin>,
    forward_address: Signer,
    final_receiver: Signer,
    forwarding: &ForwardingInfo,
) -> Result<(Sequence, ModuleExtras), TokenTransferError> {
    let (next_hop, remaining_hops) =
        forwarding
            .hops
            .split_first()
            .ok_or_else(|| TokenTransferError::Other(
                "forwarding engine invoked without hops".to_string(),
            ))?;

    let (leg_memo, next_forwarding) = if remaining_hops.is_empty() {
        // Final hop: attach the carried memo and clear the hop list, so the
        // last receiving chain processes a plain terminal receive.
        (forwarding.memo.clone(), ForwardingInfo::empty())
    } else {
        (
            Memo::default(),
            ForwardingInfo::new(remaining_hops.to_vec(), forwarding.memo.clone()),
        )
    };

    let (timeout_height_on_b, timeout_timestamp_on_b) = ctx.forwarded_packet_timeout()?;

    let msg = MsgTransfer {
        port_id_on_a: next_hop.port_id.clone(),
        chan_id_on_a: next_hop.channel_id.clone(),
        tokens: received_tokens,
        sender: forward_address,
        receiver: final_receiver,
        memo: leg_memo,
        forwarding: next_forwarding,
        timeout_height_on_b,
        timeout_timestamp_on_b,
    };

    send_transfer(ctx, msg)
}
