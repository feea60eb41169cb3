//! Packet lifecycle callbacks wired into the transport layer's router:
//! receive, acknowledgement, and timeout handling.

use ics20_host_types::{Acknowledgement, AcknowledgementStatus, ModuleExtras, Packet};
use ics20_primitives::prelude::*;
use ics20_primitives::Signer;
use ics20_transfer_types::ack_success_b64;
use ics20_transfer_types::error::TokenTransferError;
use ics20_transfer_types::events::{AckEvent, AckStatusEvent, RecvEvent, TimeoutEvent};
use ics20_transfer_types::packet::PacketData;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::handler::{
    process_recv_packet_execute, refund_packet_tokens_execute, refund_packet_tokens_validate,
};

/// Processes an inbound packet and produces the acknowledgement to be written
/// for it.
///
/// This callback is infallible towards the transport layer: any processing
/// failure is converted into an error acknowledgement, which the sender chain
/// uses to refund the transfer.
pub fn on_recv_packet_execute(
    ctx_b: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
) -> (ModuleExtras, Acknowledgement) {
    let Ok(data) = serde_json::from_slice::<PacketData>(&packet.data) else {
        let ack =
            AcknowledgementStatus::error(TokenTransferError::PacketDataDeserialization.into());
        return (ModuleExtras::empty(), ack.into());
    };

    let (mut extras, ack) = match process_recv_packet_execute(ctx_b, packet, data.clone()) {
        Ok(extras) => (extras, AcknowledgementStatus::success(ack_success_b64())),
        Err((extras, error)) => (extras, AcknowledgementStatus::error(error.into())),
    };

    for token in data.tokens {
        let recv_event = RecvEvent {
            sender: data.sender.clone(),
            receiver: data.receiver.clone(),
            denom: token.denom,
            amount: token.amount,
            memo: data.memo.clone(),
            success: ack.is_successful(),
        };
        extras.events.push(recv_event.into());
    }

    (extras, ack.into())
}

pub fn on_acknowledgement_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = serde_json::from_slice::<PacketData>(&packet.data)
        .map_err(|_| TokenTransferError::PacketDataDeserialization)?;

    let acknowledgement = serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
        .map_err(|_| TokenTransferError::AckDeserialization)?;

    if !acknowledgement.is_successful() {
        refund_packet_tokens_validate(ctx, packet, &data)?;
    }

    Ok(())
}

/// Responds to the success or failure of a packet acknowledgement written on
/// the receiving chain: a success acknowledgement is a no-op, a failure
/// acknowledgement refunds every token to the sender.
///
/// The acknowledgement contract is a closed two-variant choice; any other
/// payload shape fails deserialization, which indicates a broken or
/// malicious counterparty module.
pub fn on_acknowledgement_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let Ok(data) = serde_json::from_slice::<PacketData>(&packet.data) else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::PacketDataDeserialization),
        );
    };

    let Ok(acknowledgement) =
        serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
    else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::AckDeserialization),
        );
    };

    if !acknowledgement.is_successful() {
        if let Err(err) = refund_packet_tokens_execute(ctx, packet, &data) {
            return (ModuleExtras::empty(), Err(err));
        }
    }

    let extras = {
        let mut extras = ModuleExtras::empty();

        for token in data.tokens {
            let ack_event = AckEvent {
                sender: data.sender.clone(),
                receiver: data.receiver.clone(),
                denom: token.denom,
                amount: token.amount,
                memo: data.memo.clone(),
                acknowledgement: acknowledgement.clone(),
            };
            extras.events.push(ack_event.into());
        }

        extras.events.push(AckStatusEvent { acknowledgement }.into());

        extras
    };

    (extras, Ok(()))
}

pub fn on_timeout_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = serde_json::from_slice::<PacketData>(&packet.data)
        .map_err(|_| TokenTransferError::PacketDataDeserialization)?;

    refund_packet_tokens_validate(ctx, packet, &data)?;

    Ok(())
}

/// Refunds the sender of a packet that was never received: a timed-out
/// packet is defined as never having been processed by the destination.
pub fn on_timeout_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let Ok(data) = serde_json::from_slice::<PacketData>(&packet.data) else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::PacketDataDeserialization),
        );
    };

    if let Err(err) = refund_packet_tokens_execute(ctx, packet, &data) {
        return (ModuleExtras::empty(), Err(err));
    }

    let extras = {
        let mut extras = ModuleExtras::empty();

        for token in data.tokens {
            let timeout_event = TimeoutEvent {
                refund_receiver: data.sender.clone(),
                refund_denom: token.denom,
                refund_amount: token.amount,
                memo: data.memo.clone(),
            };
            extras.events.push(timeout_event.into());
        }

        extras
    };

    (extras, Ok(()))
}
