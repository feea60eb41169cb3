//! End-to-end exercises of the transfer handlers over an in-memory host
//! context, covering escrow/mint round trips, refunds, and multi-hop
//! forwarding across several mock chains.

use std::collections::{BTreeMap, BTreeSet};

use ics20_host_types::identifiers::{ChannelId, PortId, Sequence};
use ics20_host_types::{Acknowledgement, AcknowledgementStatus, Packet, TimeoutHeight};
use ics20_primitives::{Signer, Timestamp};
use ics20_transfer::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use ics20_transfer::handler::send_transfer;
use ics20_transfer::module::{
    on_acknowledgement_packet_execute, on_recv_packet_execute, on_timeout_packet_execute,
};
use ics20_transfer::types::error::TokenTransferError;
use ics20_transfer::types::msgs::transfer::MsgTransfer;
use ics20_transfer::types::{
    get_escrow_address, Amount, ForwardingInfo, Hop, Memo, PrefixedDenom, RawCoin, TraceHash,
};

/// A host account address, non-empty by construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Account(String);

impl TryFrom<Signer> for Account {
    type Error = ();

    fn try_from(signer: Signer) -> Result<Self, Self::Error> {
        if signer.is_empty() {
            Err(())
        } else {
            Ok(Account(signer.to_string()))
        }
    }
}

/// A packet handed to the mock transport by `send_packet`.
#[derive(Clone, Debug)]
struct SentPacket {
    sequence: Sequence,
    port_id_on_a: PortId,
    chan_id_on_a: ChannelId,
    timeout_height_on_b: TimeoutHeight,
    timeout_timestamp_on_b: Timestamp,
    data: Vec<u8>,
}

/// An in-memory single-chain host: bank balances, trace table, escrow
/// totals, channel topology, and captured outbound packets.
#[derive(Clone, Debug)]
struct MockChain {
    balances: BTreeMap<(String, String), Amount>,
    traces: BTreeMap<TraceHash, PrefixedDenom>,
    escrow_totals: BTreeMap<String, Amount>,
    denom_metadata: BTreeSet<String>,
    blocked_accounts: BTreeSet<String>,
    channels: BTreeMap<(PortId, ChannelId), (PortId, ChannelId)>,
    sent_packets: Vec<SentPacket>,
    next_sequence: u64,
    send_enabled: bool,
    receive_enabled: bool,
}

impl MockChain {
    fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
            traces: BTreeMap::new(),
            escrow_totals: BTreeMap::new(),
            denom_metadata: BTreeSet::new(),
            blocked_accounts: BTreeSet::new(),
            channels: BTreeMap::new(),
            sent_packets: Vec::new(),
            next_sequence: 1,
            send_enabled: true,
            receive_enabled: true,
        }
    }

    fn add_channel(&mut self, local: ChannelId, remote: ChannelId) {
        self.channels.insert(
            (PortId::transfer(), local),
            (PortId::transfer(), remote),
        );
    }

    fn credit(&mut self, account: &str, denom: &str, amount: u64) {
        let entry = self
            .balances
            .entry((account.to_string(), denom.to_string()))
            .or_insert_with(Amount::zero);
        *entry = entry.checked_add(amount.into()).unwrap();
    }

    fn balance_of(&self, account: &str, denom: &str) -> Amount {
        self.balances
            .get(&(account.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    fn escrow_total_of(&self, denom: &str) -> Amount {
        self.escrow_totals
            .get(denom)
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    fn last_sent_packet(&self) -> &SentPacket {
        self.sent_packets.last().expect("no packet was sent")
    }
}

impl TokenTransferValidationContext for MockChain {
    type AccountId = Account;

    fn get_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(PortId::transfer())
    }

    fn can_send_coins(&self) -> Result<(), TokenTransferError> {
        if self.send_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::SendDisabled {
                reason: "transfers are disabled by governance".to_string(),
            })
        }
    }

    fn can_receive_coins(&self) -> Result<(), TokenTransferError> {
        if self.receive_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::ReceiveDisabled {
                reason: "transfers are disabled by governance".to_string(),
            })
        }
    }

    fn channel_counterparty(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(PortId, ChannelId), TokenTransferError> {
        self.channels
            .get(&(port_id.clone(), channel_id.clone()))
            .cloned()
            .ok_or_else(|| TokenTransferError::ChannelNotFound {
                port_id: port_id.clone(),
                channel_id: channel_id.clone(),
            })
    }

    fn check_channel_capability(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn forwarded_packet_timeout(
        &self,
    ) -> Result<(TimeoutHeight, Timestamp), TokenTransferError> {
        Ok((
            TimeoutHeight::Never,
            Timestamp::from_nanoseconds(2_000_000_000_000_000_000),
        ))
    }

    fn is_blocked_account(&self, account: &Self::AccountId) -> bool {
        self.blocked_accounts.contains(&account.0)
    }

    fn has_denom_metadata(&self, denom: &str) -> bool {
        self.denom_metadata.contains(denom)
    }

    fn denom_trace(&self, hash: &TraceHash) -> Option<PrefixedDenom> {
        self.traces.get(hash).cloned()
    }

    fn has_denom_trace(&self, hash: &TraceHash) -> bool {
        self.traces.contains_key(hash)
    }

    fn total_escrow(&self, denom: &str) -> Amount {
        self.escrow_total_of(denom)
    }
}

impl TokenTransferExecutionContext for MockChain {
    fn send_coins(
        &mut self,
        from_account: &Account,
        to_account: &Account,
        coin: &ics20_transfer::types::PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        let denom = coin.denom.hashed_denom();

        let available = self.balance_of(&from_account.0, &denom);
        let remaining = available.checked_sub(coin.amount).ok_or_else(|| {
            TokenTransferError::InsufficientFunds {
                send_attempt: coin.to_string(),
                available_funds: format!("{available}{denom}"),
            }
        })?;

        self.balances
            .insert((from_account.0.clone(), denom.clone()), remaining);
        let entry = self
            .balances
            .entry((to_account.0.clone(), denom))
            .or_insert_with(Amount::zero);
        *entry = entry.checked_add(coin.amount).unwrap();

        Ok(())
    }

    fn mint_coins(
        &mut self,
        account: &Account,
        coin: &ics20_transfer::types::PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        let denom = coin.denom.hashed_denom();
        let entry = self
            .balances
            .entry((account.0.clone(), denom))
            .or_insert_with(Amount::zero);
        *entry = entry.checked_add(coin.amount).unwrap();

        Ok(())
    }

    fn burn_coins(
        &mut self,
        account: &Account,
        coin: &ics20_transfer::types::PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        let denom = coin.denom.hashed_denom();

        let available = self.balance_of(&account.0, &denom);
        let remaining = available.checked_sub(coin.amount).ok_or_else(|| {
            TokenTransferError::InsufficientFunds {
                send_attempt: coin.to_string(),
                available_funds: format!("{available}{denom}"),
            }
        })?;
        self.balances
            .insert((account.0.clone(), denom), remaining);

        Ok(())
    }

    fn set_denom_metadata(&mut self, trace: &PrefixedDenom) -> Result<(), TokenTransferError> {
        self.denom_metadata.insert(trace.hashed_denom());
        Ok(())
    }

    fn set_denom_trace(&mut self, trace: &PrefixedDenom) -> Result<(), TokenTransferError> {
        self.traces.insert(trace.trace_hash(), trace.clone());
        Ok(())
    }

    fn set_total_escrow(
        &mut self,
        denom: String,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.escrow_totals.insert(denom, amount);
        Ok(())
    }

    fn send_packet(
        &mut self,
        port_id_on_a: &PortId,
        chan_id_on_a: &ChannelId,
        timeout_height_on_b: &TimeoutHeight,
        timeout_timestamp_on_b: &Timestamp,
        data: Vec<u8>,
    ) -> Result<Sequence, TokenTransferError> {
        let sequence = Sequence::from(self.next_sequence);
        self.next_sequence += 1;

        self.sent_packets.push(SentPacket {
            sequence,
            port_id_on_a: port_id_on_a.clone(),
            chan_id_on_a: chan_id_on_a.clone(),
            timeout_height_on_b: *timeout_height_on_b,
            timeout_timestamp_on_b: *timeout_timestamp_on_b,
            data,
        });

        Ok(sequence)
    }
}

fn transfer_msg(channel: ChannelId, coins: &[&str], sender: &str, receiver: &str) -> MsgTransfer {
    MsgTransfer {
        port_id_on_a: PortId::transfer(),
        chan_id_on_a: channel,
        tokens: coins
            .iter()
            .map(|coin| coin.parse::<RawCoin>().unwrap())
            .collect(),
        sender: sender.into(),
        receiver: receiver.into(),
        memo: Memo::default(),
        forwarding: ForwardingInfo::empty(),
        timeout_height_on_b: TimeoutHeight::Never,
        timeout_timestamp_on_b: Timestamp::from_nanoseconds(1_900_000_000_000_000_000),
    }
}

/// Reconstructs the transport packet for the latest packet sent by a chain,
/// destined to the given counterparty channel end.
fn delivered_packet(sender_chain: &MockChain, port_id_on_b: PortId, chan_id_on_b: ChannelId) -> Packet {
    let sent = sender_chain.last_sent_packet();

    Packet {
        seq_on_a: sent.sequence,
        port_id_on_a: sent.port_id_on_a.clone(),
        chan_id_on_a: sent.chan_id_on_a.clone(),
        port_id_on_b,
        chan_id_on_b,
        data: sent.data.clone(),
        timeout_height_on_b: sent.timeout_height_on_b,
        timeout_timestamp_on_b: sent.timeout_timestamp_on_b,
    }
}

fn ack_is_success(ack: &Acknowledgement) -> bool {
    serde_json::from_slice::<AcknowledgementStatus>(ack.as_ref())
        .expect("ack must deserialize")
        .is_successful()
}

const ALICE: &str = "cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng";
const BOB: &str = "cosmos1snd5m4h0wt5ur55d47vpxla389r2xkf8dl6g9w";
const RELAYER: &str = "cosmos1c9ps4jz3wd4kwjptxyshh5t4w67ty7pc83m7xd";

// Voucher denomination of "uatom" once it has crossed into B over
// transfer/channel-1: ibc/sha256("transfer/channel-1/uatom").
const UATOM_ON_B: &str = "ibc/C4CFF46FD6DE35CA4CF4CE031E643C8FDC9BA4B99AE598E9B0ED98FE3A2319F9";

/// Sets up two chains connected over transfer/channel-0 (A side) and
/// transfer/channel-1 (B side).
fn two_chains() -> (MockChain, MockChain) {
    let mut chain_a = MockChain::new();
    let mut chain_b = MockChain::new();
    chain_a.add_channel(ChannelId::new(0), ChannelId::new(1));
    chain_b.add_channel(ChannelId::new(1), ChannelId::new(0));

    (chain_a, chain_b)
}

#[test]
fn send_escrows_and_receive_mints_voucher() {
    let (mut chain_a, mut chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    let (sequence, _extras) = send_transfer(&mut chain_a, msg).unwrap();

    assert_eq!(sequence, Sequence::from(1));
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), Amount::zero());
    assert_eq!(chain_a.escrow_total_of("uatom"), 1000u64.into());

    let escrow_address =
        get_escrow_address(&PortId::transfer(), &ChannelId::new(0)).to_string();
    assert_eq!(chain_a.balance_of(&escrow_address, "uatom"), 1000u64.into());

    // Deliver to B, which mints the `ibc/{hash}` voucher to the receiver.
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (extras, ack) = on_recv_packet_execute(&mut chain_b, &packet);

    assert!(ack_is_success(&ack));
    assert_eq!(chain_b.balance_of(BOB, UATOM_ON_B), 1000u64.into());

    // The trace was learned idempotently and announced in an event.
    let expected_trace: PrefixedDenom = "transfer/channel-1/uatom".parse().unwrap();
    assert!(chain_b.has_denom_trace(&expected_trace.trace_hash()));
    assert!(chain_b.has_denom_metadata(UATOM_ON_B));
    assert!(extras
        .events
        .iter()
        .any(|ev| ev.kind == "denomination_trace"));

    // Receiving the same denomination again must not re-register the trace.
    let (extras, ack) = {
        chain_a.credit(ALICE, "uatom", 5);
        let msg = transfer_msg(ChannelId::new(0), &["5uatom"], ALICE, BOB);
        send_transfer(&mut chain_a, msg).unwrap();
        let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
        on_recv_packet_execute(&mut chain_b, &packet)
    };
    assert!(ack_is_success(&ack));
    assert!(!extras
        .events
        .iter()
        .any(|ev| ev.kind == "denomination_trace"));
}

#[test]
fn voucher_returns_home_through_burn_and_unescrow() {
    let (mut chain_a, mut chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    send_transfer(&mut chain_a, msg).unwrap();
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (_, ack) = on_recv_packet_execute(&mut chain_b, &packet);
    assert!(ack_is_success(&ack));

    // B sends the voucher back: B is the sink, so the voucher is burnt.
    let msg = transfer_msg(
        ChannelId::new(1),
        &[&format!("1000{UATOM_ON_B}")],
        BOB,
        ALICE,
    );
    send_transfer(&mut chain_b, msg).unwrap();
    assert_eq!(chain_b.balance_of(BOB, UATOM_ON_B), Amount::zero());

    // A detects the returning token and unescrows the original uatom.
    let packet = delivered_packet(&chain_b, PortId::transfer(), ChannelId::new(0));
    let (_, ack) = on_recv_packet_execute(&mut chain_a, &packet);

    assert!(ack_is_success(&ack));
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), 1000u64.into());
    assert_eq!(chain_a.escrow_total_of("uatom"), Amount::zero());
}

#[test]
fn timeout_refunds_the_sender() {
    let (mut chain_a, _chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    send_transfer(&mut chain_a, msg).unwrap();
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), Amount::zero());

    // The packet never reaches B; the timeout refunds the escrow.
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (extras, result) = on_timeout_packet_execute(&mut chain_a, &packet, &RELAYER.into());

    result.unwrap();
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), 1000u64.into());
    assert_eq!(chain_a.escrow_total_of("uatom"), Amount::zero());
    assert!(extras.events.iter().any(|ev| ev.kind == "timeout"));
}

#[test]
fn failure_acknowledgement_refunds_the_sender() {
    let (mut chain_a, _chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    send_transfer(&mut chain_a, msg).unwrap();

    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));

    // A success acknowledgement leaves the escrow untouched.
    let success_ack: Acknowledgement =
        AcknowledgementStatus::success(ics20_transfer::types::ack_success_b64()).into();
    let (_, result) =
        on_acknowledgement_packet_execute(&mut chain_a, &packet, &success_ack, &RELAYER.into());
    result.unwrap();
    assert_eq!(chain_a.escrow_total_of("uatom"), 1000u64.into());
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), Amount::zero());

    // A failure acknowledgement refunds the escrowed coins.
    let error_ack: Acknowledgement = AcknowledgementStatus::error(
        TokenTransferError::ReceiveDisabled {
            reason: "disabled".to_string(),
        }
        .into(),
    )
    .into();
    let (_, result) =
        on_acknowledgement_packet_execute(&mut chain_a, &packet, &error_ack, &RELAYER.into());
    result.unwrap();
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), 1000u64.into());
    assert_eq!(chain_a.escrow_total_of("uatom"), Amount::zero());

    // Any other acknowledgement shape is a broken counterparty.
    let junk_ack: Acknowledgement = br#"{"outcome":"ok"}"#.to_vec().try_into().unwrap();
    let (_, result) =
        on_acknowledgement_packet_execute(&mut chain_a, &packet, &junk_ack, &RELAYER.into());
    assert!(matches!(result, Err(TokenTransferError::AckDeserialization)));
}

#[test]
fn memo_and_forwarding_hops_are_mutually_exclusive() {
    let (mut chain_a, _chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let mut msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    msg.memo = "user memo".into();
    msg.forwarding = ForwardingInfo::new(
        vec![Hop::new(PortId::transfer(), ChannelId::new(2))],
        Memo::default(),
    );

    let err = send_transfer(&mut chain_a, msg).unwrap_err();
    assert!(matches!(err, TokenTransferError::InvalidMemoSpecification));

    // The rejected send produced no side effects.
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), 1000u64.into());
    assert_eq!(chain_a.escrow_total_of("uatom"), Amount::zero());
    assert!(chain_a.sent_packets.is_empty());
}

#[test]
fn send_rejects_unknown_voucher_reference() {
    let (mut chain_a, _chain_b) = two_chains();
    let unknown =
        "ibc/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string();
    chain_a.credit(ALICE, &unknown, 10);

    let msg = transfer_msg(ChannelId::new(0), &[&format!("10{unknown}")], ALICE, BOB);
    let err = send_transfer(&mut chain_a, msg).unwrap_err();
    assert!(matches!(err, TokenTransferError::TraceNotFound { .. }));

    let msg = transfer_msg(ChannelId::new(0), &["10ibc/nothex"], ALICE, BOB);
    let err = send_transfer(&mut chain_a, msg).unwrap_err();
    assert!(matches!(err, TokenTransferError::InvalidTraceHash { .. }));
}

#[test]
fn disabled_transfers_are_rejected() {
    let (mut chain_a, mut chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    chain_a.send_enabled = false;
    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    let err = send_transfer(&mut chain_a, msg).unwrap_err();
    assert!(matches!(err, TokenTransferError::SendDisabled { .. }));

    chain_a.send_enabled = true;
    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    send_transfer(&mut chain_a, msg).unwrap();

    chain_b.receive_enabled = false;
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (_, ack) = on_recv_packet_execute(&mut chain_b, &packet);
    assert!(!ack_is_success(&ack));
    assert_eq!(chain_b.balance_of(BOB, UATOM_ON_B), Amount::zero());
}

#[test]
fn blocked_receiver_cannot_unescrow() {
    let (mut chain_a, mut chain_b) = two_chains();
    chain_a.credit(ALICE, "uatom", 1000);

    let msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    send_transfer(&mut chain_a, msg).unwrap();
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (_, ack) = on_recv_packet_execute(&mut chain_b, &packet);
    assert!(ack_is_success(&ack));

    let msg = transfer_msg(
        ChannelId::new(1),
        &[&format!("1000{UATOM_ON_B}")],
        BOB,
        ALICE,
    );
    send_transfer(&mut chain_b, msg).unwrap();

    // The returning transfer must not reach a blocked account.
    chain_a.blocked_accounts.insert(ALICE.to_string());
    let packet = delivered_packet(&chain_b, PortId::transfer(), ChannelId::new(0));
    let (_, ack) = on_recv_packet_execute(&mut chain_a, &packet);

    assert!(!ack_is_success(&ack));
    assert_eq!(chain_a.balance_of(ALICE, "uatom"), Amount::zero());
}

#[test]
fn escrow_total_cannot_go_negative() {
    let (mut chain_a, _) = two_chains();

    // A malicious counterparty claims a return of tokens that were never
    // escrowed: the escrow account cannot cover the transfer.
    let data = serde_json::json!({
        "tokens": [{"denom": "uatom", "amount": "500", "trace": ["transfer/channel-1"]}],
        "sender": BOB,
        "receiver": ALICE,
    });
    let packet = Packet {
        seq_on_a: Sequence::from(1),
        port_id_on_a: PortId::transfer(),
        chan_id_on_a: ChannelId::new(1),
        port_id_on_b: PortId::transfer(),
        chan_id_on_b: ChannelId::new(0),
        data: serde_json::to_vec(&data).unwrap(),
        timeout_height_on_b: TimeoutHeight::Never,
        timeout_timestamp_on_b: Timestamp::none(),
    };

    let (_, ack) = on_recv_packet_execute(&mut chain_a, &packet);
    assert!(!ack_is_success(&ack));

    // Even with a (wrongly) funded escrow account, the tracked total refuses
    // to drop below zero.
    let escrow_address =
        get_escrow_address(&PortId::transfer(), &ChannelId::new(0)).to_string();
    chain_a.credit(&escrow_address, "uatom", 500);

    let (_, ack) = on_recv_packet_execute(&mut chain_a, &packet);
    assert!(!ack_is_success(&ack));
    let status: AcknowledgementStatus = serde_json::from_slice(ack.as_ref()).unwrap();
    assert!(status.to_string().contains("negative"));
}

/// Three-hop forward A -> B -> C -> D: B and C forward mechanically, the
/// memo only surfaces on the final leg, and D performs a plain terminal
/// receive for the final receiver.
#[test]
fn multi_hop_forwarding_delivers_to_final_receiver() {
    let mut chain_a = MockChain::new();
    let mut chain_b = MockChain::new();
    let mut chain_c = MockChain::new();
    let mut chain_d = MockChain::new();

    // A(channel-0) <-> B(channel-1), B(channel-2) <-> C(channel-3),
    // C(channel-4) <-> D(channel-5)
    chain_a.add_channel(ChannelId::new(0), ChannelId::new(1));
    chain_b.add_channel(ChannelId::new(1), ChannelId::new(0));
    chain_b.add_channel(ChannelId::new(2), ChannelId::new(3));
    chain_c.add_channel(ChannelId::new(3), ChannelId::new(2));
    chain_c.add_channel(ChannelId::new(4), ChannelId::new(5));
    chain_d.add_channel(ChannelId::new(5), ChannelId::new(4));

    chain_a.credit(ALICE, "uatom", 1000);

    let mut msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    msg.forwarding = ForwardingInfo::new(
        vec![
            Hop::new(PortId::transfer(), ChannelId::new(2)),
            Hop::new(PortId::transfer(), ChannelId::new(4)),
        ],
        "deliver to the last chain".into(),
    );
    send_transfer(&mut chain_a, msg).unwrap();
    assert_eq!(chain_a.escrow_total_of("uatom"), 1000u64.into());

    // B receives, mints to its forwarding intermediary, and forwards with
    // one hop left and no memo on this intermediate leg.
    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (_, ack) = on_recv_packet_execute(&mut chain_b, &packet);
    assert!(ack_is_success(&ack));

    let leg_b = serde_json::from_slice::<serde_json::Value>(&chain_b.last_sent_packet().data)
        .unwrap();
    assert_eq!(leg_b["memo"], "");
    assert_eq!(leg_b["forwarding"]["hops"].as_array().unwrap().len(), 1);
    assert_eq!(leg_b["forwarding"]["memo"], "deliver to the last chain");
    assert_eq!(leg_b["receiver"], BOB);

    // C receives and forwards the final leg, attaching the carried memo and
    // clearing the hop list.
    let packet = delivered_packet(&chain_b, PortId::transfer(), ChannelId::new(3));
    let (_, ack) = on_recv_packet_execute(&mut chain_c, &packet);
    assert!(ack_is_success(&ack));

    let leg_c = serde_json::from_slice::<serde_json::Value>(&chain_c.last_sent_packet().data)
        .unwrap();
    assert_eq!(leg_c["memo"], "deliver to the last chain");
    assert!(leg_c["forwarding"]["hops"].as_array().unwrap().is_empty());

    // D performs a plain terminal receive to the final receiver, with the
    // full three-hop trace on the voucher.
    let packet = delivered_packet(&chain_c, PortId::transfer(), ChannelId::new(5));
    let (_, ack) = on_recv_packet_execute(&mut chain_d, &packet);
    assert!(ack_is_success(&ack));

    let trace_on_d: PrefixedDenom =
        "transfer/channel-5/transfer/channel-3/transfer/channel-1/uatom"
            .parse()
            .unwrap();
    assert_eq!(
        chain_d.balance_of(BOB, &trace_on_d.hashed_denom()),
        1000u64.into()
    );

    // Each intermediate chain escrowed the voucher it forwarded onward.
    let voucher_on_b: PrefixedDenom = "transfer/channel-1/uatom".parse().unwrap();
    assert_eq!(
        chain_b.escrow_total_of(&voucher_on_b.hashed_denom()),
        1000u64.into()
    );
    let voucher_on_c: PrefixedDenom =
        "transfer/channel-3/transfer/channel-1/uatom".parse().unwrap();
    assert_eq!(
        chain_c.escrow_total_of(&voucher_on_c.hashed_denom()),
        1000u64.into()
    );
}

/// A failing forward aborts the whole inbound receive with an error
/// acknowledgement for the original packet.
#[test]
fn failed_forward_fails_the_inbound_receive() {
    let mut chain_a = MockChain::new();
    let mut chain_b = MockChain::new();
    chain_a.add_channel(ChannelId::new(0), ChannelId::new(1));
    chain_b.add_channel(ChannelId::new(1), ChannelId::new(0));

    chain_a.credit(ALICE, "uatom", 1000);

    // The forwarding hop names a channel that does not exist on B.
    let mut msg = transfer_msg(ChannelId::new(0), &["1000uatom"], ALICE, BOB);
    msg.forwarding = ForwardingInfo::new(
        vec![Hop::new(PortId::transfer(), ChannelId::new(9))],
        Memo::default(),
    );
    send_transfer(&mut chain_a, msg).unwrap();

    let packet = delivered_packet(&chain_a, PortId::transfer(), ChannelId::new(1));
    let (_, ack) = on_recv_packet_execute(&mut chain_b, &packet);

    assert!(!ack_is_success(&ack));
    assert!(chain_b.sent_packets.is_empty());
}
