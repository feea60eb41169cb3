//! Defines the token transfer error type
use core::convert::Infallible;

use displaydoc::Display;
use ics20_host_types::error::IdentifierError;
use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_host_types::StatusValue;
use ics20_primitives::prelude::*;
use uint::FromDecStrErr;

#[derive(Display, Debug)]
pub enum TokenTransferError {
    /// invalid identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// insufficient funds: tried to send `{send_attempt}`, sender only has `{available_funds}`
    InsufficientFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// channel not found for port_id `{port_id}` and channel_id `{channel_id}`
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// destination channel not found in the counterparty of port_id `{port_id}` and channel_id `{channel_id}`
    DestinationChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// module does not own the capability for port_id `{port_id}` and channel_id `{channel_id}`
    ChannelCapabilityNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// base denomination is empty
    EmptyBaseDenom,
    /// invalid port id in trace at position: `{pos}`, validation error: `{validation_error}`
    InvalidTracePortId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// invalid channel id in trace at position: `{pos}`, validation error: `{validation_error}`
    InvalidTraceChannelId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// malformed trace: `{0}`
    MalformedTrace(String),
    /// trace length must be even but got: `{len}`
    InvalidTraceLength { len: u64 },
    /// invalid denomination trace hash: `{hash}`
    InvalidTraceHash { hash: String },
    /// no denomination trace registered for hash `{hash}`
    TraceNotFound { hash: String },
    /// invalid amount error: `{0}`
    InvalidAmount(FromDecStrErr),
    /// invalid token
    InvalidToken,
    /// packet data must carry at least one token
    EmptyTokenList,
    /// signer address cannot be empty
    EmptySigner,
    /// incorrect memo specification: a transfer cannot carry both a memo and forwarding hops
    InvalidMemoSpecification,
    /// forwarding hop count `{hops}` exceeds the maximum of `{max}`
    TooManyHops { hops: u64, max: u64 },
    /// packet timeout height and packet timeout timestamp cannot both be unset
    MissingTimeout,
    /// failed to deserialize packet data
    PacketDataDeserialization,
    /// failed to deserialize acknowledgement
    AckDeserialization,
    /// receive is not enabled: `{reason}`
    ReceiveDisabled { reason: String },
    /// send is not enabled: `{reason}`
    SendDisabled { reason: String },
    /// failed to parse as AccountId
    ParseAccountFailure,
    /// account `{account}` is not allowed to receive funds
    UnauthorizedReceiver { account: String },
    /// unable to unescrow tokens, this may be caused by a malicious counterparty module or a bug: `{description}`
    FailedToUnescrow { description: String },
    /// total escrow for denom `{denom}` overflowed
    EscrowOverflow { denom: String },
    /// total escrow for denom `{denom}` would become negative, which indicates a malicious counterparty module or a bug
    EscrowUnderflow { denom: String },
    /// cannot deliver refunded coins to `{receiver}` after minting them, the module account state is corrupted: `{description}`
    FailedRefund {
        receiver: String,
        description: String,
    },
    /// invalid coin string: `{coin}`
    InvalidCoin { coin: String },
    /// other error: `{0}`
    Other(String),
}

#[cfg(feature = "std")]
impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::InvalidIdentifier(e)
            | Self::InvalidTracePortId {
                validation_error: e,
                ..
            }
            | Self::InvalidTraceChannelId {
                validation_error: e,
                ..
            } => Some(e),
            Self::InvalidAmount(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Infallible> for TokenTransferError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<IdentifierError> for TokenTransferError {
    fn from(err: IdentifierError) -> TokenTransferError {
        Self::InvalidIdentifier(err)
    }
}

impl From<TokenTransferError> for StatusValue {
    fn from(err: TokenTransferError) -> Self {
        StatusValue::new(err.to_string()).expect("error message must not be empty")
    }
}
