//! Contains the `PacketData` type that defines the structure of token transfers' packet bytes

use core::str::FromStr;

use ics20_primitives::prelude::*;
use ics20_primitives::Signer;

use super::error::TokenTransferError;
use super::{
    Amount, ForwardingInfo, Hop, Memo, PrefixedCoin, PrefixedDenom, TracePath, TracePrefix,
    MAX_HOPS,
};

/// Defines the structure of token transfers' packet bytes
///
/// The raw wire form keeps the base denomination and the trace hops of every
/// token as separate fields; the domain form folds them into a
/// [`PrefixedDenom`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPacketData", into = "RawPacketData")]
pub struct PacketData {
    pub tokens: Vec<PrefixedCoin>,
    pub sender: Signer,
    pub receiver: Signer,
    pub memo: Memo,
    pub forwarding: ForwardingInfo,
}

impl PacketData {
    /// Performs the basic validation applied to freshly decoded packet data.
    ///
    /// Parse-level errors are caught during raw conversion; this checks the
    /// semantic invariants: non-empty parties and token list, strictly
    /// positive amounts, the memo/forwarding mutual exclusion, and the hop
    /// count bound.
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        if self.sender.is_empty() || self.receiver.is_empty() {
            return Err(TokenTransferError::EmptySigner);
        }

        if self.tokens.is_empty() {
            return Err(TokenTransferError::EmptyTokenList);
        }

        for token in &self.tokens {
            if token.amount.is_zero() {
                return Err(TokenTransferError::InvalidToken);
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

        Ok(())
    }
}

/// The raw, string-typed wire shape of [`PacketData`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawPacketData {
    pub tokens: Vec<RawToken>,
    pub sender: String,
    pub receiver: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub forwarding: RawForwarding,
}

/// The raw wire shape of a single transferred token.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawToken {
    pub denom: String,
    pub amount: String,
    #[serde(default)]
    pub trace: Vec<String>,
}

/// The raw wire shape of [`ForwardingInfo`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RawForwarding {
    #[serde(default)]
    pub hops: Vec<RawHop>,
    #[serde(default)]
    pub memo: String,
}

/// The raw wire shape of a forwarding [`Hop`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawHop {
    pub port_id: String,
    pub channel_id: String,
}

impl TryFrom<RawToken> for PrefixedCoin {
    type Error = TokenTransferError;

    fn try_from(raw_token: RawToken) -> Result<Self, Self::Error> {
        let base_denom = raw_token.denom.parse()?;
        let trace_path = TracePath::new(
            raw_token
                .trace
                .iter()
                .map(|hop| TracePrefix::from_str(hop))
                .collect::<Result<Vec<_>, _>>()?,
        );
        let amount = Amount::from_str(&raw_token.amount)?;

        Ok(Self {
            denom: PrefixedDenom {
                trace_path,
                base_denom,
            },
            amount,
        })
    }
}

impl From<PrefixedCoin> for RawToken {
    fn from(coin: PrefixedCoin) -> Self {
        Self {
            denom: coin.denom.base_denom.to_string(),
            amount: coin.amount.to_string(),
            trace: coin
                .denom
                .trace_path
                .prefixes()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

impl TryFrom<RawHop> for Hop {
    type Error = TokenTransferError;

    fn try_from(raw_hop: RawHop) -> Result<Self, Self::Error> {
        Ok(Self::new(
            raw_hop.port_id.parse()?,
            raw_hop.channel_id.parse()?,
        ))
    }
}

impl From<Hop> for RawHop {
    fn from(hop: Hop) -> Self {
        Self {
            port_id: hop.port_id.to_string(),
            channel_id: hop.channel_id.to_string(),
        }
    }
}

impl TryFrom<RawForwarding> for ForwardingInfo {
    type Error = TokenTransferError;

    fn try_from(raw_forwarding: RawForwarding) -> Result<Self, Self::Error> {
        Ok(Self {
            hops: raw_forwarding
                .hops
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            memo: raw_forwarding.memo.into(),
        })
    }
}

impl From<ForwardingInfo> for RawForwarding {
    fn from(forwarding: ForwardingInfo) -> Self {
        Self {
            hops: forwarding.hops.into_iter().map(Into::into).collect(),
            memo: forwarding.memo.to_string(),
        }
    }
}

impl TryFrom<RawPacketData> for PacketData {
    type Error = TokenTransferError;

    fn try_from(raw_pkt_data: RawPacketData) -> Result<Self, Self::Error> {
        Ok(Self {
            tokens: raw_pkt_data
                .tokens
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            sender: raw_pkt_data.sender.into(),
            receiver: raw_pkt_data.receiver.into(),
            memo: raw_pkt_data.memo.into(),
            forwarding: raw_pkt_data.forwarding.try_into()?,
        })
    }
}

impl From<PacketData> for RawPacketData {
    fn from(pkt_data: PacketData) -> Self {
        Self {
            tokens: pkt_data.tokens.into_iter().map(Into::into).collect(),
            sender: pkt_data.sender.to_string(),
            receiver: pkt_data.receiver.to_string(),
            memo: pkt_data.memo.to_string(),
            forwarding: pkt_data.forwarding.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ics20_host_types::identifiers::ChannelId;

    use super::*;
    use crate::BaseCoin;

    impl PacketData {
        pub fn new_dummy() -> Self {
            let address: Signer = "cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng"
                .to_string()
                .into();

            Self {
                tokens: vec![BaseCoin {
                    denom: "uatom".parse().unwrap(),
                    amount: 10u64.into(),
                }
                .into()],
                sender: address.clone(),
                receiver: address,
                memo: "".into(),
                forwarding: ForwardingInfo::empty(),
            }
        }

        pub fn ser_json_assert_eq(&self, json: &str) {
            let ser = serde_json::to_string(&self).unwrap();
            assert_eq!(ser, json);
        }

        pub fn deser_json_assert_eq(&self, json: &str) {
            let deser: Self = serde_json::from_str(json).unwrap();
            assert_eq!(&deser, self);
        }
    }

    pub fn dummy_json_packet_data() -> &'static str {
        r#"{"tokens":[{"denom":"uatom","amount":"10","trace":[]}],"sender":"cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng","receiver":"cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng","memo":"","forwarding":{"hops":[],"memo":""}}"#
    }

    pub fn dummy_json_packet_data_without_optionals() -> &'static str {
        r#"{"tokens":[{"denom":"uatom","amount":"10"}],"sender":"cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng","receiver":"cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng"}"#
    }

    /// Ensures `PacketData` properly encodes to JSON by first converting to a
    /// `RawPacketData` and then serializing that.
    #[test]
    fn test_packet_data_ser() {
        PacketData::new_dummy().ser_json_assert_eq(dummy_json_packet_data());
    }

    /// Ensures `PacketData` properly decodes from JSON by first deserializing to a
    /// `RawPacketData` and then converting from that.
    #[test]
    fn test_packet_data_deser() {
        PacketData::new_dummy().deser_json_assert_eq(dummy_json_packet_data());
        PacketData::new_dummy().deser_json_assert_eq(dummy_json_packet_data_without_optionals());
    }

    #[test]
    fn test_traced_token_round_trip() {
        let json = r#"{"tokens":[{"denom":"uatom","amount":"7","trace":["transfer/channel-0","transfer/channel-1"]}],"sender":"a","receiver":"b","memo":"","forwarding":{"hops":[{"port_id":"transfer","channel_id":"channel-5"}],"memo":"drop off at the end"}}"#;

        let data: PacketData = serde_json::from_str(json).unwrap();

        assert_eq!(
            data.tokens[0].denom.to_string(),
            "transfer/channel-0/transfer/channel-1/uatom"
        );
        assert_eq!(data.forwarding.hops.len(), 1);
        assert_eq!(data.forwarding.memo.as_str(), "drop off at the end");

        assert_eq!(serde_json::to_string(&data).unwrap(), json);
    }

    #[test]
    fn test_malformed_token_trace_is_rejected() {
        let json = r#"{"tokens":[{"denom":"uatom","amount":"7","trace":["transfer"]}],"sender":"a","receiver":"b"}"#;

        assert!(serde_json::from_str::<PacketData>(json).is_err());
    }

    #[test]
    fn test_validate_basic() {
        let data = PacketData::new_dummy();
        assert!(data.validate_basic().is_ok());

        let mut no_tokens = PacketData::new_dummy();
        no_tokens.tokens = vec![];
        assert!(no_tokens.validate_basic().is_err());

        let mut zero_amount = PacketData::new_dummy();
        zero_amount.tokens[0].amount = Amount::zero();
        assert!(zero_amount.validate_basic().is_err());

        let mut empty_sender = PacketData::new_dummy();
        empty_sender.sender = Signer::new_empty();
        assert!(empty_sender.validate_basic().is_err());

        let mut memo_and_hops = PacketData::new_dummy();
        memo_and_hops.memo = "user memo".into();
        memo_and_hops.forwarding.hops = vec![Hop::new(
            "transfer".parse().unwrap(),
            "channel-1".parse().unwrap(),
        )];
        assert!(matches!(
            memo_and_hops.validate_basic(),
            Err(TokenTransferError::InvalidMemoSpecification)
        ));

        let mut too_many_hops = PacketData::new_dummy();
        too_many_hops.forwarding.hops = (0..=MAX_HOPS as u64)
            .map(|i| Hop::new("transfer".parse().unwrap(), ChannelId::new(i)))
            .collect();
        assert!(matches!(
            too_many_hops.validate_basic(),
            Err(TokenTransferError::TooManyHops { .. })
        ));
    }
}
