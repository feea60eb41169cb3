//! Defines types to represent "denominations" [as defined in ICS-20](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md#data-structures)
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::{Display, From};
use ics20_host_types::identifiers::{ChannelId, PortId};
use ics20_primitives::prelude::*;
use ics20_primitives::serializers;
use sha2::{Digest, Sha256};

use super::error::TokenTransferError;

/// The prefix that marks a hashed voucher denomination, as in `ibc/{hash}`.
pub const DENOM_PREFIX: &str = "ibc";

/// The "base" of a denomination.
///
/// For example, given the token `my_port-1/my_channel-1/my_port-2/my_channel-2/base_denom`,
/// `base_denom` is the "base" of the denomination
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct BaseDenom(String);

impl BaseDenom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err(TokenTransferError::EmptyBaseDenom)
        } else {
            Ok(BaseDenom(s.to_owned()))
        }
    }
}

/// One hop in a token's trace, which consists of the port and channel IDs of the sender
///
/// For example, given the token `my_port-1/my_channel-1/my_port-2/my_channel-2/base_denom`,
/// `my_port-1/my_channel-1` is a trace prefix, and `my_port-2/my_channel-2` is another one.
/// See [TracePath] which stitches trace prefixes together.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TracePrefix {
    port_id: PortId,
    channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

impl FromStr for TracePrefix {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (port_id_s, channel_id_s) = s
            .split_once('/')
            .ok_or_else(|| TokenTransferError::MalformedTrace(s.to_string()))?;

        let port_id = PortId::from_str(port_id_s)?;
        let channel_id = ChannelId::from_str(channel_id_s)?;

        Ok(Self::new(port_id, channel_id))
    }
}

/// A full trace path modelled as a collection of `TracePrefix`s.
// Internally, the `TracePath` is modelled as a `Vec<TracePrefix>` but with the order reversed, i.e.
// "transfer/channel-0/transfer/channel-1/uatom" => `["transfer/channel-1", "transfer/channel-0"]`
// This is done for ease of addition/removal of prefixes.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, From, serde::Serialize, serde::Deserialize)]
pub struct TracePath(Vec<TracePrefix>);

impl TracePath {
    /// Creates a new trace path from a vector of trace prefixes.
    /// Reverse the order of the prefixes for easier addition/removal from the end.
    pub fn new(mut trace: Vec<TracePrefix>) -> Self {
        trace.reverse();
        Self(trace)
    }

    /// Returns true iff this path starts with the specified prefix
    pub fn starts_with(&self, prefix: &TracePrefix) -> bool {
        self.0.last().map(|p| p == prefix).unwrap_or(false)
    }

    /// Removes the specified prefix from the path if there is a match, otherwise does nothing.
    pub fn remove_prefix(&mut self, prefix: &TracePrefix) {
        if self.starts_with(prefix) {
            self.0.pop();
        }
    }

    /// Adds the specified prefix to the path.
    pub fn add_prefix(&mut self, prefix: TracePrefix) {
        self.0.push(prefix)
    }

    /// Returns true if the path is empty and false otherwise.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return empty trace path
    pub fn empty() -> Self {
        Self(vec![])
    }

    /// Returns the trace prefixes in canonical order, i.e. as they appear in
    /// the full denomination path string.
    pub fn prefixes(&self) -> impl Iterator<Item = &TracePrefix> {
        self.0.iter().rev()
    }
}

impl<'a> TryFrom<Vec<&'a str>> for TracePath {
    type Error = TokenTransferError;

    fn try_from(v: Vec<&'a str>) -> Result<Self, Self::Error> {
        if v.len() % 2 != 0 {
            return Err(TokenTransferError::InvalidTraceLength {
                len: v.len() as u64,
            });
        }

        let mut trace = vec![];
        let id_pairs = v.chunks_exact(2).map(|paths| (paths[0], paths[1]));
        for (pos, (port_id, channel_id)) in id_pairs.rev().enumerate() {
            let port_id =
                PortId::from_str(port_id).map_err(|e| TokenTransferError::InvalidTracePortId {
                    pos: pos as u64,
                    validation_error: e,
                })?;
            let channel_id = ChannelId::from_str(channel_id).map_err(|e| {
                TokenTransferError::InvalidTraceChannelId {
                    pos: pos as u64,
                    validation_error: e,
                }
            })?;
            trace.push(TracePrefix {
                port_id,
                channel_id,
            });
        }

        Ok(trace.into())
    }
}

impl FromStr for TracePath {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() == 1 && parts[0].trim().is_empty() {
                vec![]
            } else {
                parts
            }
        };
        parts.try_into()
    }
}

impl Display for TracePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        let path = self
            .0
            .iter()
            .rev()
            .map(|prefix| prefix.to_string())
            .collect::<Vec<String>>()
            .join("/");
        write!(f, "{path}")
    }
}

/// The SHA-256 hash of a canonical denomination path, used as the compact
/// lookup key of the trace table and as the voucher denomination suffix.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, From)]
pub struct TraceHash([u8; 32]);

impl TraceHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for TraceHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for TraceHash {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| TokenTransferError::InvalidTraceHash {
            hash: s.to_string(),
        })?;
        let hash = <[u8; 32]>::try_from(bytes).map_err(|_| TokenTransferError::InvalidTraceHash {
            hash: s.to_string(),
        })?;
        Ok(Self(hash))
    }
}

/// A type that contains the base denomination for ICS20 and the source tracing information path.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PrefixedDenom {
    /// A series of `{port-id}/{channel-id}`s for tracing the source of the token.
    #[serde(with = "serializers")]
    pub trace_path: TracePath,
    /// Base denomination of the relayed fungible token.
    pub base_denom: BaseDenom,
}

impl PrefixedDenom {
    /// Removes the specified prefix from the trace path if there is a match, otherwise does nothing.
    pub fn remove_trace_prefix(&mut self, prefix: &TracePrefix) {
        self.trace_path.remove_prefix(prefix)
    }

    /// Adds the specified prefix to the trace path.
    pub fn add_trace_prefix(&mut self, prefix: TracePrefix) {
        self.trace_path.add_prefix(prefix)
    }

    /// Returns true if the denomination is native to this chain, i.e. it
    /// carries no trace path.
    pub fn is_native(&self) -> bool {
        self.trace_path.is_empty()
    }

    /// Computes the SHA-256 hash of the canonical denomination path.
    ///
    /// The hash is a pure function of the canonical string form; equal paths
    /// always map to equal hashes.
    pub fn trace_hash(&self) -> TraceHash {
        let hash = Sha256::digest(self.to_string().as_bytes());
        TraceHash(hash.into())
    }

    /// Returns the denomination under which this token lives on the local
    /// chain: the base denomination when native, the hashed
    /// `ibc/{trace_hash}` voucher denomination otherwise.
    pub fn hashed_denom(&self) -> String {
        if self.is_native() {
            self.base_denom.to_string()
        } else {
            format!("{}/{}", DENOM_PREFIX, self.trace_hash())
        }
    }
}

/// Returns true if the denomination originally came from the sender chain and
/// false otherwise.
///
/// Note: It is better to think of the "source" chain as the chain that
/// escrows/unescrows the token, while the other chain mints/burns the tokens,
/// respectively. A chain being the "source" of a token does NOT mean it is the
/// original creator of the token (e.g. "uatom"), as "source" might suggest.
///
/// This means that in any given transfer, a chain can very well be the source
/// of a token of which it is not the creator. For example, let
///
/// A: sender chain in this transfer, port "transfer" and channel "c2b" (to B)
/// B: receiver chain in this transfer, port "transfer" and channel "c2a" (to A)
/// token denom: "transfer/someOtherChannel/someDenom"
///
/// A, initiator of the transfer, needs to figure out if it should escrow the
/// tokens, or burn them. If B had originally sent the token to A in a previous
/// transfer, then A would have stored the token as "transfer/c2b/someDenom".
/// Now, A is sending to B, so to check if B is the source of the token, we need
/// to check if the token starts with "transfer/c2b". In this example, it
/// doesn't, so the token doesn't originate from B. A is considered the source,
/// even though it is not the creator of the token. Specifically, the token was
/// created by the chain at the other end of A's port "transfer" and channel
/// "someOtherChannel".
pub fn is_sender_chain_source(
    source_port: PortId,
    source_channel: ChannelId,
    denom: &PrefixedDenom,
) -> bool {
    !is_receiver_chain_source(source_port, source_channel, denom)
}

/// Returns true if the denomination originally came from the receiving chain and false otherwise.
pub fn is_receiver_chain_source(
    source_port: PortId,
    source_channel: ChannelId,
    denom: &PrefixedDenom,
) -> bool {
    // For example, let
    // A: sender chain in this transfer, port "transfer" and channel "c2b" (to B)
    // B: receiver chain in this transfer, port "transfer" and channel "c2a" (to A)
    //
    // If B had originally sent the token in a previous transfer, then A would have stored the token as
    // "transfer/c2b/{token_denom}". Now, A is sending to B, so to check if B is the source of the token,
    // we need to check if the token starts with "transfer/c2b".
    let prefix = TracePrefix::new(source_port, source_channel);
    denom.trace_path.starts_with(&prefix)
}

impl FromStr for PrefixedDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut trace_prefixes = vec![];

        let mut remaining_parts = s;

        loop {
            let parsed_prefix = remaining_parts
                .split_once('/')
                .and_then(|(port_id_s, remaining)| {
                    remaining
                        .split_once('/')
                        .map(|(channel_id_s, remaining)| (port_id_s, channel_id_s, remaining))
                })
                .and_then(|(port_id_s, channel_id_s, remaining)| {
                    let port_id = PortId::from_str(port_id_s).ok()?;
                    let channel_id = ChannelId::from_str(channel_id_s).ok()?;
                    Some((port_id, channel_id, remaining))
                });
            match parsed_prefix {
                Some((port_id, channel_id, remaining)) => {
                    trace_prefixes.push(TracePrefix::new(port_id, channel_id));
                    remaining_parts = remaining;
                }
                None => break,
            }
        }

        let trace_path = TracePath::new(trace_prefixes);
        let base_denom = BaseDenom::from_str(remaining_parts)?;

        Ok(Self {
            trace_path,
            base_denom,
        })
    }
}

impl From<BaseDenom> for PrefixedDenom {
    fn from(denom: BaseDenom) -> Self {
        Self {
            trace_path: TracePath::empty(),
            base_denom: denom,
        }
    }
}

impl Display for PrefixedDenom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if self.trace_path.0.is_empty() {
            write!(f, "{}", self.base_denom)
        } else {
            write!(f, "{}/{}", self.trace_path, self.base_denom)
        }
    }
}
