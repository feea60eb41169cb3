use derive_more::Display;

use crate::prelude::*;

/// Represents the account address of a transaction signer or a transfer
/// party, kept as an opaque bech32/hex string owned by the host chain.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, serde::Serialize, serde::Deserialize,
)]
pub struct Signer(String);

impl Signer {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn new_empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get this address as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Signer {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Signer {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Signer {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
