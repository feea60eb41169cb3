//! Defines coin types; the backbone of transferred assets.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ics20_primitives::prelude::*;

use super::amount::Amount;
use super::denom::{BaseDenom, PrefixedDenom};
use super::error::TokenTransferError;

/// A `Coin` type with fully qualified `PrefixedDenom`.
pub type PrefixedCoin = Coin<PrefixedDenom>;

/// A `Coin` type with an unprefixed denomination.
pub type BaseCoin = Coin<BaseDenom>;

/// A `Coin` type whose denomination is kept as the opaque string supplied by
/// the sender, which may be a base denomination or an `ibc/{hash}` voucher
/// reference.
pub type RawCoin = Coin<String>;

/// Coin defines a token with a denomination and an amount.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Coin<D> {
    /// Denomination
    pub denom: D,
    /// Amount
    pub amount: Amount,
}

impl<D: FromStr> FromStr for Coin<D>
where
    D::Err: Into<TokenTransferError>,
{
    type Err = TokenTransferError;

    /// Parses a coin string of the form `{amount}{denom}`, e.g. `100uatom`.
    fn from_str(coin_str: &str) -> Result<Self, Self::Err> {
        let denom_index = coin_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .ok_or_else(|| TokenTransferError::InvalidCoin {
                coin: coin_str.to_string(),
            })?;

        if denom_index == 0 {
            return Err(TokenTransferError::InvalidCoin {
                coin: coin_str.to_string(),
            });
        }

        let (amount_str, denom_str) = coin_str.split_at(denom_index);

        Ok(Coin {
            amount: amount_str.parse()?,
            denom: denom_str.parse().map_err(Into::into)?,
        })
    }
}

impl From<BaseCoin> for PrefixedCoin {
    fn from(coin: BaseCoin) -> PrefixedCoin {
        PrefixedCoin {
            denom: coin.denom.into(),
            amount: coin.amount,
        }
    }
}

impl<D: Display> Display for Coin<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
