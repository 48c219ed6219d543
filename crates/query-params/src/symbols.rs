// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Known coin and currency symbol sets for spot-price queries
//!
//! The market service accepts open-ended identifiers and silently returns an
//! empty object for ones it does not know, so both sides of a price query are
//! matched against curated sets before any request is built. Unknown input
//! fails closed.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Coin identifiers the tool will quote, in the market service's id scheme.
const KNOWN_COINS: &[&str] = &[
    "arbitrum",
    "bitcoin",
    "chainlink",
    "dai",
    "dogecoin",
    "ethereum",
    "litecoin",
    "matic-network",
    "optimism",
    "polkadot",
    "solana",
    "tether",
    "uniswap",
    "usd-coin",
    "wrapped-bitcoin",
];

/// Quote currencies the tool will price against.
const KNOWN_CURRENCIES: &[&str] = &[
    "aud", "btc", "cad", "chf", "cny", "eth", "eur", "gbp", "inr", "jpy", "krw", "usd",
];

/// A coin identifier from the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinId(&'static str);

/// A quote currency from the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VsCurrency(&'static str);

/// A coin identifier outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown coin '{input}'")]
pub struct UnknownCoinError {
    /// The rejected input.
    pub input: String,
}

/// A quote currency outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency '{input}'")]
pub struct UnknownCurrencyError {
    /// The rejected input.
    pub input: String,
}

impl CoinId {
    /// The default coin for price queries.
    pub const ETHEREUM: Self = Self("ethereum");

    /// Match `input` against the known coin set, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, UnknownCoinError> {
        let lowered = input.to_ascii_lowercase();
        KNOWN_COINS
            .iter()
            .find(|known| **known == lowered)
            .map(|known| Self(known))
            .ok_or(UnknownCoinError {
                input: input.to_owned(),
            })
    }

    /// The canonical identifier string.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl VsCurrency {
    /// The default quote currency.
    pub const USD: Self = Self("usd");

    /// Match `input` against the known currency set, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, UnknownCurrencyError> {
        let lowered = input.to_ascii_lowercase();
        KNOWN_CURRENCIES
            .iter()
            .find(|known| **known == lowered)
            .map(|known| Self(known))
            .ok_or(UnknownCurrencyError {
                input: input.to_owned(),
            })
    }

    /// The canonical currency code.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for CoinId {
    fn default() -> Self {
        Self::ETHEREUM
    }
}

impl Default for VsCurrency {
    fn default() -> Self {
        Self::USD
    }
}

impl FromStr for CoinId {
    type Err = UnknownCoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for VsCurrency {
    type Err = UnknownCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for VsCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_parse_case_insensitively() {
        assert_eq!(CoinId::parse("ethereum").unwrap(), CoinId::ETHEREUM);
        assert_eq!(CoinId::parse("Bitcoin").unwrap().as_str(), "bitcoin");
        assert_eq!(VsCurrency::parse("USD").unwrap(), VsCurrency::USD);
        assert_eq!(VsCurrency::parse("eur").unwrap().as_str(), "eur");
    }

    #[test]
    fn unknown_symbols_fail_closed() {
        assert_eq!(CoinId::parse("dogecash").unwrap_err().input, "dogecash");
        assert_eq!(VsCurrency::parse("zar").unwrap_err().input, "zar");
        assert!(CoinId::parse("").is_err());
    }

    #[test]
    fn defaults_are_ethereum_in_usd() {
        assert_eq!(CoinId::default().as_str(), "ethereum");
        assert_eq!(VsCurrency::default().as_str(), "usd");
    }

    #[test]
    fn symbol_tables_are_sorted_and_lowercase() {
        for table in [KNOWN_COINS, KNOWN_CURRENCIES] {
            let mut sorted = table.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, table);
            assert!(table.iter().all(|s| s.chars().all(|c| !c.is_uppercase())));
        }
    }
}
