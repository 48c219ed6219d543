// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction hash validation

use std::{fmt, str::FromStr};

use alloy_primitives::B256;
use thiserror::Error;

/// Expected textual length of a transaction hash: `0x` plus 64 hex digits.
pub const TX_HASH_STR_LEN: usize = 66;

/// A validated 32-byte transaction hash.
///
/// Accepts any hex case on input; renders lowercase with the `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHash(B256);

/// Why a transaction hash string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionHashParseError {
    /// The string does not start with `0x`.
    #[error("transaction hash must start with '0x': got '{input}'")]
    MissingPrefix {
        /// The rejected input.
        input: String,
    },

    /// The string is not exactly 66 characters long.
    #[error("transaction hash must be {TX_HASH_STR_LEN} characters ('0x' + 64 hex digits): got {found}")]
    WrongLength {
        /// Observed character count.
        found: usize,
    },

    /// The string contains characters outside the hex alphabet.
    #[error("transaction hash contains non-hexadecimal characters: '{input}'")]
    InvalidHex {
        /// The rejected input.
        input: String,
    },
}

impl TransactionHash {
    /// Validate `input` as a 32-byte hex hash.
    pub fn parse(input: &str) -> Result<Self, TransactionHashParseError> {
        let Some(digits) = input.strip_prefix("0x") else {
            return Err(TransactionHashParseError::MissingPrefix {
                input: input.to_owned(),
            });
        };
        if input.len() != TX_HASH_STR_LEN {
            return Err(TransactionHashParseError::WrongLength { found: input.len() });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TransactionHashParseError::InvalidHex {
                input: input.to_owned(),
            });
        }
        let inner = B256::from_str(digits).map_err(|_| TransactionHashParseError::InvalidHex {
            input: input.to_owned(),
        })?;
        Ok(Self(inner))
    }

    /// The underlying 32-byte value.
    pub const fn inner(&self) -> B256 {
        self.0
    }
}

impl FromStr for TransactionHash {
    type Err = TransactionHashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    #[test]
    fn well_formed_hash_is_accepted() {
        let hash = TransactionHash::parse(HASH).unwrap();
        assert_eq!(hash.to_string(), HASH);
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let upper = format!("0x{}", HASH[2..].to_uppercase());
        let hash = TransactionHash::parse(&upper).unwrap();
        assert_eq!(hash.to_string(), HASH);
    }

    #[test]
    fn missing_prefix_is_rejected() {
        assert!(matches!(
            TransactionHash::parse(&HASH[2..]),
            Err(TransactionHashParseError::MissingPrefix { .. })
        ));
    }

    #[test]
    fn truncated_hash_is_rejected() {
        assert!(matches!(
            TransactionHash::parse("0x5c504ed432cb51138bcf09aa5e8a410d"),
            Err(TransactionHashParseError::WrongLength { found: 34 })
        ));
    }

    #[test]
    fn non_hex_hash_is_rejected() {
        let bad = format!("0xgg{}", &HASH[4..]);
        assert!(matches!(
            TransactionHash::parse(&bad),
            Err(TransactionHashParseError::InvalidHex { .. })
        ));
    }
}
