// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ethereum account address validation and normalization

use std::{fmt, str::FromStr};

use alloy_primitives::Address;
use thiserror::Error;

/// Expected textual length of an address: `0x` plus 40 hex digits.
pub const ADDRESS_STR_LEN: usize = 42;

/// A validated 20-byte Ethereum account address.
///
/// Accepts any mix of upper- and lowercase hex on input and renders in the
/// EIP-55 checksummed form. Re-parsing the rendered form yields the same
/// value, so normalization is idempotent.
///
/// # Examples
///
/// ```
/// use query_params::EthAddress;
///
/// let addr: EthAddress = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"
///     .parse()
///     .expect("well-formed address");
/// assert_eq!(
///     addr.to_string(),
///     "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthAddress(Address);

/// Why an address string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// The string does not start with `0x`.
    #[error("address must start with '0x': got '{input}'")]
    MissingPrefix {
        /// The rejected input.
        input: String,
    },

    /// The string is not exactly 42 characters long.
    #[error("address must be {ADDRESS_STR_LEN} characters ('0x' + 40 hex digits): got {found}")]
    WrongLength {
        /// Observed character count.
        found: usize,
    },

    /// The string contains characters outside the hex alphabet.
    #[error("address contains non-hexadecimal characters: '{input}'")]
    InvalidHex {
        /// The rejected input.
        input: String,
    },
}

impl EthAddress {
    /// Validate `input` and normalize it to the canonical checksummed form.
    pub fn parse(input: &str) -> Result<Self, AddressParseError> {
        let Some(digits) = input.strip_prefix("0x") else {
            return Err(AddressParseError::MissingPrefix {
                input: input.to_owned(),
            });
        };
        if input.len() != ADDRESS_STR_LEN {
            return Err(AddressParseError::WrongLength { found: input.len() });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidHex {
                input: input.to_owned(),
            });
        }
        let inner = Address::from_str(digits).map_err(|_| AddressParseError::InvalidHex {
            input: input.to_owned(),
        })?;
        Ok(Self(inner))
    }

    /// The underlying 20-byte value.
    pub const fn inner(&self) -> Address {
        self.0
    }
}

impl From<Address> for EthAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for EthAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Address renders EIP-55 checksummed with the 0x prefix.
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITALIK: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    const VITALIK_CHECKSUMMED: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn lowercase_input_is_accepted_and_checksummed() {
        let addr = EthAddress::parse(VITALIK).unwrap();
        assert_eq!(addr.to_string(), VITALIK_CHECKSUMMED);
    }

    #[test]
    fn uppercase_input_is_accepted() {
        let upper = format!("0x{}", VITALIK[2..].to_uppercase());
        let addr = EthAddress::parse(&upper).unwrap();
        assert_eq!(addr.to_string(), VITALIK_CHECKSUMMED);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = EthAddress::parse(VITALIK).unwrap();
        let second = EthAddress::parse(&first.to_string()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let bare = &VITALIK[2..];
        assert!(matches!(
            EthAddress::parse(bare),
            Err(AddressParseError::MissingPrefix { .. })
        ));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            EthAddress::parse("0xd8da6bf2"),
            Err(AddressParseError::WrongLength { found: 10 })
        ));
        let long = format!("{VITALIK}00");
        assert!(matches!(
            EthAddress::parse(&long),
            Err(AddressParseError::WrongLength { found: 44 })
        ));
    }

    #[test]
    fn non_hex_characters_are_rejected() {
        let bad = "0xzzda6bf26964af9d7eed9e03e53415d37aa96045";
        assert!(matches!(
            EthAddress::parse(bad),
            Err(AddressParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn empty_string_is_rejected() {
        assert!(matches!(
            EthAddress::parse(""),
            Err(AddressParseError::MissingPrefix { .. })
        ));
    }
}
