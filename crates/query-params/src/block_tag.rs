// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Block tag parsing: symbolic tags and concrete heights

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A position in the chain's block sequence.
///
/// Symbolic tags and concrete heights are separate variants, so a single tag
/// can never carry both. Heights are given in decimal on input and encoded as
/// `0x`-prefixed hex quantities on the wire, as the node protocol expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// The most recently mined block.
    Latest,
    /// The first block of the chain.
    Earliest,
    /// The pending state, including transactions not yet mined.
    Pending,
    /// A concrete block height.
    Number(u64),
}

/// Why a block tag string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid block tag '{input}': expected 'latest', 'earliest', 'pending', or a block number")]
pub struct BlockTagParseError {
    /// The rejected input.
    pub input: String,
}

impl BlockTag {
    /// Encode the tag as the node protocol's block parameter.
    pub fn as_rpc_param(&self) -> String {
        match self {
            Self::Latest => "latest".to_owned(),
            Self::Earliest => "earliest".to_owned(),
            Self::Pending => "pending".to_owned(),
            Self::Number(height) => format!("0x{height:x}"),
        }
    }
}

impl FromStr for BlockTag {
    type Err = BlockTagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "earliest" => Ok(Self::Earliest),
            "pending" => Ok(Self::Pending),
            numeric => numeric
                .parse::<u64>()
                .map(Self::Number)
                .map_err(|_| BlockTagParseError {
                    input: s.to_owned(),
                }),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Earliest => write!(f, "earliest"),
            Self::Pending => write!(f, "pending"),
            Self::Number(height) => write!(f, "{height}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_tags_parse_case_insensitively() {
        assert_eq!("latest".parse::<BlockTag>().unwrap(), BlockTag::Latest);
        assert_eq!("Pending".parse::<BlockTag>().unwrap(), BlockTag::Pending);
        assert_eq!("EARLIEST".parse::<BlockTag>().unwrap(), BlockTag::Earliest);
    }

    #[test]
    fn decimal_heights_parse_as_numbers() {
        assert_eq!(
            "17000000".parse::<BlockTag>().unwrap(),
            BlockTag::Number(17_000_000)
        );
        assert_eq!("0".parse::<BlockTag>().unwrap(), BlockTag::Number(0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!("newest".parse::<BlockTag>().is_err());
        assert!("-5".parse::<BlockTag>().is_err());
        assert!("12.5".parse::<BlockTag>().is_err());
        assert!(String::new().parse::<BlockTag>().is_err());
    }

    #[test]
    fn rpc_encoding_uses_hex_quantities() {
        assert_eq!(BlockTag::Latest.as_rpc_param(), "latest");
        assert_eq!(BlockTag::Pending.as_rpc_param(), "pending");
        assert_eq!(BlockTag::Number(255).as_rpc_param(), "0xff");
        assert_eq!(BlockTag::Number(0).as_rpc_param(), "0x0");
    }
}
