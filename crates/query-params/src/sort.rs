// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Sort direction for transaction history listings

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Requested ordering of history results by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first. The default for history listings.
    #[default]
    Descending,
}

/// Why a sort direction string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort direction '{input}': expected 'asc' or 'desc'")]
pub struct SortOrderParseError {
    /// The rejected input.
    pub input: String,
}

impl SortOrder {
    /// Encode the direction as the explorer's `sort` query parameter.
    pub const fn as_query_param(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(SortOrderParseError {
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_spellings_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(
            "Ascending".parse::<SortOrder>().unwrap(),
            SortOrder::Ascending
        );
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(
            "descending".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let err = "sideways".parse::<SortOrder>().unwrap_err();
        assert_eq!(err.input, "sideways");
    }

    #[test]
    fn default_is_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
    }
}
