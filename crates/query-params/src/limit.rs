// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded row limit for transaction history queries

use std::fmt;

use thiserror::Error;

/// Most rows a single history query may request.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Rows returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// A validated history row limit in `1..=MAX_HISTORY_LIMIT`.
///
/// Out-of-range requests error rather than clamp, so a caller asking for more
/// than the tool will fetch finds out instead of silently receiving fewer
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit(u32);

/// A requested limit outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("limit must be between 1 and {MAX_HISTORY_LIMIT}: got {requested}")]
pub struct LimitOutOfRange {
    /// The rejected value.
    pub requested: i64,
}

impl HistoryLimit {
    /// Validate `requested` against the accepted range.
    pub fn new(requested: i64) -> Result<Self, LimitOutOfRange> {
        match u32::try_from(requested) {
            Ok(value) if (1..=MAX_HISTORY_LIMIT).contains(&value) => Ok(Self(value)),
            _ => Err(LimitOutOfRange { requested }),
        }
    }

    /// The validated value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The validated value as a usize, for truncating result vectors.
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(DEFAULT_HISTORY_LIMIT)
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
