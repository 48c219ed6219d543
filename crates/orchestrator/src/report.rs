// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query results with their resolved parameters attached
//!
//! Reports carry the effective parameter values a query actually ran with,
//! so the caller can show which address or block tag was used when it came
//! from a stored default rather than an explicit argument.

use alloy_primitives::{Address, B256};
use provider_client::{Balance, TransactionStatus, TransactionSummary};
use query_params::{BlockTag, HistoryLimit, SortOrder};

/// Result of a balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// The account queried.
    pub address: Address,
    /// The block the balance was read at.
    pub block: BlockTag,
    /// The balance in wei.
    pub balance: Balance,
}

/// Result of a nonce query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceReport {
    /// The account queried.
    pub address: Address,
    /// The block the count was read at.
    pub block: BlockTag,
    /// The account's transaction count.
    pub nonce: u64,
}

/// Result of a transaction-status lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReport {
    /// The hash looked up.
    pub hash: B256,
    /// The transaction's state, or `None` when no service knows the hash.
    pub status: Option<TransactionStatus>,
}

/// Result of a transaction-history query, sorted and truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryReport {
    /// The account queried.
    pub address: Address,
    /// The order the rows are in.
    pub order: SortOrder,
    /// The limit the listing was truncated to.
    pub limit: HistoryLimit,
    /// The listed transactions.
    pub transactions: Vec<TransactionSummary>,
}
