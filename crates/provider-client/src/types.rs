// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Normalized query results shared across provider clients
//!
//! On-chain amounts stay 256-bit integers end-to-end; the human-readable
//! decimal forms are derived on demand and never stored, so the two can never
//! drift apart.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use query_params::{CoinId, VsCurrency};
use serde::{Deserialize, Serialize};

/// Decimal places between wei and ether.
const ETHER_DECIMALS: u32 = 18;

/// Decimal places between wei and gwei.
const GWEI_DECIMALS: u32 = 9;

/// An account balance in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Amount in the smallest on-chain unit.
    pub wei: U256,
}

impl Balance {
    /// Wrap a wei amount.
    pub const fn new(wei: U256) -> Self {
        Self { wei }
    }

    /// Decimal ether rendering, derived from the wei amount.
    pub fn ether(&self) -> String {
        scale_decimal(self.wei, ETHER_DECIMALS)
    }
}

/// A gas price in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPrice {
    /// Price in wei per gas unit.
    pub wei: U256,
}

impl GasPrice {
    /// Wrap a wei-per-gas amount.
    pub const fn new(wei: U256) -> Self {
        Self { wei }
    }

    /// Decimal gwei rendering, derived from the wei amount.
    pub fn gwei(&self) -> String {
        scale_decimal(self.wei, GWEI_DECIMALS)
    }
}

/// One row of an address's transaction history.
///
/// Ordering key is `timestamp`; list results are sorted and truncated by the
/// orchestrator, never trusted from the service's native order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Transaction hash.
    pub hash: B256,
    /// Sender.
    pub from: Address,
    /// Recipient; absent for contract creation.
    pub to: Option<Address>,
    /// Transferred amount.
    pub value: Balance,
    /// Block inclusion time.
    pub timestamp: DateTime<Utc>,
    /// Block the transaction landed in.
    pub block_number: u64,
    /// Blocks mined on top since inclusion.
    pub confirmations: u64,
    /// Whether execution failed.
    pub failed: bool,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Gas price paid.
    pub gas_price: GasPrice,
}

/// Outcome of a transaction lookup that found the transaction.
///
/// An unknown hash is not represented here: lookups return `Ok(None)` for a
/// well-formed "no such transaction" response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Accepted by the node but not yet included in a block.
    Pending,
    /// Included in a block, with the receipt's verdict attached.
    Mined {
        /// Block the transaction landed in.
        block_number: u64,
        /// Whether execution succeeded.
        success: bool,
        /// Gas consumed by execution.
        gas_used: u64,
    },
}

/// A spot price quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// The quoted coin.
    pub coin: CoinId,
    /// The quote currency.
    pub currency: VsCurrency,
    /// Positive decimal price of one coin in the quote currency.
    pub amount: f64,
}

/// Summary of a block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Block height.
    pub number: u64,
    /// Block hash.
    pub hash: B256,
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Block timestamp.
    pub timestamp: DateTime<Utc>,
    /// Address credited with the block.
    pub miner: Address,
    /// Gas consumed by all transactions in the block.
    pub gas_used: u64,
    /// Gas ceiling of the block.
    pub gas_limit: u64,
    /// Number of transactions included.
    pub transaction_count: usize,
}

/// Render `value` shifted right by `decimals` decimal places.
///
/// Pure integer arithmetic; trailing zeros in the fractional part are
/// trimmed, and a whole-number result carries no decimal point.
fn scale_decimal(value: U256, decimals: u32) -> String {
    let base = U256::from(10u128.pow(decimals));
    let whole = value / base;
    let frac = value % base;
    if frac.is_zero() {
        return whole.to_string();
    }
    let digits = frac.to_string();
    let padding = "0".repeat(decimals as usize - digits.len());
    let fraction = format!("{padding}{digits}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
