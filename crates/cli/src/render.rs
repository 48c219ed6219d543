// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Plain-text rendering of query results
//!
//! Every function returns the finished block without a trailing newline;
//! printing is the caller's concern. Key material never appears here: the
//! credential view only carries set / not set flags.

use chrono::{DateTime, Utc};
use credential_store::CredentialStatus;
use orchestrator::{BalanceReport, HistoryReport, NonceReport, QueryError, TransactionReport};
use provider_client::{BlockSummary, GasPrice, PriceQuote, TransactionStatus};

/// The stored credentials, keys masked.
pub fn credential_status(status: &CredentialStatus) -> String {
    let address = status
        .address
        .map_or_else(|| "Not set".to_owned(), |address| address.to_string());
    kv_lines(&[
        ("Address:", address),
        ("Node key:", set_or_not(status.node_key_set)),
        ("Scan key:", set_or_not(status.scan_key_set)),
    ])
}

/// An account balance with its resolved block tag.
pub fn balance(report: &BalanceReport) -> String {
    kv_lines(&[
        ("Address:", report.address.to_string()),
        ("Block:", report.block.to_string()),
        (
            "Balance:",
            format!("{} ETH ({} wei)", report.balance.ether(), report.balance.wei),
        ),
    ])
}

/// An account transaction count with its resolved block tag.
pub fn nonce(report: &NonceReport) -> String {
    kv_lines(&[
        ("Address:", report.address.to_string()),
        ("Block:", report.block.to_string()),
        ("Nonce:", report.nonce.to_string()),
    ])
}

/// A transaction lookup: pending, mined with its receipt verdict, or unknown.
pub fn transaction_status(report: &TransactionReport) -> String {
    let mut rows = vec![("Hash:", report.hash.to_string())];
    match report.status {
        None => rows.push(("Status:", "Not found".to_owned())),
        Some(TransactionStatus::Pending) => rows.push(("Status:", "Pending".to_owned())),
        Some(TransactionStatus::Mined {
            block_number,
            success,
            gas_used,
        }) => {
            rows.push(("Status:", verdict(success).to_owned()));
            rows.push(("Block:", block_number.to_string()));
            rows.push(("Gas used:", gas_used.to_string()));
        }
    }
    kv_lines(&rows)
}

/// A transaction listing, one block per row, newest or oldest first as
/// requested. Direction is relative to the queried address.
pub fn history(report: &HistoryReport) -> String {
    if report.transactions.is_empty() {
        return format!("No transactions found for {}.", report.address);
    }

    let mut out = format!(
        "{} transaction(s) for {} (sort {}, limit {})",
        report.transactions.len(),
        report.address,
        report.order,
        report.limit
    );
    for tx in &report.transactions {
        let direction = if tx.from == report.address { "OUT" } else { "IN" };
        let to = tx
            .to
            .map_or_else(|| "contract creation".to_owned(), |to| to.to_string());
        let rows = [
            ("Time:", timestamp(&tx.timestamp)),
            (
                "Block:",
                format!("{} ({} confirmations)", tx.block_number, tx.confirmations),
            ),
            ("From:", tx.from.to_string()),
            ("To:", to),
            ("Value:", format!("{} ETH", tx.value.ether())),
            ("Gas:", format!("{} at {} gwei", tx.gas_used, tx.gas_price.gwei())),
            ("Status:", verdict(!tx.failed).to_owned()),
        ];
        out.push_str(&format!(
            "\n\n{direction} {}\n{}",
            tx.hash,
            indent(&kv_lines(&rows))
        ));
    }
    out
}

/// A spot price quote.
pub fn price(quote: &PriceQuote) -> String {
    format!("1 {} = {} {}", quote.coin, quote.amount, quote.currency)
}

/// The current gas price.
pub fn gas_price(current: &GasPrice) -> String {
    format!("Gas price: {} gwei ({} wei)", current.gwei(), current.wei)
}

/// The latest block header summary.
pub fn block(summary: &BlockSummary) -> String {
    kv_lines(&[
        ("Block:", summary.number.to_string()),
        ("Hash:", summary.hash.to_string()),
        ("Parent:", summary.parent_hash.to_string()),
        ("Time:", timestamp(&summary.timestamp)),
        ("Miner:", summary.miner.to_string()),
        (
            "Gas:",
            format!("{} used of {}", summary.gas_used, summary.gas_limit),
        ),
        ("Transactions:", summary.transaction_count.to_string()),
    ])
}

/// A follow-up line for failures the user can fix by storing something.
pub fn hint(error: &QueryError) -> Option<&'static str> {
    match error {
        QueryError::MissingParameter {
            parameter: "address",
        } => Some("Pass --address or store a default with: ethq account set --address <address>"),
        QueryError::MissingCredential {
            credential: "node API key",
        } => Some("Store one with: ethq account set --node-key <key>"),
        QueryError::MissingCredential {
            credential: "explorer API key",
        } => Some("Store one with: ethq account set --scan-key <key>"),
        _ => None,
    }
}

fn verdict(success: bool) -> &'static str {
    if success { "Success" } else { "Failed" }
}

fn set_or_not(set: bool) -> String {
    if set { "Set" } else { "Not set" }.to_owned()
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Prefix every line of a block with two spaces.
fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Align a block of label/value rows on the longest label.
fn kv_lines(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
