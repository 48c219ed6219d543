// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line argument definitions
//!
//! Raw values only: everything the user types is handed to the query engine
//! as strings and validated there, so every surface shares one set of
//! parameter rules and error messages.

use clap::{Args, Parser, Subcommand};

/// Ethereum account, transaction, and market queries.
#[derive(Debug, Parser)]
#[command(name = "ethq", version, about)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stored credentials and per-account queries.
    Account {
        /// The account command to run.
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Network-wide state: prices, gas, latest block.
    Network {
        /// The network command to run.
        #[command(subcommand)]
        action: NetworkCommands,
    },
    /// Transaction lookups.
    Tx {
        /// The transaction command to run.
        #[command(subcommand)]
        action: TxCommands,
    },
}

/// Commands under `ethq account`.
#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// Store the default address and API keys. Only the given fields change.
    Set(SetArgs),
    /// Show the stored address and whether each API key is set.
    Show,
    /// Ether balance of an account.
    Balance(BalanceArgs),
    /// Recent transactions of an account, from the block explorer.
    Transactions(TransactionsArgs),
    /// Transaction count of an account (the next nonce).
    Nonce(NonceArgs),
}

/// Arguments for `ethq account set`.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Default account address for queries.
    #[arg(long)]
    pub address: Option<String>,
    /// API key for the node provider.
    #[arg(long)]
    pub node_key: Option<String>,
    /// API key for the block explorer.
    #[arg(long)]
    pub scan_key: Option<String>,
}

/// Arguments for `ethq account balance`.
#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Account address. Falls back to the stored default.
    #[arg(long)]
    pub address: Option<String>,
    /// Block tag: latest, earliest, pending, or a block height.
    #[arg(long)]
    pub block: Option<String>,
}

/// Arguments for `ethq account nonce`.
#[derive(Debug, Args)]
pub struct NonceArgs {
    /// Account address. Falls back to the stored default.
    #[arg(long)]
    pub address: Option<String>,
    /// Block tag: latest, earliest, pending, or a block height. Defaults to
    /// pending so the value is usable for the next outgoing transaction.
    #[arg(long)]
    pub block: Option<String>,
}

/// Arguments for `ethq account transactions`.
#[derive(Debug, Args)]
pub struct TransactionsArgs {
    /// Account address. Falls back to the stored default.
    #[arg(long)]
    pub address: Option<String>,
    /// Number of transactions to list, between 1 and 100.
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
    /// Sort order by age: asc or desc.
    #[arg(long)]
    pub sort: Option<String>,
}

/// Commands under `ethq network`.
#[derive(Debug, Subcommand)]
pub enum NetworkCommands {
    /// Spot price of a coin.
    Price(PriceArgs),
    /// Current gas price.
    GasPrice,
    /// Summary of the latest block.
    Block,
}

/// Arguments for `ethq network price`.
#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Coin identifier. Defaults to ethereum.
    pub coin: Option<String>,
    /// Quote currency. Defaults to usd.
    #[arg(long)]
    pub currency: Option<String>,
}

/// Commands under `ethq tx`.
#[derive(Debug, Subcommand)]
pub enum TxCommands {
    /// Status of a transaction: pending, mined, or unknown.
    Status(StatusArgs),
}

/// Arguments for `ethq tx status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// The transaction hash to look up.
    pub hash: String,
}
