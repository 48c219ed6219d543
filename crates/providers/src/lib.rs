// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP clients for the three external services
//!
//! One client per service, each implementing the shared
//! [`Provider`](provider_client::Provider) contract:
//!
//! - [`NodeClient`]: JSON-RPC node provider for balances, nonces, transaction
//!   lookups, gas price, and block headers,
//! - [`ExplorerClient`]: block-explorer indexing API for transaction history,
//! - [`MarketClient`]: market-data API for spot prices.
//!
//! Every client validates its configuration at construction, bounds each
//! request with a timeout, and converts its service-specific error enum into
//! the shared [`ProviderError`](provider_client::ProviderError) taxonomy at
//! its public boundary. Callers never see per-service error types.

mod explorer;
mod market;
mod node;

pub use explorer::{ExplorerClient, ExplorerConfig, ExplorerError};
pub use market::{MarketClient, MarketConfig, MarketError};
pub use node::{NodeClient, NodeConfig, NodeError};
