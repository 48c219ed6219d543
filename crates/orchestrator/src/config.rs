// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration

use std::path::PathBuf;

use providers::{ExplorerConfig, MarketConfig, NodeConfig};
use url::Url;

/// Shared request timeout applied to every provider call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Endpoints and store location for a [`QueryEngine`](crate::QueryEngine).
///
/// API keys are not part of the configuration; they come from the credential
/// store at query time, so a key stored mid-session is picked up by the next
/// query without rebuilding the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Node provider base URL, without the key segment.
    pub node_url: Url,
    /// Block-explorer API endpoint.
    pub explorer_url: Url,
    /// Market-data API root.
    pub market_url: Url,
    /// Request timeout in seconds, shared by all three providers.
    pub timeout_seconds: u64,
    /// Credential store file; `None` selects the well-known location under
    /// the user configuration directory.
    pub store_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_url: NodeConfig::default_base_url(),
            explorer_url: ExplorerConfig::default_base_url(),
            market_url: MarketConfig::default_base_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            store_path: None,
        }
    }
}
