// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Block-explorer client for transaction history
//!
//! The explorer indexes historical transactions that raw node queries cannot
//! list. Its API is HTTP GET with query-string parameters and a three-field
//! envelope: `status`, `message`, `result`. The envelope overloads `status ==
//! "0"` for both "address has no transactions" (an empty success) and real
//! service errors; the two are told apart by the message, and only the former
//! produces an empty listing.
//!
//! Row order from the service is not trusted; the orchestrator re-sorts and
//! truncates every listing.

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use chrono::DateTime;
use provider_client::{Balance, GasPrice, Provider, ProviderError, TransactionSummary};
use query_params::{HistoryLimit, SortOrder};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use url::Url;

/// Default explorer endpoint.
const DEFAULT_EXPLORER_BASE_URL: &str = "https://api.etherscan.io/api";

const DEFAULT_EXPLORER_TIMEOUT_SECONDS: u64 = 30;

/// Full block range; history pagination is row-based, not block-based.
const START_BLOCK: &str = "0";
const END_BLOCK: &str = "99999999";
const PAGE: &str = "1";

/// Envelope message marking an empty result set rather than an error.
const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

/// Configuration for the block-explorer client.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// API endpoint.
    pub base_url: Url,
    /// Explorer API key, sent as a query parameter.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl ExplorerConfig {
    /// Create a validated configuration.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, ExplorerError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ExplorerError::Config(
                "explorer API key must not be empty".to_owned(),
            ));
        }
        if timeout_seconds == 0 {
            return Err(ExplorerError::Config(
                "explorer timeout must be at least one second".to_owned(),
            ));
        }
        Ok(Self {
            base_url,
            api_key,
            timeout_seconds,
        })
    }

    /// Default configuration for testing against a local mock.
    #[allow(clippy::missing_panics_doc)]
    pub fn default_test(base_url: &str) -> Self {
        Self {
            base_url: Url::parse(base_url).expect("valid test URL"),
            api_key: "test-key".to_owned(),
            timeout_seconds: DEFAULT_EXPLORER_TIMEOUT_SECONDS,
        }
    }

    /// The production default base URL.
    #[allow(clippy::missing_panics_doc)]
    pub fn default_base_url() -> Url {
        Url::parse(DEFAULT_EXPLORER_BASE_URL).expect("known-valid URL")
    }
}

/// Errors specific to the block-explorer client.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// HTTP transport failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Configured timeout.
        seconds: u64,
    },

    /// Non-2xx response with no parseable error body.
    #[error("explorer returned HTTP {status} with no parseable body")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },

    /// The service reported an error through its envelope.
    #[error("explorer rejected the request: {message}")]
    Service {
        /// The envelope's stated reason.
        message: String,
    },

    /// A success response that does not match the service contract.
    #[error("malformed explorer response: {message}")]
    Malformed {
        /// What was expected and what arrived.
        message: String,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExplorerError {
    fn malformed<T: ToString>(message: T) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

impl From<ExplorerError> for ProviderError {
    fn from(value: ExplorerError) -> Self {
        match value {
            ExplorerError::Http(error) => ProviderError::unavailable(format!("explorer: {error}")),
            ExplorerError::Timeout { seconds } => {
                ProviderError::unavailable(format!("explorer: timed out after {seconds}s"))
            }
            ExplorerError::HttpStatus { status } => {
                ProviderError::unavailable(format!("explorer: HTTP {status}"))
            }
            ExplorerError::Service { message } => {
                ProviderError::rejected(format!("explorer: {message}"))
            }
            ExplorerError::Malformed { message } => {
                ProviderError::protocol_mismatch(format!("explorer: {message}"))
            }
            ExplorerError::Config(message) => {
                ProviderError::rejected(format!("explorer: {message}"))
            }
        }
    }
}

/// The explorer's three-field response envelope.
#[derive(Debug, Deserialize)]
struct ExplorerEnvelope {
    status: String,
    message: String,
    result: Value,
}

/// One transaction row as the explorer encodes it: every field a string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplorerTx {
    hash: String,
    from: String,
    to: String,
    value: String,
    time_stamp: String,
    block_number: String,
    confirmations: String,
    is_error: String,
    gas_used: String,
    gas_price: String,
}

/// HTTP client for the block-explorer indexing service.
#[derive(Debug)]
pub struct ExplorerClient {
    client: Client,
    config: ExplorerConfig,
}

impl ExplorerClient {
    /// Create a new explorer client.
    pub fn new(config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ethq/0.1.0")
            .build()
            .map_err(ExplorerError::Http)?;
        Ok(Self { client, config })
    }

    /// Transaction history for an address.
    ///
    /// `limit` caps the rows requested from the service (`offset` in its
    /// pagination scheme); the service may still return rows in arbitrary
    /// order, so callers re-sort and truncate. An address with no
    /// transactions yields an empty vector, not an error.
    pub async fn transaction_history(
        &self,
        address: Address,
        limit: HistoryLimit,
        sort: SortOrder,
    ) -> Result<Vec<TransactionSummary>, ProviderError> {
        debug!(%address, %limit, %sort, "querying transaction history");
        self.transaction_history_inner(address, limit, sort)
            .await
            .map_err(|err| {
                error!(provider = self.name(), %address, error = %err, "history request failed");
                err.into()
            })
    }

    async fn transaction_history_inner(
        &self,
        address: Address,
        limit: HistoryLimit,
        sort: SortOrder,
    ) -> Result<Vec<TransactionSummary>, ExplorerError> {
        let request = self
            .client
            .get(self.config.base_url.clone())
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", &format!("{address:#x}")),
                ("startblock", START_BLOCK),
                ("endblock", END_BLOCK),
                ("page", PAGE),
                ("offset", &limit.get().to_string()),
                ("sort", sort.as_query_param()),
                ("apikey", &self.config.api_key),
            ]);

        let response = timeout(self.request_timeout(), request.send())
            .await
            .map_err(|_| ExplorerError::Timeout {
                seconds: self.config.timeout_seconds,
            })?
            .map_err(ExplorerError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(ExplorerError::Http)?;

        if status != StatusCode::OK {
            if let Ok(envelope) = serde_json::from_str::<ExplorerEnvelope>(&body) {
                return Err(ExplorerError::Service {
                    message: envelope_error(&envelope),
                });
            }
            warn!(status = status.as_u16(), "explorer HTTP error");
            return Err(ExplorerError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let envelope: ExplorerEnvelope =
            serde_json::from_str(&body).map_err(ExplorerError::malformed)?;

        match envelope.status.as_str() {
            "1" => {
                let rows: Vec<ExplorerTx> = serde_json::from_value(envelope.result)
                    .map_err(|err| ExplorerError::malformed(format!("result rows: {err}")))?;
                rows.iter().map(convert_row).collect()
            }
            "0" if envelope.message == NO_TRANSACTIONS_MESSAGE => {
                debug!(%address, "address has no transactions");
                Ok(Vec::new())
            }
            "0" => Err(ExplorerError::Service {
                message: envelope_error(&envelope),
            }),
            other => Err(ExplorerError::malformed(format!(
                "unknown envelope status '{other}'"
            ))),
        }
    }
}

impl Provider for ExplorerClient {
    fn name(&self) -> &'static str {
        "explorer"
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }
}

/// Flatten an error envelope into one message; `result` often carries the
/// useful detail ("Max rate limit reached") while `message` is just "NOTOK".
fn envelope_error(envelope: &ExplorerEnvelope) -> String {
    match envelope.result.as_str() {
        Some(detail) if !detail.is_empty() => format!("{}: {detail}", envelope.message),
        _ => envelope.message.clone(),
    }
}

fn convert_row(row: &ExplorerTx) -> Result<TransactionSummary, ExplorerError> {
    let hash: B256 = row
        .hash
        .parse()
        .map_err(|_| ExplorerError::malformed(format!("bad transaction hash '{}'", row.hash)))?;
    let from: Address = row
        .from
        .parse()
        .map_err(|_| ExplorerError::malformed(format!("bad sender address '{}'", row.from)))?;
    // Contract creations have an empty `to` field.
    let to: Option<Address> = if row.to.is_empty() {
        None
    } else {
        Some(row.to.parse().map_err(|_| {
            ExplorerError::malformed(format!("bad recipient address '{}'", row.to))
        })?)
    };
    let value = parse_wei(&row.value, "value")?;
    let gas_price = parse_wei(&row.gas_price, "gasPrice")?;
    let timestamp_secs: i64 = row
        .time_stamp
        .parse()
        .map_err(|_| ExplorerError::malformed(format!("bad timestamp '{}'", row.time_stamp)))?;
    let timestamp = DateTime::from_timestamp(timestamp_secs, 0).ok_or_else(|| {
        ExplorerError::malformed(format!("timestamp {timestamp_secs} out of range"))
    })?;

    Ok(TransactionSummary {
        hash,
        from,
        to,
        value: Balance::new(value),
        timestamp,
        block_number: parse_u64(&row.block_number, "blockNumber")?,
        confirmations: parse_u64(&row.confirmations, "confirmations")?,
        failed: row.is_error != "0",
        gas_used: parse_u64(&row.gas_used, "gasUsed")?,
        gas_price: GasPrice::new(gas_price),
    })
}

fn parse_wei(text: &str, field: &str) -> Result<U256, ExplorerError> {
    U256::from_str_radix(text, 10)
        .map_err(|err| ExplorerError::malformed(format!("bad {field} '{text}': {err}")))
}

fn parse_u64(text: &str, field: &str) -> Result<u64, ExplorerError> {
    text.parse()
        .map_err(|err| ExplorerError::malformed(format!("bad {field} '{text}': {err}")))
}
