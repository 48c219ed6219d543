// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Node provider client (JSON-RPC 2.0 over HTTP)
//!
//! Speaks the Ethereum node protocol for on-chain reads: balances, nonces,
//! transaction lookups, gas price, and block headers. The provider
//! authenticates by URL: the API key is appended to the base URL as a path
//! segment, so the key never appears in a query string or header.
//!
//! Quantities arrive as `0x`-prefixed hex strings and routinely exceed 64
//! bits; they are decoded into `U256` and never pass through floating point.

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use provider_client::{
    Balance, BlockSummary, GasPrice, Provider, ProviderError, TransactionStatus,
};
use query_params::BlockTag;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use url::Url;

/// Default node provider endpoint; the API key is appended per request URL.
const DEFAULT_NODE_BASE_URL: &str = "https://mainnet.infura.io/v3";

const DEFAULT_NODE_TIMEOUT_SECONDS: u64 = 30;

const JSONRPC_VERSION: &str = "2.0";

/// Configuration for the node provider client.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL without the key segment.
    pub base_url: Url,
    /// Provider API key, appended to the URL path.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl NodeConfig {
    /// Create a validated configuration.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, NodeError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NodeError::Config(
                "node API key must not be empty".to_owned(),
            ));
        }
        if timeout_seconds == 0 {
            return Err(NodeError::Config(
                "node timeout must be at least one second".to_owned(),
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
            timeout_seconds: DEFAULT_NODE_TIMEOUT_SECONDS,
        }
    }

    /// The production default base URL.
    #[allow(clippy::missing_panics_doc)]
    pub fn default_base_url() -> Url {
        Url::parse(DEFAULT_NODE_BASE_URL).expect("known-valid URL")
    }
}

/// Errors specific to the node provider client.
#[derive(Debug, Error)]
pub enum NodeError {
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
    #[error("node returned HTTP {status} with no parseable body")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },

    /// The node returned a well-formed protocol error.
    #[error("node rejected the request: {message} (code {code})")]
    Rpc {
        /// Protocol error code.
        code: i64,
        /// Protocol error message.
        message: String,
    },

    /// A success response that does not match the protocol contract.
    #[error("malformed node response: {message}")]
    Malformed {
        /// What was expected and what arrived.
        message: String,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NodeError {
    fn malformed<T: ToString>(message: T) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

impl From<NodeError> for ProviderError {
    fn from(value: NodeError) -> Self {
        match value {
            NodeError::Http(error) => ProviderError::unavailable(format!("node: {error}")),
            NodeError::Timeout { seconds } => {
                ProviderError::unavailable(format!("node: timed out after {seconds}s"))
            }
            NodeError::HttpStatus { status } => {
                ProviderError::unavailable(format!("node: HTTP {status}"))
            }
            NodeError::Rpc { code, message } => {
                ProviderError::rejected(format!("node: {message} (code {code})"))
            }
            NodeError::Malformed { message } => {
                ProviderError::protocol_mismatch(format!("node: {message}"))
            }
            NodeError::Config(message) => ProviderError::rejected(format!("node: {message}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    /// `Some(Value::Null)` when the field is present but null; an explicit
    /// null result is meaningful (unknown hash) and must not collapse into
    /// "field absent".
    #[serde(default, deserialize_with = "present_even_if_null")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

fn present_even_if_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Transaction fields needed to tell pending from mined.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcTransaction {
    #[serde(default)]
    block_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    block_number: String,
    #[serde(default)]
    status: Option<String>,
    gas_used: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcBlock {
    number: String,
    hash: String,
    parent_hash: String,
    timestamp: String,
    miner: String,
    gas_used: String,
    gas_limit: String,
    transactions: Vec<Value>,
}

/// JSON-RPC client for the node provider.
#[derive(Debug)]
pub struct NodeClient {
    client: Client,
    config: NodeConfig,
    endpoint: Url,
}

impl NodeClient {
    /// Create a new node provider client.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        let mut endpoint = config.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| NodeError::Config("node base URL cannot carry a path".to_owned()))?
            .pop_if_empty()
            .push(&config.api_key);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ethq/0.1.0")
            .build()
            .map_err(NodeError::Http)?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Account balance in wei at the given block.
    pub async fn balance(&self, address: Address, block: BlockTag) -> Result<Balance, ProviderError> {
        debug!(%address, %block, "querying balance");
        let result = self
            .call(
                "eth_getBalance",
                json!([format!("{address:#x}"), block.as_rpc_param()]),
            )
            .await
            .map_err(|err| self.fail("eth_getBalance", err))?;
        parse_quantity(&result)
            .map(Balance::new)
            .map_err(|err| self.fail("eth_getBalance", err))
    }

    /// Transaction count of the account at the given block.
    pub async fn nonce(&self, address: Address, block: BlockTag) -> Result<u64, ProviderError> {
        debug!(%address, %block, "querying nonce");
        let result = self
            .call(
                "eth_getTransactionCount",
                json!([format!("{address:#x}"), block.as_rpc_param()]),
            )
            .await
            .map_err(|err| self.fail("eth_getTransactionCount", err))?;
        parse_quantity_u64(&result).map_err(|err| self.fail("eth_getTransactionCount", err))
    }

    /// Status of a transaction by hash.
    ///
    /// Returns `Ok(None)` for an unknown hash: the node answers `null`, which
    /// is a well-formed "no such transaction", not a protocol violation. A
    /// transaction without a block hash is pending; a mined one is looked up
    /// in its receipt for the execution verdict.
    pub async fn transaction_status(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionStatus>, ProviderError> {
        debug!(%hash, "querying transaction status");
        let result = self
            .call("eth_getTransactionByHash", json!([format!("{hash:#x}")]))
            .await
            .map_err(|err| self.fail("eth_getTransactionByHash", err))?;
        if result.is_null() {
            debug!(%hash, "transaction not known to the node");
            return Ok(None);
        }

        let transaction: RpcTransaction = serde_json::from_value(result)
            .map_err(|err| self.fail("eth_getTransactionByHash", NodeError::malformed(err)))?;
        if transaction.block_hash.is_none() {
            return Ok(Some(TransactionStatus::Pending));
        }

        let receipt = self
            .call("eth_getTransactionReceipt", json!([format!("{hash:#x}")]))
            .await
            .map_err(|err| self.fail("eth_getTransactionReceipt", err))?;
        if receipt.is_null() {
            // Mined per the transaction record but the receipt has not
            // propagated yet; report pending rather than guessing a verdict.
            return Ok(Some(TransactionStatus::Pending));
        }

        let receipt: RpcReceipt = serde_json::from_value(receipt)
            .map_err(|err| self.fail("eth_getTransactionReceipt", NodeError::malformed(err)))?;
        let status = TransactionStatus::Mined {
            block_number: parse_quantity_str_u64(&receipt.block_number)
                .map_err(|err| self.fail("eth_getTransactionReceipt", err))?,
            success: receipt.status.as_deref() == Some("0x1"),
            gas_used: parse_quantity_str_u64(&receipt.gas_used)
                .map_err(|err| self.fail("eth_getTransactionReceipt", err))?,
        };
        Ok(Some(status))
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> Result<GasPrice, ProviderError> {
        debug!("querying gas price");
        let result = self
            .call("eth_gasPrice", json!([]))
            .await
            .map_err(|err| self.fail("eth_gasPrice", err))?;
        parse_quantity(&result)
            .map(GasPrice::new)
            .map_err(|err| self.fail("eth_gasPrice", err))
    }

    /// Header summary of the most recently mined block.
    pub async fn latest_block(&self) -> Result<BlockSummary, ProviderError> {
        debug!("querying latest block");
        let result = self
            .call("eth_getBlockByNumber", json!(["latest", false]))
            .await
            .map_err(|err| self.fail("eth_getBlockByNumber", err))?;
        if result.is_null() {
            return Err(self.fail(
                "eth_getBlockByNumber",
                NodeError::malformed("node returned null for the latest block"),
            ));
        }
        let block: RpcBlock = serde_json::from_value(result)
            .map_err(|err| self.fail("eth_getBlockByNumber", NodeError::malformed(err)))?;
        convert_block(&block).map_err(|err| self.fail("eth_getBlockByNumber", err))
    }

    /// Send one JSON-RPC request and unwrap the protocol envelope.
    async fn call(&self, method: &'static str, params: Value) -> Result<Value, NodeError> {
        let request = self.client.post(self.endpoint.clone()).json(&RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: 1,
        });

        let response = timeout(self.request_timeout(), request.send())
            .await
            .map_err(|_| NodeError::Timeout {
                seconds: self.config.timeout_seconds,
            })?
            .map_err(NodeError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(NodeError::Http)?;

        if status == StatusCode::OK {
            let envelope: RpcResponse =
                serde_json::from_str(&body).map_err(NodeError::malformed)?;
            if let Some(err) = envelope.error {
                return Err(NodeError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            return envelope
                .result
                .ok_or_else(|| NodeError::malformed("response carries neither result nor error"));
        }

        // Non-2xx: a parseable protocol error body still counts as the
        // service rejecting the request; anything else is unavailability.
        if let Ok(envelope) = serde_json::from_str::<RpcResponse>(&body)
            && let Some(err) = envelope.error
        {
            return Err(NodeError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        warn!(status = status.as_u16(), method, "node HTTP error");
        Err(NodeError::HttpStatus {
            status: status.as_u16(),
        })
    }

    fn fail(&self, method: &'static str, err: NodeError) -> ProviderError {
        error!(provider = self.name(), method, error = %err, "node request failed");
        err.into()
    }
}

impl Provider for NodeClient {
    fn name(&self) -> &'static str {
        "node"
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }
}

fn parse_quantity(value: &Value) -> Result<U256, NodeError> {
    let text = value
        .as_str()
        .ok_or_else(|| NodeError::malformed(format!("expected a hex quantity, got {value}")))?;
    parse_quantity_str(text)
}

fn parse_quantity_str(text: &str) -> Result<U256, NodeError> {
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| NodeError::malformed(format!("quantity '{text}' lacks the 0x prefix")))?;
    U256::from_str_radix(digits, 16)
        .map_err(|err| NodeError::malformed(format!("bad hex quantity '{text}': {err}")))
}

fn parse_quantity_u64(value: &Value) -> Result<u64, NodeError> {
    let quantity = parse_quantity(value)?;
    u64::try_from(quantity)
        .map_err(|_| NodeError::malformed(format!("quantity {quantity} exceeds 64 bits")))
}

fn parse_quantity_str_u64(text: &str) -> Result<u64, NodeError> {
    let quantity = parse_quantity_str(text)?;
    u64::try_from(quantity)
        .map_err(|_| NodeError::malformed(format!("quantity {quantity} exceeds 64 bits")))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, NodeError> {
    let seconds = parse_quantity_str_u64(text)?;
    let seconds = i64::try_from(seconds)
        .map_err(|_| NodeError::malformed(format!("timestamp {seconds} exceeds range")))?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| NodeError::malformed(format!("timestamp {seconds} out of range")))
}

fn convert_block(block: &RpcBlock) -> Result<BlockSummary, NodeError> {
    Ok(BlockSummary {
        number: parse_quantity_str_u64(&block.number)?,
        hash: block
            .hash
            .parse()
            .map_err(|_| NodeError::malformed(format!("bad block hash '{}'", block.hash)))?,
        parent_hash: block.parent_hash.parse().map_err(|_| {
            NodeError::malformed(format!("bad parent hash '{}'", block.parent_hash))
        })?,
        timestamp: parse_timestamp(&block.timestamp)?,
        miner: block
            .miner
            .parse()
            .map_err(|_| NodeError::malformed(format!("bad miner address '{}'", block.miner)))?,
        gas_used: parse_quantity_str_u64(&block.gas_used)?,
        gas_limit: parse_quantity_str_u64(&block.gas_limit)?,
        transaction_count: block.transactions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected_at_construction() {
        let result = NodeConfig::new(NodeConfig::default_base_url(), "   ", 30);
        assert!(matches!(result, Err(NodeError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected_at_construction() {
        let result = NodeConfig::new(NodeConfig::default_base_url(), "key", 0);
        assert!(matches!(result, Err(NodeError::Config(_))));
    }

    #[test]
    fn endpoint_appends_the_key_as_a_path_segment() {
        let config = NodeConfig::new(NodeConfig::default_base_url(), "my-key", 30).unwrap();
        let client = NodeClient::new(config).unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://mainnet.infura.io/v3/my-key"
        );
    }

    #[test]
    fn quantities_parse_past_u64() {
        // 0x1bc16d674ec80000 = 2 ether in wei.
        let two_ether = parse_quantity(&json!("0x1bc16d674ec80000")).unwrap();
        assert_eq!(two_ether, U256::from(2_000_000_000_000_000_000u128));

        // 40 hex digits, far beyond u64.
        let huge = parse_quantity(&json!("0xffffffffffffffffffffffffffffffffffffffff")).unwrap();
        assert!(u64::try_from(huge).is_err());
    }

    #[test]
    fn quantity_parsing_rejects_bad_input() {
        assert!(matches!(
            parse_quantity(&json!("1bc16d674ec80000")),
            Err(NodeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!("0xzz")),
            Err(NodeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!(42)),
            Err(NodeError::Malformed { .. })
        ));
    }

    #[test]
    fn error_mapping_matches_the_shared_contract() {
        let err: ProviderError = NodeError::Timeout { seconds: 5 }.into();
        assert!(err.is_retryable());

        let err: ProviderError = NodeError::Rpc {
            code: -32000,
            message: "invalid project id".to_owned(),
        }
        .into();
        assert!(matches!(err, ProviderError::Rejected { .. }));
        assert!(!err.is_retryable());

        let err: ProviderError = NodeError::malformed("missing field").into();
        assert!(matches!(err, ProviderError::ProtocolMismatch { .. }));

        let err: ProviderError = NodeError::HttpStatus { status: 502 }.into();
        assert!(err.is_retryable());
    }

    #[test]
    fn provider_name_is_stable() {
        let config = NodeConfig::default_test("http://127.0.0.1:1");
        let client = NodeClient::new(config).unwrap();
        assert_eq!(client.name(), "node");
        assert_eq!(client.request_timeout(), Duration::from_secs(30));
    }
}
