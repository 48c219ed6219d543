// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The query engine
//!
//! Every operation follows the same path: load the stored credentials,
//! resolve effective parameters (explicit argument over stored default over
//! operation default), validate them, confirm the credential the target
//! service needs, dispatch one provider call, and normalize the result.
//! Validation and credential failures happen strictly before the provider
//! client is even constructed, so they can never cost a network round trip.

use alloy_primitives::Address;
use credential_store::{CredentialStatus, CredentialStore, Credentials, CredentialsUpdate};
use provider_client::{BlockSummary, GasPrice, PriceQuote, ProviderError, TransactionSummary};
use providers::{
    ExplorerClient, ExplorerConfig, MarketClient, MarketConfig, NodeClient, NodeConfig,
};
use query_params::{
    BlockTag, CoinId, EthAddress, HistoryLimit, SortOrder, TransactionHash, VsCurrency,
};
use tracing::{debug, info, instrument};

use crate::{
    config::EngineConfig,
    error::QueryError,
    report::{BalanceReport, HistoryReport, NonceReport, TransactionReport},
};

/// The façade the CLI calls; one instance per invocation.
///
/// Holds the endpoint configuration and the credential store handle. Provider
/// clients are constructed per operation because the API keys they embed come
/// from the store at query time.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    config: EngineConfig,
    store: CredentialStore,
}

impl QueryEngine {
    /// Create an engine over the given configuration.
    pub fn new(config: EngineConfig) -> Result<Self, QueryError> {
        if config.timeout_seconds == 0 {
            return Err(QueryError::Config(
                "request timeout must be at least one second".to_owned(),
            ));
        }
        let store = match &config.store_path {
            Some(path) => CredentialStore::new(path.clone()),
            None => CredentialStore::at_default_location()?,
        };
        debug!(store = %store.path().display(), "query engine ready");
        Ok(Self { config, store })
    }

    /// Merge the given fields into the stored credentials.
    ///
    /// The address is validated before anything is written; key material is
    /// accepted opaquely but must not be blank. Returns the masked read-back
    /// view of the full record after the merge.
    pub fn set_credentials(
        &self,
        address: Option<&str>,
        node_key: Option<String>,
        scan_key: Option<String>,
    ) -> Result<CredentialStatus, QueryError> {
        let address = address
            .map(EthAddress::parse)
            .transpose()?
            .map(|parsed| parsed.inner());
        for (parameter, key) in [("node key", &node_key), ("scan key", &scan_key)] {
            if matches!(key.as_deref(), Some(k) if k.trim().is_empty()) {
                return Err(QueryError::InvalidValue {
                    parameter,
                    message: "must not be blank".to_owned(),
                });
            }
        }

        let update = CredentialsUpdate {
            address,
            node_key,
            scan_key,
        };
        let credentials = self.store.update(update)?;
        Ok(credentials.status())
    }

    /// The stored credentials with key material masked to set / not set.
    pub fn credential_status(&self) -> CredentialStatus {
        self.store.load().status()
    }

    /// Account balance in wei, at `block` (default `latest`).
    #[instrument(skip(self))]
    pub async fn balance(
        &self,
        address: Option<&str>,
        block: Option<&str>,
    ) -> Result<BalanceReport, QueryError> {
        let credentials = self.store.load();
        let address = resolve_address(address, &credentials)?;
        let block = resolve_block_tag(block, BlockTag::Latest)?;
        let client = self.node_client(&credentials)?;

        let balance = client.balance(address, block).await?;
        info!(%address, %block, wei = %balance.wei, "balance query complete");
        Ok(BalanceReport {
            address,
            block,
            balance,
        })
    }

    /// Account transaction count, at `block` (default `pending`, so the next
    /// usable nonce includes transactions still in the pool).
    #[instrument(skip(self))]
    pub async fn nonce(
        &self,
        address: Option<&str>,
        block: Option<&str>,
    ) -> Result<NonceReport, QueryError> {
        let credentials = self.store.load();
        let address = resolve_address(address, &credentials)?;
        let block = resolve_block_tag(block, BlockTag::Pending)?;
        let client = self.node_client(&credentials)?;

        let nonce = client.nonce(address, block).await?;
        info!(%address, %block, nonce, "nonce query complete");
        Ok(NonceReport {
            address,
            block,
            nonce,
        })
    }

    /// Status of a transaction by hash; `status: None` means no service
    /// knows the hash.
    #[instrument(skip(self))]
    pub async fn transaction_status(&self, hash: &str) -> Result<TransactionReport, QueryError> {
        let credentials = self.store.load();
        let hash = TransactionHash::parse(hash)?.inner();
        let client = self.node_client(&credentials)?;

        let status = client.transaction_status(hash).await?;
        info!(%hash, found = status.is_some(), "transaction status query complete");
        Ok(TransactionReport { hash, status })
    }

    /// Transaction history for an address, sorted by timestamp in the
    /// requested order and truncated to the requested limit.
    ///
    /// The explorer's native row order is not trusted; rows are re-sorted
    /// here before truncation.
    #[instrument(skip(self))]
    pub async fn transaction_history(
        &self,
        address: Option<&str>,
        limit: Option<i64>,
        sort: Option<&str>,
    ) -> Result<HistoryReport, QueryError> {
        let credentials = self.store.load();
        let address = resolve_address(address, &credentials)?;
        let limit = match limit {
            Some(requested) => HistoryLimit::new(requested)?,
            None => HistoryLimit::default(),
        };
        let order = match sort {
            Some(raw) => raw.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };
        let client = self.explorer_client(&credentials)?;

        let mut transactions = client.transaction_history(address, limit, order).await?;
        sort_and_truncate(&mut transactions, order, limit);
        info!(%address, rows = transactions.len(), "history query complete");
        Ok(HistoryReport {
            address,
            order,
            limit,
            transactions,
        })
    }

    /// Spot price of `coin` (default `ethereum`) in `currency` (default
    /// `usd`). Needs no credential.
    #[instrument(skip(self))]
    pub async fn spot_price(
        &self,
        coin: Option<&str>,
        currency: Option<&str>,
    ) -> Result<PriceQuote, QueryError> {
        let coin = match coin {
            Some(raw) => CoinId::parse(raw)?,
            None => CoinId::default(),
        };
        let currency = match currency {
            Some(raw) => VsCurrency::parse(raw)?,
            None => VsCurrency::default(),
        };
        let client = self.market_client()?;

        let quote = client.spot_price(coin, currency).await?;
        info!(%coin, %currency, amount = quote.amount, "price query complete");
        Ok(quote)
    }

    /// Current gas price.
    #[instrument(skip(self))]
    pub async fn gas_price(&self) -> Result<GasPrice, QueryError> {
        let credentials = self.store.load();
        let client = self.node_client(&credentials)?;
        let price = client.gas_price().await?;
        info!(wei = %price.wei, "gas price query complete");
        Ok(price)
    }

    /// Header summary of the latest block.
    #[instrument(skip(self))]
    pub async fn latest_block(&self) -> Result<BlockSummary, QueryError> {
        let credentials = self.store.load();
        let client = self.node_client(&credentials)?;
        let block = client.latest_block().await?;
        info!(number = block.number, "latest block query complete");
        Ok(block)
    }

    fn node_client(&self, credentials: &Credentials) -> Result<NodeClient, QueryError> {
        let key = require_key(credentials.node_key.as_deref(), "node API key")?;
        let config = NodeConfig::new(
            self.config.node_url.clone(),
            key,
            self.config.timeout_seconds,
        )
        .map_err(ProviderError::from)?;
        Ok(NodeClient::new(config).map_err(ProviderError::from)?)
    }

    fn explorer_client(&self, credentials: &Credentials) -> Result<ExplorerClient, QueryError> {
        let key = require_key(credentials.scan_key.as_deref(), "explorer API key")?;
        let config = ExplorerConfig::new(
            self.config.explorer_url.clone(),
            key,
            self.config.timeout_seconds,
        )
        .map_err(ProviderError::from)?;
        Ok(ExplorerClient::new(config).map_err(ProviderError::from)?)
    }

    fn market_client(&self) -> Result<MarketClient, QueryError> {
        let config = MarketConfig::new(self.config.market_url.clone(), self.config.timeout_seconds)
            .map_err(ProviderError::from)?;
        Ok(MarketClient::new(config).map_err(ProviderError::from)?)
    }
}

/// Explicit argument over stored default; neither is `MissingParameter`.
fn resolve_address(
    explicit: Option<&str>,
    credentials: &Credentials,
) -> Result<Address, QueryError> {
    match explicit {
        Some(raw) => Ok(EthAddress::parse(raw)?.inner()),
        None => credentials.address.ok_or(QueryError::MissingParameter {
            parameter: "address",
        }),
    }
}

fn resolve_block_tag(explicit: Option<&str>, default: BlockTag) -> Result<BlockTag, QueryError> {
    match explicit {
        Some(raw) => Ok(raw.parse::<BlockTag>()?),
        None => Ok(default),
    }
}

/// A stored key that is absent or blank is not set.
fn require_key<'a>(
    key: Option<&'a str>,
    credential: &'static str,
) -> Result<&'a str, QueryError> {
    key.map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(QueryError::MissingCredential { credential })
}

/// Stable sort by timestamp, then truncate. Rows with equal timestamps keep
/// their service order.
fn sort_and_truncate(rows: &mut Vec<TransactionSummary>, order: SortOrder, limit: HistoryLimit) {
    match order {
        SortOrder::Ascending => rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortOrder::Descending => rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
    }
    rows.truncate(limit.as_usize());
}
