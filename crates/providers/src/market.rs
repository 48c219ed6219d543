// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market-data client for spot prices
//!
//! The market service is keyless HTTP GET. Its simple-price endpoint answers
//! with an object keyed by coin id, then by currency code:
//!
//! ```json
//! { "ethereum": { "usd": 2067.83 } }
//! ```
//!
//! For an unknown coin the service returns an empty object instead of an
//! error, so a response missing the requested coin or currency key is
//! surfaced as an unknown-symbol error, never silently defaulted to another
//! currency.

use std::time::Duration;

use provider_client::{PriceQuote, Provider, ProviderError};
use query_params::{CoinId, VsCurrency};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use url::Url;

/// Default market-data endpoint.
const DEFAULT_MARKET_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const DEFAULT_MARKET_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for the market-data client.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// API root; the simple-price path is appended per request.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl MarketConfig {
    /// Create a validated configuration.
    pub fn new(base_url: Url, timeout_seconds: u64) -> Result<Self, MarketError> {
        if timeout_seconds == 0 {
            return Err(MarketError::Config(
                "market timeout must be at least one second".to_owned(),
            ));
        }
        Ok(Self {
            base_url,
            timeout_seconds,
        })
    }

    /// Default configuration for testing against a local mock.
    #[allow(clippy::missing_panics_doc)]
    pub fn default_test(base_url: &str) -> Self {
        Self {
            base_url: Url::parse(base_url).expect("valid test URL"),
            timeout_seconds: DEFAULT_MARKET_TIMEOUT_SECONDS,
        }
    }

    /// The production default base URL.
    #[allow(clippy::missing_panics_doc)]
    pub fn default_base_url() -> Url {
        Url::parse(DEFAULT_MARKET_BASE_URL).expect("known-valid URL")
    }
}

/// Errors specific to the market-data client.
#[derive(Debug, Error)]
pub enum MarketError {
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
    #[error("market service returned HTTP {status} with no parseable body")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },

    /// The service reported an error through its status body.
    #[error("market service rejected the request: {message}")]
    Service {
        /// The service's stated reason.
        message: String,
    },

    /// The response does not quote the requested symbol.
    #[error("no quote for '{symbol}' in the response")]
    MissingSymbol {
        /// The coin or currency absent from the response.
        symbol: String,
    },

    /// A success response that does not match the service contract.
    #[error("malformed market response: {message}")]
    Malformed {
        /// What was expected and what arrived.
        message: String,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MarketError {
    fn malformed<T: ToString>(message: T) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

impl From<MarketError> for ProviderError {
    fn from(value: MarketError) -> Self {
        match value {
            MarketError::Http(error) => ProviderError::unavailable(format!("market: {error}")),
            MarketError::Timeout { seconds } => {
                ProviderError::unavailable(format!("market: timed out after {seconds}s"))
            }
            MarketError::HttpStatus { status } => {
                ProviderError::unavailable(format!("market: HTTP {status}"))
            }
            MarketError::Service { message } => {
                ProviderError::rejected(format!("market: {message}"))
            }
            MarketError::MissingSymbol { symbol } => ProviderError::unknown_symbol(symbol),
            MarketError::Malformed { message } => {
                ProviderError::protocol_mismatch(format!("market: {message}"))
            }
            MarketError::Config(message) => ProviderError::rejected(format!("market: {message}")),
        }
    }
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct MarketErrorBody {
    status: MarketErrorStatus,
}

#[derive(Debug, Deserialize)]
struct MarketErrorStatus {
    error_code: i64,
    error_message: String,
}

/// HTTP client for the market-data service.
#[derive(Debug)]
pub struct MarketClient {
    client: Client,
    config: MarketConfig,
}

impl MarketClient {
    /// Create a new market-data client.
    pub fn new(config: MarketConfig) -> Result<Self, MarketError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ethq/0.1.0")
            .build()
            .map_err(MarketError::Http)?;
        Ok(Self { client, config })
    }

    /// Spot price of one coin in one quote currency.
    pub async fn spot_price(
        &self,
        coin: CoinId,
        currency: VsCurrency,
    ) -> Result<PriceQuote, ProviderError> {
        debug!(%coin, %currency, "querying spot price");
        self.spot_price_inner(coin, currency).await.map_err(|err| {
            error!(provider = self.name(), %coin, %currency, error = %err, "price request failed");
            err.into()
        })
    }

    async fn spot_price_inner(
        &self,
        coin: CoinId,
        currency: VsCurrency,
    ) -> Result<PriceQuote, MarketError> {
        let url = self.price_url()?;
        let request = self.client.get(url).query(&[
            ("ids", coin.as_str()),
            ("vs_currencies", currency.as_str()),
        ]);

        let response = timeout(self.request_timeout(), request.send())
            .await
            .map_err(|_| MarketError::Timeout {
                seconds: self.config.timeout_seconds,
            })?
            .map_err(MarketError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(MarketError::Http)?;

        if status != StatusCode::OK {
            if let Ok(error_body) = serde_json::from_str::<MarketErrorBody>(&body) {
                return Err(MarketError::Service {
                    message: format!(
                        "{} (code {})",
                        error_body.status.error_message, error_body.status.error_code
                    ),
                });
            }
            warn!(status = status.as_u16(), "market HTTP error");
            return Err(MarketError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let quotes: Value = serde_json::from_str(&body).map_err(MarketError::malformed)?;
        let coin_quotes = quotes
            .get(coin.as_str())
            .ok_or_else(|| MarketError::MissingSymbol {
                symbol: coin.as_str().to_owned(),
            })?;
        let amount = coin_quotes
            .get(currency.as_str())
            .ok_or_else(|| MarketError::MissingSymbol {
                symbol: currency.as_str().to_owned(),
            })?
            .as_f64()
            .ok_or_else(|| MarketError::malformed("price is not a number"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(MarketError::malformed(format!(
                "non-positive price {amount} for {coin}/{currency}"
            )));
        }

        Ok(PriceQuote {
            coin,
            currency,
            amount,
        })
    }

    fn price_url(&self) -> Result<Url, MarketError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MarketError::Config("market base URL cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend(["simple", "price"]);
        Ok(url)
    }
}

impl Provider for MarketClient {
    fn name(&self) -> &'static str {
        "market"
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_url_appends_the_simple_price_path() {
        let client = MarketClient::new(MarketConfig::default_test("http://127.0.0.1:9")).unwrap();
        assert_eq!(
            client.price_url().unwrap().as_str(),
            "http://127.0.0.1:9/simple/price"
        );

        let client = MarketClient::new(MarketConfig {
            base_url: MarketConfig::default_base_url(),
            timeout_seconds: 30,
        })
        .unwrap();
        assert_eq!(
            client.price_url().unwrap().as_str(),
            "https://api.coingecko.com/api/v3/simple/price"
        );
    }

    #[test]
    fn zero_timeout_is_rejected_at_construction() {
        let result = MarketConfig::new(MarketConfig::default_base_url(), 0);
        assert!(matches!(result, Err(MarketError::Config(_))));
    }

    #[test]
    fn error_mapping_matches_the_shared_contract() {
        let err: ProviderError = MarketError::Timeout { seconds: 5 }.into();
        assert!(err.is_retryable());

        let err: ProviderError = MarketError::MissingSymbol {
            symbol: "usd".to_owned(),
        }
        .into();
        assert!(matches!(err, ProviderError::UnknownSymbol { .. }));
        assert!(!err.is_retryable());

        let err: ProviderError = MarketError::Service {
            message: "You've exceeded the Rate Limit (code 429)".to_owned(),
        }
        .into();
        assert!(matches!(err, ProviderError::Rejected { .. }));
    }
}
