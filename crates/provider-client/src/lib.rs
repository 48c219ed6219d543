// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared provider contract, error taxonomy, and normalized query results
//!
//! The three external services this tool talks to (node provider, block
//! explorer, market data) have nothing in common on the wire: different
//! protocols, different units, different pagination, different error
//! envelopes. This crate defines what they must have in common on the inside:
//! the [`Provider`] surface every client implements, the [`ProviderError`]
//! taxonomy every per-service failure converts into, and the normalized result
//! types the rest of the system consumes.
//!
//! The error mapping contract, shared by all clients:
//!
//! - transport failures, timeouts, and non-2xx responses with no parseable
//!   body become [`ProviderError::Unavailable`] (the only retryable kind),
//! - a well-formed error body from the service becomes
//!   [`ProviderError::Rejected`],
//! - a success response whose shape contradicts the service contract becomes
//!   [`ProviderError::ProtocolMismatch`],
//! - a well-formed "no such resource" is not an error at all: lookups return
//!   `Ok(None)` and listings return an empty vector.

use std::time::Duration;

use thiserror::Error;

pub mod types;

pub use types::{Balance, BlockSummary, GasPrice, PriceQuote, TransactionStatus, TransactionSummary};

/// Common surface of the three external service clients.
///
/// Capability methods live on the concrete clients since no two services
/// answer the same questions; what they share is identity for logs and error
/// context, and a bounded per-request timeout.
pub trait Provider: Send + Sync {
    /// Short service name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Upper bound on a single request. Exceeding it maps to
    /// [`ProviderError::Unavailable`].
    fn request_timeout(&self) -> Duration;
}

/// Failure taxonomy shared by every provider client.
///
/// Each per-service error enum converts into this type at the client
/// boundary; orchestration code never sees service-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport-level failure or timeout. Safe for the caller to retry.
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Human-readable failure description.
        message: String,
    },

    /// The service understood the request and declined it, e.g. a bad API
    /// key or an exhausted quota. Retrying without user action will not help.
    #[error("provider rejected the request: {message}")]
    Rejected {
        /// The service's stated reason.
        message: String,
    },

    /// A success-shaped response that does not match the service contract.
    /// Fatal for the call; logged with enough context to diagnose a contract
    /// change.
    #[error("unexpected provider response: {message}")]
    ProtocolMismatch {
        /// What was expected and what arrived.
        message: String,
    },

    /// The service does not quote the requested symbol pair.
    #[error("provider does not quote '{symbol}'")]
    UnknownSymbol {
        /// The symbol missing from the response.
        symbol: String,
    },
}

impl ProviderError {
    /// Create an [`ProviderError::Unavailable`] error.
    pub fn unavailable<T: ToString>(message: T) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }

    /// Create a [`ProviderError::Rejected`] error.
    pub fn rejected<T: ToString>(message: T) -> Self {
        Self::Rejected {
            message: message.to_string(),
        }
    }

    /// Create a [`ProviderError::ProtocolMismatch`] error.
    pub fn protocol_mismatch<T: ToString>(message: T) -> Self {
        Self::ProtocolMismatch {
            message: message.to_string(),
        }
    }

    /// Create an [`ProviderError::UnknownSymbol`] error.
    pub fn unknown_symbol<T: ToString>(symbol: T) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.to_string(),
        }
    }

    /// Whether the caller may retry the operation as-is.
    ///
    /// Only transport-level unavailability qualifies; every other kind needs
    /// a change from the user or the service before a retry can succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
