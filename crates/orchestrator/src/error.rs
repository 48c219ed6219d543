// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The full query error taxonomy
//!
//! Local errors (`InvalidFormat` through `MissingCredential`) are detected
//! before any network call and mean the user has to change something.
//! `Provider` wraps a failure from a dispatched call; its retryable flag
//! travels with it. The two families never mix: a query that fails locally
//! performed no network I/O.

use credential_store::CredentialStoreError;
use provider_client::ProviderError;
use query_params::{
    AddressParseError, BlockTagParseError, LimitOutOfRange, SortOrderParseError,
    TransactionHashParseError, UnknownCoinError, UnknownCurrencyError,
};
use thiserror::Error;

/// Any failure a query operation can produce.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A parameter with a syntax (address, hash, block tag) did not parse.
    #[error("invalid {parameter}: {message}")]
    InvalidFormat {
        /// Which parameter was rejected.
        parameter: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// A parameter with an enumerated value set did not match any choice.
    #[error("invalid {parameter}: {message}")]
    InvalidValue {
        /// Which parameter was rejected.
        parameter: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// A numeric parameter fell outside its accepted range.
    #[error("{parameter} out of range: {message}")]
    OutOfRange {
        /// Which parameter was rejected.
        parameter: &'static str,
        /// The accepted range and the rejected value.
        message: String,
    },

    /// A coin or currency symbol outside the quotable set.
    #[error("unknown symbol '{symbol}'")]
    UnknownSymbol {
        /// The rejected symbol.
        symbol: String,
    },

    /// A required parameter was neither given nor stored.
    #[error("no {parameter} given and none stored")]
    MissingParameter {
        /// The absent parameter.
        parameter: &'static str,
    },

    /// The operation needs a credential that is not configured.
    #[error("{credential} is not set")]
    MissingCredential {
        /// The absent credential.
        credential: &'static str,
    },

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The credential store could not be located or written.
    #[error("credential store: {0}")]
    Store(#[from] CredentialStoreError),

    /// A dispatched provider call failed.
    #[error(transparent)]
    Provider(ProviderError),
}

impl QueryError {
    /// Whether the failure is the user's input (or configuration) rather than
    /// a provider's behavior. These failures never involved a network call.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::InvalidValue { .. }
                | Self::OutOfRange { .. }
                | Self::UnknownSymbol { .. }
                | Self::MissingParameter { .. }
                | Self::MissingCredential { .. }
                | Self::Config(_)
        )
    }

    /// Whether retrying the same invocation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(err) if err.is_retryable())
    }
}

impl From<ProviderError> for QueryError {
    fn from(value: ProviderError) -> Self {
        match value {
            // The market service answering without the requested key is the
            // same user-facing condition as a locally rejected symbol.
            ProviderError::UnknownSymbol { symbol } => Self::UnknownSymbol { symbol },
            other => Self::Provider(other),
        }
    }
}

impl From<AddressParseError> for QueryError {
    fn from(value: AddressParseError) -> Self {
        Self::InvalidFormat {
            parameter: "address",
            message: value.to_string(),
        }
    }
}

impl From<TransactionHashParseError> for QueryError {
    fn from(value: TransactionHashParseError) -> Self {
        Self::InvalidFormat {
            parameter: "transaction hash",
            message: value.to_string(),
        }
    }
}

impl From<BlockTagParseError> for QueryError {
    fn from(value: BlockTagParseError) -> Self {
        Self::InvalidFormat {
            parameter: "block tag",
            message: value.to_string(),
        }
    }
}

impl From<SortOrderParseError> for QueryError {
    fn from(value: SortOrderParseError) -> Self {
        Self::InvalidValue {
            parameter: "sort order",
            message: value.to_string(),
        }
    }
}

impl From<LimitOutOfRange> for QueryError {
    fn from(value: LimitOutOfRange) -> Self {
        Self::OutOfRange {
            parameter: "limit",
            message: value.to_string(),
        }
    }
}

impl From<UnknownCoinError> for QueryError {
    fn from(value: UnknownCoinError) -> Self {
        Self::UnknownSymbol {
            symbol: value.input,
        }
    }
}

impl From<UnknownCurrencyError> for QueryError {
    fn from(value: UnknownCurrencyError) -> Self {
        Self::UnknownSymbol {
            symbol: value.input,
        }
    }
}
