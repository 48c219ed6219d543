// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query orchestration over the provider clients and the credential store
//!
//! [`QueryEngine`] is the façade the CLI calls, one method per operation. It
//! owns the common pre-flight path (effective-parameter resolution against
//! the stored credentials, validation, credential checks) and the result
//! normalization the services do not provide themselves, like re-sorting and
//! truncating history listings. It never retries: one provider call per
//! invocation, with the retryable flag left on the error for the caller.
//!
//! [`QueryError`] is the complete failure taxonomy. Everything the user can
//! fix locally (`InvalidFormat`, `OutOfRange`, `InvalidValue`,
//! `UnknownSymbol`, `MissingParameter`, `MissingCredential`) is produced
//! before any network I/O; provider failures pass through with their
//! retryability intact.

mod config;
mod engine;
mod error;
mod report;

pub use config::{DEFAULT_TIMEOUT_SECONDS, EngineConfig};
pub use engine::QueryEngine;
pub use error::QueryError;
pub use report::{BalanceReport, HistoryReport, NonceReport, TransactionReport};
