// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for credential persistence

use thiserror::Error;

/// Failures while persisting credentials.
///
/// Reading is total and never surfaces here; see
/// [`CredentialStore::load`](crate::CredentialStore::load).
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// What failed and why.
        message: String,
    },

    /// The credential record could not be serialized.
    #[error("serialization error: {message}")]
    Serialize {
        /// The serializer's reason.
        message: String,
    },

    /// No user configuration directory exists on this platform.
    #[error("no user configuration directory available")]
    NoConfigDir,
}

impl CredentialStoreError {
    /// Create an I/O error.
    pub fn io<T: ToString>(message: T) -> Self {
        Self::Io {
            message: message.to_string(),
        }
    }

    /// Create a serialization error.
    pub fn serialize<T: ToString>(message: T) -> Self {
        Self::Serialize {
            message: message.to_string(),
        }
    }
}
