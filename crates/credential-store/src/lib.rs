// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Durable storage for the tool's Ethereum address and API keys
//!
//! Credentials are the only state this tool persists: a default account
//! address, the node-provider API key, and the block-explorer API key. Each
//! field is independently optional and independently settable; queries read
//! the store at startup and treat a missing required field as its own error
//! rather than inventing a default.
//!
//! The store is a single JSON file at a well-known location. Writes go to a
//! temporary file in the same directory and are renamed over the previous
//! file, so a crash mid-write can never corrupt fields that were already
//! stored and a concurrent reader can never observe a half-written record.
//!
//! Key material never leaves the store in the clear: `Debug` output redacts
//! it and the read-back view reports only whether each key is configured.

mod error;
mod store;

pub use error::CredentialStoreError;
pub use store::{CredentialStatus, CredentialStore, Credentials, CredentialsUpdate};
