// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The credential record and its on-disk store

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::CredentialStoreError;

/// Directory under the user configuration root.
const STORE_DIR: &str = "ethq";

/// File name of the credential record.
const STORE_FILE: &str = "credentials.json";

/// The persisted credential record.
///
/// All fields are optional; a fresh store is empty. `Debug` redacts key
/// material.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Default account address for queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Node-provider API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_key: Option<String>,
    /// Block-explorer API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_key: Option<String>,
}

/// A partial credential update; only present fields are applied.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialsUpdate {
    /// New default address, if provided.
    pub address: Option<Address>,
    /// New node-provider key, if provided.
    pub node_key: Option<String>,
    /// New block-explorer key, if provided.
    pub scan_key: Option<String>,
}

/// Read-back view of the store with key material masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialStatus {
    /// Stored default address, if any.
    pub address: Option<Address>,
    /// Whether a node-provider key is configured.
    pub node_key_set: bool,
    /// Whether a block-explorer key is configured.
    pub scan_key_set: bool,
}

impl Credentials {
    /// The masked view used by every read-back path.
    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            address: self.address,
            node_key_set: self.node_key.is_some(),
            scan_key_set: self.scan_key.is_some(),
        }
    }

    fn merge(&mut self, update: CredentialsUpdate) {
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(node_key) = update.node_key {
            self.node_key = Some(node_key);
        }
        if let Some(scan_key) = update.scan_key {
            self.scan_key = Some(scan_key);
        }
    }
}

impl CredentialsUpdate {
    /// Whether the update carries no fields at all.
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.node_key.is_none() && self.scan_key.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .field("node_key", &self.node_key.as_ref().map(|_| "<redacted>"))
            .field("scan_key", &self.scan_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for CredentialsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsUpdate")
            .field("address", &self.address)
            .field("node_key", &self.node_key.as_ref().map(|_| "<redacted>"))
            .field("scan_key", &self.scan_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// File-backed credential store with merge-on-update semantics.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// A store backed by `path`. The file need not exist yet.
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The store at its well-known location under the user configuration
    /// directory.
    pub fn at_default_location() -> Result<Self, CredentialStoreError> {
        let base = dirs::config_dir().ok_or(CredentialStoreError::NoConfigDir)?;
        Ok(Self::new(base.join(STORE_DIR).join(STORE_FILE)))
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current record.
    ///
    /// Total: a missing file is an empty record, and an unreadable one is
    /// logged and treated as empty rather than failing every query.
    pub fn load(&self) -> Credentials {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential store yet");
                return Credentials::default();
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "credential store unreadable, treating as empty"
                );
                return Credentials::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credentials) => credentials,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "credential store corrupt, treating as empty"
                );
                Credentials::default()
            }
        }
    }

    /// Merge `update` into the stored record and persist the result.
    ///
    /// An empty update is a read-only echo of the current state and performs
    /// no write. Returns the full record after the merge.
    pub fn update(
        &self,
        update: CredentialsUpdate,
    ) -> Result<Credentials, CredentialStoreError> {
        let mut credentials = self.load();
        if update.is_empty() {
            return Ok(credentials);
        }
        credentials.merge(update);
        self.persist(&credentials)?;
        info!(path = %self.path.display(), "credential store updated");
        Ok(credentials)
    }

    /// Write the record to a temporary file in the store's directory, then
    /// rename it over the previous file. A failed write leaves the previous
    /// record intact.
    fn persist(&self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        let parent = self.path.parent().ok_or_else(|| {
            CredentialStoreError::io(format!(
                "store path {} has no parent directory",
                self.path.display()
            ))
        })?;
        fs::create_dir_all(parent).map_err(|err| {
            CredentialStoreError::io(format!("creating {}: {err}", parent.display()))
        })?;

        let json = serde_json::to_string_pretty(credentials)
            .map_err(CredentialStoreError::serialize)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|err| {
            CredentialStoreError::io(format!("creating temp file in {}: {err}", parent.display()))
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|err| CredentialStoreError::io(format!("writing temp file: {err}")))?;
        tmp.persist(&self.path).map_err(|err| {
            CredentialStoreError::io(format!("replacing {}: {err}", self.path.display()))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::tempdir;

    use super::*;

    fn test_address() -> Address {
        Address::from_str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("credentials.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(), Credentials::default());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), Credentials::default());
    }

    #[test]
    fn update_persists_across_instances() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store
            .update(CredentialsUpdate {
                address: Some(test_address()),
                ..CredentialsUpdate::default()
            })
            .unwrap();

        let reopened = CredentialStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().address, Some(test_address()));
    }

    #[test]
    fn partial_update_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store
            .update(CredentialsUpdate {
                address: Some(test_address()),
                ..CredentialsUpdate::default()
            })
            .unwrap();

        store
            .update(CredentialsUpdate {
                node_key: Some("infura-key".to_owned()),
                ..CredentialsUpdate::default()
            })
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.address, Some(test_address()));
        assert_eq!(loaded.node_key.as_deref(), Some("infura-key"));
        assert_eq!(loaded.scan_key, None);
    }

    #[test]
    fn empty_update_is_a_read_only_echo() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let echoed = store.update(CredentialsUpdate::default()).unwrap();
        assert_eq!(echoed, Credentials::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn update_leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store
            .update(CredentialsUpdate {
                scan_key: Some("etherscan-key".to_owned()),
                ..CredentialsUpdate::default()
            })
            .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["credentials.json"]);
    }

    #[test]
    fn debug_output_redacts_key_material() {
        let credentials = Credentials {
            address: Some(test_address()),
            node_key: Some("super-secret".to_owned()),
            scan_key: Some("also-secret".to_owned()),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn status_masks_keys_to_booleans() {
        let credentials = Credentials {
            address: None,
            node_key: Some("super-secret".to_owned()),
            scan_key: None,
        };
        let status = credentials.status();
        assert!(status.node_key_set);
        assert!(!status.scan_key_set);
        assert_eq!(status.address, None);
    }

    #[test]
    fn stored_json_omits_absent_fields() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store
            .update(CredentialsUpdate {
                node_key: Some("infura-key".to_owned()),
                ..CredentialsUpdate::default()
            })
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("node_key"));
        assert!(!raw.contains("address"));
        assert!(!raw.contains("scan_key"));
    }
}
