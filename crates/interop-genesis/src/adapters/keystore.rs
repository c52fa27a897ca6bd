//! # Keystore Asset
//!
//! The interop keystore is a JSON array of records, one per validator index:
//!
//! ```json
//! [{ "privkey": "0x2529…", "pubkey": "0xa99a…" }]
//! ```
//!
//! `privkey` is required; `pubkey` is optional. The file is read once and the
//! table never changes afterwards.
//!
//! The 16-validator interop asset is compiled into the crate, so the default
//! keystore does not depend on where the binary runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::{pubkey_from_hex, KeyMaterialError, KeyRecord, PrivateKey, ValidatorIndex};
use crate::error::{BootstrapError, FsOperation, Result};
use crate::ports::Keystore;
use crate::{SHIPPED_KEYSTORE_JSON, SHIPPED_KEYSTORE_NAME};

#[derive(Debug, Deserialize)]
struct KeystoreEntry {
    privkey: String,
    #[serde(default)]
    pubkey: Option<String>,
}

impl KeystoreEntry {
    fn into_record(self) -> std::result::Result<KeyRecord, KeyMaterialError> {
        Ok(KeyRecord {
            private_key: PrivateKey::from_hex(&self.privkey)?,
            pubkey: self.pubkey.as_deref().map(pubkey_from_hex).transpose()?,
        })
    }
}

/// Immutable keystore table; index `i` is record `i`.
#[derive(Debug, Clone, Default)]
pub struct StaticKeystore {
    records: Vec<KeyRecord>,
}

impl StaticKeystore {
    /// Build from records already in memory.
    pub fn from_records(records: Vec<KeyRecord>) -> Self {
        Self { records }
    }

    /// The embedded interop keystore.
    pub fn shipped() -> Result<Self> {
        Self::parse_json(SHIPPED_KEYSTORE_NAME, SHIPPED_KEYSTORE_JSON)
    }

    /// Load from `path`, or fall back to the embedded interop keystore.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_json(path),
            None => {
                let keystore = Self::shipped()?;
                info!("Loaded {} built-in interop validator keys", keystore.len());
                Ok(keystore)
            }
        }
    }

    /// Read and parse a keystore asset.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BootstrapError::filesystem(FsOperation::Read, path, e))?;
        let keystore = Self::parse_json(path, &contents)?;

        info!(
            "Loaded {} validator keys from {}",
            keystore.len(),
            path.display()
        );
        Ok(keystore)
    }

    /// Parse keystore JSON; `path` only labels errors.
    pub fn parse_json(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let path = path.into();
        let entries: Vec<KeystoreEntry> =
            serde_json::from_str(contents).map_err(|e| BootstrapError::Keystore {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                entry.into_record().map_err(|e| BootstrapError::Keystore {
                    path: path.clone(),
                    reason: format!("record {position}: {e}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Public keys of every record, in index order. `None` if any record lacks one.
    pub fn pubkeys(&self) -> Option<Vec<genesis_types::BlsPubkey>> {
        self.records.iter().map(|record| record.pubkey).collect()
    }
}

impl Keystore for StaticKeystore {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn lookup(&self, index: ValidatorIndex) -> Option<&KeyRecord> {
        self.records.get(index.as_usize())
    }
}
