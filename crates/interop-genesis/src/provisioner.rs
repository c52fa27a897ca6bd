//! # Validator Key Provisioning
//!
//! Resolves the requested validators against the keystore.
//!
//! ## Order of Checks
//!
//! 1. Tokenize; any non-integer token aborts
//! 2. Range-check every index; the first out-of-range index aborts
//! 3. Look up each index; a miss aborts
//!
//! Nothing is looked up until the whole list is valid, and nothing is written here.

use tracing::{info, warn};

use crate::domain::{select_validators, PrivateKey, ValidatorIndex};
use crate::error::{BootstrapError, Result};
use crate::ports::Keystore;

/// A validator whose key will be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedKey {
    /// Keystore index
    pub index: ValidatorIndex,
    /// Key written to the validator's key file
    pub private_key: PrivateKey,
}

/// Resolves validator selections against a keystore.
pub struct ValidatorKeyProvisioner<K> {
    keystore: K,
}

impl<K: Keystore> ValidatorKeyProvisioner<K> {
    /// Create a provisioner over `keystore`.
    pub fn new(keystore: K) -> Self {
        Self { keystore }
    }

    /// Provision the validators named in `raw` (comma-separated), in input order.
    pub fn provision(&self, raw: Option<&str>) -> Result<Vec<ProvisionedKey>> {
        let selected = select_validators(raw, self.keystore.len())?;

        if selected.is_empty() {
            warn!("Not running any validators");
            return Ok(Vec::new());
        }

        let provisioned = selected
            .iter()
            .map(|&index| {
                self.keystore
                    .lookup(index)
                    .map(|record| ProvisionedKey {
                        index,
                        private_key: record.private_key.clone(),
                    })
                    .ok_or(BootstrapError::KeyNotFound { index: index.get() })
            })
            .collect::<Result<Vec<_>>>()?;

        let listed: Vec<u64> = selected.iter().map(|i| i.get()).collect();
        info!("Validating: {:?}", listed);

        Ok(provisioned)
    }
}
