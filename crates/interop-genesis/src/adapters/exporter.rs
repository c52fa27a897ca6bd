//! # Genesis Exporter
//!
//! Writes the committed genesis state and the provisioned validator keys.
//!
//! ## Output Layout
//!
//! ```text
//! <output_root>/
//! ├── genesis.json          field-name → value tree, bytes as 0x-hex
//! └── keys/
//!     ├── v0000000.privkey  decimal private key
//!     └── v0000003.privkey
//! ```
//!
//! Writes go straight to the final path. A failure partway through can leave a
//! truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use genesis_types::{BeaconBlockHeader, Eth1Data, Fork, GenesisState, Validator};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::domain::CommittedGenesis;
use crate::error::{BootstrapError, FsOperation, Result};
use crate::provisioner::ProvisionedKey;
use crate::{GENESIS_FILE, KEYS_DIR};

/// Writes bootstrap outputs under one output root.
#[derive(Debug, Clone)]
pub struct GenesisExporter {
    output_root: PathBuf,
}

impl GenesisExporter {
    /// Exporter rooted at `output_root`.
    pub fn new(output_root: impl AsRef<Path>) -> Self {
        Self {
            output_root: output_root.as_ref().to_path_buf(),
        }
    }

    /// Path of the genesis file.
    pub fn genesis_file(&self) -> PathBuf {
        self.output_root.join(GENESIS_FILE)
    }

    /// Path of the keys directory.
    pub fn keys_dir(&self) -> PathBuf {
        self.output_root.join(KEYS_DIR)
    }

    /// Write the genesis state, replacing any previous file.
    pub fn write_genesis(&self, genesis: &CommittedGenesis) -> Result<PathBuf> {
        let path = self.genesis_file();
        let rendered = serde_json::to_string_pretty(&formatted_state(genesis.state()))
            .map_err(|e| {
                BootstrapError::filesystem(FsOperation::Write, &path, std::io::Error::other(e))
            })?;

        fs::write(&path, rendered)
            .map_err(|e| BootstrapError::filesystem(FsOperation::Write, &path, e))?;

        info!("Saved genesis state to {}", path.display());
        Ok(path)
    }

    /// Write one key file per provisioned validator into the keys directory.
    pub fn write_validator_keys(&self, keys: &[ProvisionedKey]) -> Result<Vec<PathBuf>> {
        let keys_dir = self.keys_dir();

        keys.iter()
            .map(|key| {
                let path = keys_dir.join(key.index.key_file_name());
                fs::write(&path, key.private_key.to_decimal_string())
                    .map_err(|e| BootstrapError::filesystem(FsOperation::Write, &path, e))?;
                debug!("Wrote key for validator {} to {}", key.index, path.display());
                Ok(path)
            })
            .collect()
    }
}

fn hex_bytes(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}

fn formatted_fork(fork: &Fork) -> Value {
    json!({
        "previous_version": hex_bytes(&fork.previous_version),
        "current_version": hex_bytes(&fork.current_version),
        "epoch": fork.epoch,
    })
}

fn formatted_header(header: &BeaconBlockHeader) -> Value {
    json!({
        "slot": header.slot,
        "parent_root": hex_bytes(&header.parent_root),
        "state_root": hex_bytes(&header.state_root),
        "body_root": hex_bytes(&header.body_root),
    })
}

fn formatted_eth1_data(eth1_data: &Eth1Data) -> Value {
    json!({
        "deposit_root": hex_bytes(&eth1_data.deposit_root),
        "deposit_count": eth1_data.deposit_count,
        "block_hash": hex_bytes(&eth1_data.block_hash),
    })
}

fn formatted_validator(validator: &Validator) -> Value {
    json!({
        "pubkey": hex_bytes(&validator.pubkey),
        "withdrawal_credentials": hex_bytes(&validator.withdrawal_credentials),
        "effective_balance": validator.effective_balance,
        "slashed": validator.slashed,
        "activation_epoch": validator.activation_epoch,
        "exit_epoch": validator.exit_epoch,
    })
}

/// Human-inspectable field-name → value tree of a genesis state.
pub fn formatted_state(state: &GenesisState) -> Value {
    json!({
        "genesis_time": state.genesis_time,
        "slot": state.slot,
        "fork": formatted_fork(&state.fork),
        "latest_block_header": formatted_header(&state.latest_block_header),
        "eth1_data": formatted_eth1_data(&state.eth1_data),
        "validators": state.validators.iter().map(formatted_validator).collect::<Vec<_>>(),
        "balances": state.balances,
        "randao_mix": hex_bytes(&state.randao_mix),
    })
}
