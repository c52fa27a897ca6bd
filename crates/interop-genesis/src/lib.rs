//! # Interop Genesis
//!
//! Deterministic genesis bootstrap for interop test networks.
//!
//! ## Purpose
//!
//! Independently started nodes must derive byte-identical genesis state before
//! they can run together. Given the same template and the same start time, this
//! crate produces the same state and the same root on every machine.
//!
//! ## Pipeline
//!
//! ```text
//! Start ──→ TimeResolved ──→ StateCommitted ──→ DirectoryPrepared ──→ KeysProvisioned ──→ Exported
//!   │            │                 │                    │                    │
//!   └────────────┴─────────────────┴────────────────────┴────────────────────┴──→ Aborted(ErrorKind)
//! ```
//!
//! 1. Resolve the start time from an absolute timestamp or a delay
//! 2. Decode the template and commit it with the resolved time
//! 3. Parse, range-check and look up the requested validators (no I/O yet)
//! 4. Optionally wipe chain data, then always recreate the keys directory
//! 5. Write per-validator key files and the genesis file
//!
//! Every validation step runs before the first destructive filesystem call.
//!
//! ## Module Structure
//!
//! - [`domain`]: pure logic (time resolution, validator selection, commitment)
//! - [`ports`]: keystore and clock seams
//! - [`adapters`]: filesystem, keystore asset and clock implementations
//! - [`service`]: the orchestrator and library entry point

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Filesystem, keystore and clock adapters
pub mod adapters;
/// Pure domain logic
pub mod domain;
/// Hexagonal ports
pub mod ports;
/// Validator key provisioning
pub mod provisioner;
/// Pipeline orchestration
pub mod service;

mod config;
mod error;

pub use config::{BootstrapConfig, TimeSpec};
pub use error::{BootstrapError, ErrorKind, FsOperation, Result};

pub use adapters::{
    BootstrapDirectoryManager, FixedClock, GenesisExporter, GenesisTemplateLoader,
    StaticKeystore, SystemClock,
};
pub use domain::{
    resolve_genesis_time, select_validators, CommittedGenesis, KeyRecord, PrivateKey,
    ResolvedGenesisTime, ValidatorIndex,
};
pub use ports::{Clock, Keystore};
pub use provisioner::{ProvisionedKey, ValidatorKeyProvisioner};
pub use service::{
    bootstrap_genesis, BootstrapReport, BootstrapStage, GenesisBootstrapper, InteropOverrides,
    TrackingBackend,
};

/// Name of the genesis file written under the output root.
pub const GENESIS_FILE: &str = "genesis.json";

/// Subdirectory of the output root holding per-validator key files.
pub const KEYS_DIR: &str = "keys";

/// Subdirectory of the output root holding chain data (wiped on request).
pub const CHAIN_DATA_DIR: &str = "chain";

/// Zero-padded width of the validator index in key file names.
pub const KEY_FILE_INDEX_WIDTH: usize = 7;

/// Extension of per-validator key files.
pub const KEY_FILE_EXTENSION: &str = "privkey";

/// Default location of the canonical genesis template.
pub const DEFAULT_GENESIS_TEMPLATE_PATH: &str = "genesis.bin";

/// Name of the 16-validator interop keystore compiled into this crate.
pub const SHIPPED_KEYSTORE_NAME: &str = "keygen_16_validators.json";

/// Contents of the shipped keystore, used when no keystore path is configured.
pub const SHIPPED_KEYSTORE_JSON: &str = include_str!("../assets/keygen_16_validators.json");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keystore_is_shipped() {
        let keystore = StaticKeystore::shipped().unwrap();
        assert_eq!(keystore.len(), 16);
    }
}
