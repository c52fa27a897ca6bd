//! # Node Configuration
//!
//! Host-side settings the bootstrap reads from and the interop overrides
//! write into.
//!
//! ## Precedence
//!
//! 1. Defaults
//! 2. Environment (`QC_DATA_DIR`, `QC_GENESIS_PATH`, `QC_KEYSTORE_PATH`)
//! 3. Command-line flags (applied by the CLI layer)

use std::path::PathBuf;

use interop_genesis::{
    InteropOverrides, TrackingBackend, CHAIN_DATA_DIR, DEFAULT_GENESIS_TEMPLATE_PATH,
};
use tracing::info;

/// Environment variable overriding [`StorageConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "QC_DATA_DIR";
/// Environment variable overriding [`GenesisConfig::template_path`].
pub const ENV_GENESIS_PATH: &str = "QC_GENESIS_PATH";
/// Environment variable overriding [`GenesisConfig::keystore_path`].
pub const ENV_KEYSTORE_PATH: &str = "QC_KEYSTORE_PATH";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Genesis inputs.
    pub genesis: GenesisConfig,
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            info!("Using data dir from {ENV_DATA_DIR}: {dir}");
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(ENV_GENESIS_PATH) {
            config.genesis.template_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_KEYSTORE_PATH) {
            config.genesis.keystore_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Switch the network layer into interop mode.
    pub fn apply_interop_overrides(&mut self, overrides: &InteropOverrides) {
        if overrides.disable_discovery {
            self.network.discovery_enabled = false;
        }
        if overrides.disable_upnp {
            self.network.upnp_enabled = false;
        }
        self.network.tracking_backend = overrides.tracking_backend;
    }
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// P2P listening port.
    pub p2p_port: u16,
    /// Peer discovery.
    pub discovery_enabled: bool,
    /// UPnP port mapping.
    pub upnp_enabled: bool,
    /// Where peer records are kept.
    pub tracking_backend: TrackingBackend,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            p2p_port: 30303,
            discovery_enabled: true,
            upnp_enabled: true,
            tracking_backend: TrackingBackend::default(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root of everything the node writes (genesis file, keys, chain data).
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Chain database directory beneath the data dir.
    pub fn chain_data_dir(&self) -> PathBuf {
        self.data_dir.join(CHAIN_DATA_DIR)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Genesis inputs.
#[derive(Debug, Clone)]
pub struct GenesisConfig {
    /// Canonical-encoded genesis template.
    pub template_path: PathBuf,
    /// Validator keystore asset. `None` uses the keystore built into the binary.
    pub keystore_path: Option<PathBuf>,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_GENESIS_TEMPLATE_PATH),
            keystore_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.network.p2p_port, 30303);
        assert!(config.network.discovery_enabled);
        assert!(config.network.upnp_enabled);
        assert_eq!(config.network.tracking_backend, TrackingBackend::Sqlite);
        assert_eq!(config.storage.chain_data_dir(), PathBuf::from("./data/chain"));
        assert_eq!(config.genesis.keystore_path, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = NodeConfig::from_lookup(|key| match key {
            ENV_DATA_DIR => Some("/srv/node".to_string()),
            ENV_KEYSTORE_PATH => Some("/etc/keys.json".to_string()),
            _ => None,
        });

        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/node"));
        assert_eq!(
            config.genesis.keystore_path,
            Some(PathBuf::from("/etc/keys.json"))
        );
        assert_eq!(
            config.genesis.template_path,
            PathBuf::from(DEFAULT_GENESIS_TEMPLATE_PATH)
        );
    }

    #[test]
    fn test_apply_interop_overrides() {
        let mut config = NodeConfig::default();
        config.apply_interop_overrides(&InteropOverrides::INTEROP);

        assert!(!config.network.discovery_enabled);
        assert!(!config.network.upnp_enabled);
        assert_eq!(config.network.tracking_backend, TrackingBackend::DoNotTrack);
    }
}
