//! Bootstrap configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};
use crate::{
    CHAIN_DATA_DIR, DEFAULT_GENESIS_TEMPLATE_PATH, GENESIS_FILE, KEYS_DIR,
};

/// When genesis begins.
///
/// The host guarantees at most one source; [`TimeSpec::from_options`] enforces it
/// for callers that do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpec {
    /// Absolute UNIX timestamp; must be strictly in the future
    Absolute(u64),
    /// Seconds from now; must not be negative
    Delay(i64),
}

impl TimeSpec {
    /// Build from mutually exclusive `--start-time` / `--start-delay` style options.
    pub fn from_options(start_time: Option<u64>, start_delay: Option<i64>) -> Result<Self> {
        match (start_time, start_delay) {
            (Some(timestamp), None) => Ok(Self::Absolute(timestamp)),
            (None, Some(delay)) => Ok(Self::Delay(delay)),
            (Some(_), Some(_)) => Err(BootstrapError::Configuration(
                "start time and start delay are mutually exclusive".to_string(),
            )),
            (None, None) => Err(BootstrapError::Configuration(
                "neither a start time nor a start delay was given".to_string(),
            )),
        }
    }
}

/// Options for one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Start-time source. `None` aborts with a configuration error.
    pub time: Option<TimeSpec>,
    /// Comma-separated validator indices; absent or empty provisions nothing.
    pub validators: Option<String>,
    /// Destroy and recreate `chain_data_dir` before exporting.
    pub wipe_chain_data: bool,
    /// Canonical-encoded genesis template.
    pub genesis_template_path: PathBuf,
    /// Keystore asset (JSON array of key records). `None` uses the built-in keystore.
    pub keystore_path: Option<PathBuf>,
    /// Directory receiving the genesis file and the keys subdirectory.
    pub output_root: PathBuf,
    /// Chain database directory cleared by `wipe_chain_data`.
    pub chain_data_dir: PathBuf,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        let output_root = PathBuf::from("./data");
        Self {
            time: None,
            validators: None,
            wipe_chain_data: false,
            genesis_template_path: PathBuf::from(DEFAULT_GENESIS_TEMPLATE_PATH),
            keystore_path: None,
            chain_data_dir: output_root.join(CHAIN_DATA_DIR),
            output_root,
        }
    }
}

impl BootstrapConfig {
    /// Point the output root (and the chain data dir beneath it) somewhere else.
    #[must_use]
    pub fn with_output_root(mut self, output_root: impl AsRef<Path>) -> Self {
        self.output_root = output_root.as_ref().to_path_buf();
        self.chain_data_dir = self.output_root.join(CHAIN_DATA_DIR);
        self
    }

    /// Where the genesis file is written.
    pub fn genesis_file(&self) -> PathBuf {
        self.output_root.join(GENESIS_FILE)
    }

    /// Where per-validator key files are written.
    pub fn keys_dir(&self) -> PathBuf {
        self.output_root.join(KEYS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_spec_from_options() {
        assert_eq!(
            TimeSpec::from_options(Some(1_700_000_000), None).unwrap(),
            TimeSpec::Absolute(1_700_000_000)
        );
        assert_eq!(TimeSpec::from_options(None, Some(-5)).unwrap(), TimeSpec::Delay(-5));
    }

    #[test]
    fn test_time_spec_requires_exactly_one_source() {
        assert!(matches!(
            TimeSpec::from_options(None, None),
            Err(BootstrapError::Configuration(_))
        ));
        assert!(matches!(
            TimeSpec::from_options(Some(1), Some(1)),
            Err(BootstrapError::Configuration(_))
        ));
    }

    #[test]
    fn test_with_output_root_moves_chain_data() {
        let config = BootstrapConfig::default().with_output_root("/srv/node");
        assert_eq!(config.chain_data_dir, PathBuf::from("/srv/node/chain"));
        assert_eq!(config.keys_dir(), PathBuf::from("/srv/node/keys"));
        assert_eq!(config.genesis_file(), PathBuf::from("/srv/node/genesis.json"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: BootstrapConfig =
            serde_json::from_str(r#"{"time": {"delay": 10}, "validators": "0,1"}"#).unwrap();

        assert_eq!(config.time, Some(TimeSpec::Delay(10)));
        assert_eq!(config.validators.as_deref(), Some("0,1"));
        assert!(!config.wipe_chain_data);
        assert_eq!(config.keystore_path, None);
    }
}
