//! # Bootstrap Orchestrator
//!
//! Sequences the pipeline and reports the genesis root.
//!
//! ## Stages
//!
//! | Stage | Reached after |
//! |---|---|
//! | `TimeResolved` | start time validated |
//! | `StateCommitted` | template decoded, time overridden, root computed |
//! | `DirectoryPrepared` | validator selection resolved; chain data wiped (if asked); keys dir reset |
//! | `KeysProvisioned` | key files written |
//! | `Exported` | genesis file written |
//!
//! The first failure moves to `Aborted(kind)` and nothing after it runs.
//! The filesystem is first touched at `DirectoryPrepared`, after every input
//! has been validated.

use std::fmt;
use std::path::PathBuf;

use genesis_types::Hash;
use tracing::{error, info};

use crate::adapters::{
    BootstrapDirectoryManager, GenesisExporter, GenesisTemplateLoader, StaticKeystore, SystemClock,
};
use crate::config::BootstrapConfig;
use crate::domain::{resolve_genesis_time, CommittedGenesis, ValidatorIndex};
use crate::error::{ErrorKind, Result};
use crate::ports::{Clock, Keystore};
use crate::provisioner::ValidatorKeyProvisioner;

/// Pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    /// Nothing done yet
    Start,
    /// Start time validated
    TimeResolved,
    /// Final state and root computed
    StateCommitted,
    /// Output directories ready
    DirectoryPrepared,
    /// Key files written
    KeysProvisioned,
    /// Genesis file written (terminal success)
    Exported,
    /// Terminal failure
    Aborted(ErrorKind),
}

impl BootstrapStage {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exported | Self::Aborted(_))
    }
}

impl fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted(kind) => write!(f, "Aborted({kind:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// How the host should track peers while in interop mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingBackend {
    /// Persist peer records
    #[default]
    Sqlite,
    /// Keep peer records in memory only
    Memory,
    /// Do not track peers
    DoNotTrack,
}

/// Host-side settings to apply once the bootstrap succeeds.
///
/// The pipeline never acts on these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteropOverrides {
    /// Turn off peer discovery
    pub disable_discovery: bool,
    /// Turn off UPnP port mapping
    pub disable_upnp: bool,
    /// Peer tracking backend to use
    pub tracking_backend: TrackingBackend,
}

impl InteropOverrides {
    /// The fixed interop-mode settings.
    pub const INTEROP: Self = Self {
        disable_discovery: true,
        disable_upnp: true,
        tracking_backend: TrackingBackend::DoNotTrack,
    };
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// Root over the exported genesis state
    pub genesis_root: Hash,
    /// Genesis time baked into the state
    pub genesis_time: u64,
    /// Provisioned validators, in request order
    pub validators: Vec<ValidatorIndex>,
    /// Written genesis file
    pub genesis_file: PathBuf,
    /// Written key files, in request order
    pub key_files: Vec<PathBuf>,
    /// Settings for the host to apply
    pub overrides: InteropOverrides,
}

impl BootstrapReport {
    /// `0x`-prefixed hex of the genesis root.
    pub fn genesis_root_hex(&self) -> String {
        format!("0x{}", hex::encode(self.genesis_root))
    }
}

/// Runs the bootstrap pipeline against an injected keystore and clock.
pub struct GenesisBootstrapper<K, C> {
    keystore: K,
    clock: C,
}

impl<K: Keystore, C: Clock> GenesisBootstrapper<K, C> {
    /// Create a bootstrapper.
    pub fn new(keystore: K, clock: C) -> Self {
        Self { keystore, clock }
    }

    /// Run the whole pipeline once.
    pub fn run(&self, config: &BootstrapConfig) -> Result<BootstrapReport> {
        let mut stage = BootstrapStage::Start;

        match self.execute(config, &mut stage) {
            Ok(report) => Ok(report),
            Err(err) => {
                let aborted = BootstrapStage::Aborted(err.kind());
                error!(failed_after = %stage, stage = %aborted, "Interop bootstrap aborted: {err}");
                Err(err)
            }
        }
    }

    fn execute(
        &self,
        config: &BootstrapConfig,
        stage: &mut BootstrapStage,
    ) -> Result<BootstrapReport> {
        info!("Configuring testnet");

        let resolved = resolve_genesis_time(self.clock.now(), config.time)?;
        *stage = BootstrapStage::TimeResolved;

        let template = GenesisTemplateLoader::new(&config.genesis_template_path).load()?;
        let genesis = CommittedGenesis::commit(&template, resolved.genesis_time);
        *stage = BootstrapStage::StateCommitted;

        let provisioned = ValidatorKeyProvisioner::new(&self.keystore)
            .provision(config.validators.as_deref())?;

        info!("Configuring {}", config.output_root.display());
        BootstrapDirectoryManager::new(&config.chain_data_dir, config.keys_dir())
            .prepare(config.wipe_chain_data)?;
        *stage = BootstrapStage::DirectoryPrepared;

        let exporter = GenesisExporter::new(&config.output_root);
        let key_files = exporter.write_validator_keys(&provisioned)?;
        *stage = BootstrapStage::KeysProvisioned;

        let genesis_file = exporter.write_genesis(&genesis)?;
        *stage = BootstrapStage::Exported;

        Ok(BootstrapReport {
            genesis_root: genesis.root(),
            genesis_time: genesis.genesis_time(),
            validators: provisioned.iter().map(|key| key.index).collect(),
            genesis_file,
            key_files,
            overrides: InteropOverrides::INTEROP,
        })
    }
}

/// Library entry point: load the keystore named in `config` (or the built-in
/// one), use the wall clock, run the pipeline and return the genesis root.
pub fn bootstrap_genesis(config: &BootstrapConfig) -> Result<Hash> {
    let keystore = StaticKeystore::open(config.keystore_path.as_deref())?;
    let report = GenesisBootstrapper::new(keystore, SystemClock).run(config)?;
    Ok(report.genesis_root)
}
