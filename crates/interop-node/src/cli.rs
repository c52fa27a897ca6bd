//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use interop_genesis::{BootstrapConfig, TimeSpec};

use crate::container::NodeConfig;

/// Interop test network bootstrap
#[derive(Parser, Debug)]
#[command(name = "interop-node")]
#[command(about = "Bootstrap a deterministic genesis for an interop test network")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commit the genesis template, provision validator keys and export both
    Interop(InteropArgs),
    /// Write a mock genesis template built from the keystore pubkeys
    Template(TemplateArgs),
}

/// Exactly one start-time source.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct StartTimeArgs {
    /// Genesis time as a UNIX timestamp (must be in the future)
    #[arg(long, value_name = "UNIX")]
    pub start_time: Option<u64>,

    /// Genesis time as seconds from now
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub start_delay: Option<i64>,
}

/// Arguments of `interop`.
#[derive(Args, Debug, Clone)]
pub struct InteropArgs {
    #[command(flatten)]
    pub time: StartTimeArgs,

    /// Comma-separated validator indices to run, e.g. 0,3,7
    #[arg(long, value_name = "LIST")]
    pub validators: Option<String>,

    /// Delete the chain database before starting
    #[arg(long)]
    pub wipedb: bool,

    /// Node data directory [env: QC_DATA_DIR]
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Canonical-encoded genesis template [env: QC_GENESIS_PATH]
    #[arg(long, value_name = "FILE")]
    pub genesis: Option<PathBuf>,

    /// Validator keystore [env: QC_KEYSTORE_PATH]
    #[arg(long, value_name = "FILE")]
    pub keystore: Option<PathBuf>,
}

impl InteropArgs {
    /// Let flags win over whatever the environment configured.
    pub fn apply_to(&self, config: &mut NodeConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(path) = &self.genesis {
            config.genesis.template_path = path.clone();
        }
        if let Some(path) = &self.keystore {
            config.genesis.keystore_path = Some(path.clone());
        }
    }

    /// Bootstrap options for this invocation against an already merged node config.
    pub fn bootstrap_config(&self, config: &NodeConfig) -> interop_genesis::Result<BootstrapConfig> {
        let time = TimeSpec::from_options(self.time.start_time, self.time.start_delay)?;

        let mut bootstrap = BootstrapConfig::default().with_output_root(&config.storage.data_dir);
        bootstrap.time = Some(time);
        bootstrap.validators = self.validators.clone();
        bootstrap.wipe_chain_data = self.wipedb;
        bootstrap.genesis_template_path = config.genesis.template_path.clone();
        bootstrap.keystore_path = config.genesis.keystore_path.clone();
        bootstrap.chain_data_dir = config.storage.chain_data_dir();

        Ok(bootstrap)
    }
}

/// Arguments of `template`.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Where to write the encoded template
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Keystore whose pubkeys become the genesis validators [env: QC_KEYSTORE_PATH]
    #[arg(long, value_name = "FILE")]
    pub keystore: Option<PathBuf>,

    /// Genesis time baked into the template
    #[arg(long, value_name = "UNIX", default_value_t = 0)]
    pub genesis_time: u64,
}

impl TemplateArgs {
    /// Keystore to read, flag first, then node config. `None` means the built-in one.
    pub fn keystore_path(&self, config: &NodeConfig) -> Option<PathBuf> {
        self.keystore
            .clone()
            .or_else(|| config.genesis.keystore_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn interop(args: &[&str]) -> InteropArgs {
        let cli = Cli::try_parse_from(["interop-node", "interop"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Interop(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_start_delay_parsed() {
        let args = interop(&["--start-delay", "30", "--validators", "0,3", "--wipedb"]);
        assert_eq!(args.time.start_delay, Some(30));
        assert_eq!(args.time.start_time, None);
        assert_eq!(args.validators.as_deref(), Some("0,3"));
        assert!(args.wipedb);
    }

    #[test]
    fn test_negative_delay_reaches_core() {
        let args = interop(&["--start-delay", "-5"]);
        assert_eq!(args.time.start_delay, Some(-5));
    }

    #[test]
    fn test_time_flags_mutually_exclusive() {
        let err = Cli::try_parse_from([
            "interop-node",
            "interop",
            "--start-time",
            "1700000000",
            "--start-delay",
            "10",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_time_flag_required() {
        let err = Cli::try_parse_from(["interop-node", "interop"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_flags_override_environment() {
        let mut config = NodeConfig::default();
        config.storage.data_dir = PathBuf::from("/from/env");
        config.genesis.template_path = PathBuf::from("/from/env/genesis.bin");

        let args = interop(&["--start-time", "1700000000", "--data-dir", "/from/flag"]);
        args.apply_to(&mut config);
        let bootstrap = args.bootstrap_config(&config).unwrap();

        assert_eq!(bootstrap.output_root, PathBuf::from("/from/flag"));
        assert_eq!(bootstrap.chain_data_dir, PathBuf::from("/from/flag/chain"));
        assert_eq!(
            bootstrap.genesis_template_path,
            PathBuf::from("/from/env/genesis.bin")
        );
        assert_eq!(bootstrap.time, Some(TimeSpec::Absolute(1_700_000_000)));
        assert!(!bootstrap.wipe_chain_data);
    }

    #[test]
    fn test_template_defaults() {
        let cli = Cli::try_parse_from(["interop-node", "template", "--output", "out.bin"]).unwrap();
        let Command::Template(args) = cli.command else {
            panic!("expected template command");
        };
        assert_eq!(args.genesis_time, 0);
        assert_eq!(args.keystore_path(&NodeConfig::default()), None);
    }

    #[test]
    fn test_template_keystore_flag_wins() {
        let cli = Cli::try_parse_from([
            "interop-node",
            "template",
            "--output",
            "out.bin",
            "--keystore",
            "/from/flag.json",
        ])
        .unwrap();
        let Command::Template(args) = cli.command else {
            panic!("expected template command");
        };

        let mut config = NodeConfig::default();
        config.genesis.keystore_path = Some(PathBuf::from("/from/env.json"));

        assert_eq!(
            args.keystore_path(&config),
            Some(PathBuf::from("/from/flag.json"))
        );
    }
}
