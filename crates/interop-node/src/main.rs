//! # Interop Node
//!
//! Entry point. See the library crate for the startup sequence.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use genesis_types::{hash_tree_root, GenesisState};
use interop_genesis::{
    GenesisBootstrapper, GenesisTemplateLoader, StaticKeystore, SystemClock, SHIPPED_KEYSTORE_NAME,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use interop_node::{Cli, Command, InteropArgs, NodeConfig, TemplateArgs};

fn run_interop(args: &InteropArgs, mut config: NodeConfig) -> Result<()> {
    args.apply_to(&mut config);
    let bootstrap = args
        .bootstrap_config(&config)
        .context("Invalid interop options")?;

    let keystore = StaticKeystore::open(bootstrap.keystore_path.as_deref())
        .context("Failed to load validator keystore")?;
    let report = GenesisBootstrapper::new(keystore, SystemClock)
        .run(&bootstrap)
        .context("Interop bootstrap failed")?;

    config.apply_interop_overrides(&report.overrides);
    info!(
        discovery = config.network.discovery_enabled,
        upnp = config.network.upnp_enabled,
        tracking = ?config.network.tracking_backend,
        "Networking switched to interop mode"
    );
    info!("Data Dir: {:?}", config.storage.data_dir);
    info!("P2P Port: {}", config.network.p2p_port);

    println!("{}", report.genesis_root_hex());
    Ok(())
}

fn run_template(args: &TemplateArgs, config: &NodeConfig) -> Result<()> {
    let keystore_path = args.keystore_path(config);
    let keystore = StaticKeystore::open(keystore_path.as_deref())
        .context("Failed to load validator keystore")?;
    let pubkeys = keystore.pubkeys().ok_or_else(|| {
        let label = keystore_path
            .as_deref()
            .map_or_else(|| SHIPPED_KEYSTORE_NAME.to_string(), |path| path.display().to_string());
        anyhow!("Keystore {label} has records without a pubkey")
    })?;

    let state = GenesisState::mock_interop(&pubkeys, args.genesis_time);
    GenesisTemplateLoader::write(&args.output, &state)
        .context("Failed to write genesis template")?;

    println!("0x{}", hex::encode(hash_tree_root(&state)));
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    // Load configuration
    let config = NodeConfig::from_env();

    match cli.command {
        Command::Interop(args) => run_interop(&args, config),
        Command::Template(args) => run_template(&args, &config),
    }
}
