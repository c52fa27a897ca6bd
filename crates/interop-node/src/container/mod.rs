//! # Node Container
//!
//! Host configuration shared by the subcommands.

pub mod config;

pub use config::{GenesisConfig, NetworkConfig, NodeConfig, StorageConfig};
