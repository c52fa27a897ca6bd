//! # Adapters
//!
//! Everything that touches the clock or the filesystem.
//!
//! - `keystore` - shipped key asset, loaded once
//! - `clock` - system and fixed clocks
//! - `template` - canonical template reader/writer
//! - `directories` - output directory lifecycle (wipe, keys reset)
//! - `exporter` - genesis file and key file writers

pub mod clock;
pub mod directories;
pub mod exporter;
pub mod keystore;
pub mod template;

pub use clock::{FixedClock, SystemClock};
pub use directories::BootstrapDirectoryManager;
pub use exporter::GenesisExporter;
pub use keystore::StaticKeystore;
pub use template::GenesisTemplateLoader;
