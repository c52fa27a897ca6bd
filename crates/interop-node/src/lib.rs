//! # Interop Node
//!
//! Host side of the interop genesis bootstrap.
//!
//! ## Startup Sequence
//!
//! 1. Load node configuration (defaults, then environment)
//! 2. Apply command-line flags
//! 3. Run the bootstrap pipeline
//! 4. Print the genesis root
//! 5. Switch networking into interop mode
//!
//! ## Modular Structure
//!
//! - `cli/` - clap definitions and flag merging
//! - `container/` - node configuration

pub mod cli;
pub mod container;

pub use cli::{Cli, Command, InteropArgs, StartTimeArgs, TemplateArgs};
pub use container::NodeConfig;
