//! # Bootstrap Directories
//!
//! Lifecycle of the output tree:
//!
//! - chain data: removed and recreated only when a wipe is requested
//! - keys: removed and recreated on every run, so its contents always match
//!   the current validator selection
//!
//! A directory that is already absent counts as removed. Any other failure aborts.
//!
//! Concurrent runs against the same output root are not coordinated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{BootstrapError, FsOperation, Result};

/// Owns the chain data and keys directories of one output root.
#[derive(Debug, Clone)]
pub struct BootstrapDirectoryManager {
    chain_data_dir: PathBuf,
    keys_dir: PathBuf,
}

impl BootstrapDirectoryManager {
    /// Manager for the given chain data and keys directories.
    pub fn new(chain_data_dir: impl AsRef<Path>, keys_dir: impl AsRef<Path>) -> Self {
        Self {
            chain_data_dir: chain_data_dir.as_ref().to_path_buf(),
            keys_dir: keys_dir.as_ref().to_path_buf(),
        }
    }

    /// Optionally wipe chain data, then reset the keys directory.
    pub fn prepare(&self, wipe_chain_data: bool) -> Result<()> {
        if wipe_chain_data {
            self.wipe_chain_data()?;
        }
        self.reset_keys_dir()
    }

    /// Destroy the chain data directory and recreate it empty.
    pub fn wipe_chain_data(&self) -> Result<()> {
        info!("Blowing away the database: {}", self.chain_data_dir.display());
        recreate_empty(&self.chain_data_dir)
    }

    /// Destroy the keys directory (if any) and recreate it empty.
    pub fn reset_keys_dir(&self) -> Result<()> {
        debug!("Resetting keys directory {}", self.keys_dir.display());
        recreate_empty(&self.keys_dir)
    }

    /// Keys directory.
    pub fn keys_dir(&self) -> &Path {
        &self.keys_dir
    }

    /// Chain data directory.
    pub fn chain_data_dir(&self) -> &Path {
        &self.chain_data_dir
    }
}

fn recreate_empty(dir: &Path) -> Result<()> {
    remove_dir_if_present(dir)?;
    fs::create_dir_all(dir).map_err(|e| BootstrapError::filesystem(FsOperation::CreateDir, dir, e))
}

/// Recursively remove `dir`. Returns `false` if it did not exist.
fn remove_dir_if_present(dir: &Path) -> Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // there's nothing to wipe, that's fine
            Ok(false)
        }
        Err(e) => Err(BootstrapError::filesystem(FsOperation::RemoveDir, dir, e)),
    }
}
