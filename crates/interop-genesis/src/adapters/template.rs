//! Genesis template reader and writer.

use std::fs;
use std::path::{Path, PathBuf};

use genesis_types::{decode, encode, GenesisState};
use tracing::info;

use crate::error::{BootstrapError, FsOperation, Result};

/// Reads the canonical-encoded genesis template from a fixed path.
#[derive(Debug, Clone)]
pub struct GenesisTemplateLoader {
    path: PathBuf,
}

impl GenesisTemplateLoader {
    /// Loader for the template at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Template location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the template.
    pub fn load(&self) -> Result<GenesisState> {
        info!("Using genesis from {}", self.path.display());

        let encoded = fs::read(&self.path)
            .map_err(|e| BootstrapError::filesystem(FsOperation::Read, &self.path, e))?;

        Ok(decode(&encoded)?)
    }

    /// Encode `state` canonically and write it to `path`, replacing any existing file.
    pub fn write(path: impl AsRef<Path>, state: &GenesisState) -> Result<()> {
        let path = path.as_ref();
        let encoded = encode(state)?;

        fs::write(path, &encoded)
            .map_err(|e| BootstrapError::filesystem(FsOperation::Write, path, e))?;

        info!(
            "Wrote genesis template to {} ({} bytes)",
            path.display(),
            encoded.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("genesis.bin");
        let state = GenesisState::mock_interop(&[[0x05; 48]], 0);

        GenesisTemplateLoader::write(&path, &state).unwrap();
        let loaded = GenesisTemplateLoader::new(&path).load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_malformed_template_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("genesis.bin");
        fs::write(&path, b"\x01\x02\x03").unwrap();

        let err = GenesisTemplateLoader::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_missing_template_is_filesystem_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = GenesisTemplateLoader::new(temp_dir.path().join("absent.bin"))
            .load()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }
}
