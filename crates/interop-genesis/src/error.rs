//! Error types for the interop genesis bootstrap

use std::fmt;
use std::io;
use std::path::PathBuf;

use genesis_types::CodecError;
use thiserror::Error;

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors that abort the bootstrap pipeline.
///
/// None of these are retried: every cause is a deterministic input or state problem.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No usable start-time source was supplied
    #[error("Could not determine when time begins: {0}")]
    Configuration(String),

    /// Absolute time not in the future, negative delay, or overflow
    #[error("Invalid genesis time: {reason}")]
    InvalidTime {
        /// Operator-facing explanation
        reason: String,
    },

    /// Template bytes are not a canonical genesis state
    #[error(transparent)]
    Decode(#[from] CodecError),

    /// A validator token is not an integer
    #[error("Invalid validator token {token:?}: expected an integer")]
    Parse {
        /// Offending token, untrimmed
        token: String,
    },

    /// A validator index lies outside `[0, count)`
    #[error("{index} is not a valid validator (keystore holds {count})")]
    ValidatorIndexOutOfRange {
        /// Requested index, as written
        index: String,
        /// Keystore size
        count: usize,
    },

    /// A range-checked index has no keystore record
    #[error("No keystore entry for validator {index}")]
    KeyNotFound {
        /// Requested index
        index: u64,
    },

    /// Keystore asset missing or malformed
    #[error("Keystore {}: {reason}", path.display())]
    Keystore {
        /// Asset location
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Directory or file operation failed
    #[error("Failed to {operation} {}: {source}", path.display())]
    Filesystem {
        /// Attempted operation
        operation: FsOperation,
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Filesystem operation named in [`BootstrapError::Filesystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// Read a file
    Read,
    /// Write a file
    Write,
    /// Recursively remove a directory
    RemoveDir,
    /// Create a directory (and parents)
    CreateDir,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::RemoveDir => "remove directory",
            Self::CreateDir => "create directory",
        };
        f.write_str(verb)
    }
}

/// Taxonomy class of a [`BootstrapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`BootstrapError::Configuration`]
    Configuration,
    /// See [`BootstrapError::InvalidTime`]
    InvalidTime,
    /// See [`BootstrapError::Decode`]
    Decode,
    /// See [`BootstrapError::Parse`]
    Parse,
    /// See [`BootstrapError::ValidatorIndexOutOfRange`]
    ValidatorIndexOutOfRange,
    /// See [`BootstrapError::KeyNotFound`]
    KeyNotFound,
    /// See [`BootstrapError::Keystore`]
    Keystore,
    /// See [`BootstrapError::Filesystem`]
    Filesystem,
}

impl BootstrapError {
    /// Taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidTime { .. } => ErrorKind::InvalidTime,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::ValidatorIndexOutOfRange { .. } => ErrorKind::ValidatorIndexOutOfRange,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::Keystore { .. } => ErrorKind::Keystore,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }

    pub(crate) fn invalid_time(reason: impl Into<String>) -> Self {
        Self::InvalidTime {
            reason: reason.into(),
        }
    }

    pub(crate) fn filesystem(
        operation: FsOperation,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            BootstrapError::invalid_time("in the past").kind(),
            ErrorKind::InvalidTime
        );
        assert_eq!(
            BootstrapError::ValidatorIndexOutOfRange {
                index: "20".to_string(),
                count: 16,
            }
            .kind(),
            ErrorKind::ValidatorIndexOutOfRange
        );
        assert_eq!(
            BootstrapError::filesystem(
                FsOperation::RemoveDir,
                "/tmp/chain",
                io::Error::from(io::ErrorKind::PermissionDenied)
            )
            .kind(),
            ErrorKind::Filesystem
        );
    }

    #[test]
    fn test_out_of_range_message_names_index() {
        let err = BootstrapError::ValidatorIndexOutOfRange {
            index: "20".to_string(),
            count: 16,
        };
        assert_eq!(err.to_string(), "20 is not a valid validator (keystore holds 16)");
    }

    #[test]
    fn test_filesystem_message_names_path() {
        let err = BootstrapError::filesystem(
            FsOperation::Write,
            "/data/genesis.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().starts_with("Failed to write /data/genesis.json"));
    }
}
