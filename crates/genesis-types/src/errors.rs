use thiserror::Error;

/// Errors raised by the canonical codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input bytes are not a canonical encoding of the expected type.
    #[error("Failed to decode genesis state: {0}")]
    Decode(String),

    /// Value could not be encoded (only reachable if it exceeds the size limit).
    #[error("Failed to encode genesis state: {0}")]
    Encode(String),
}
