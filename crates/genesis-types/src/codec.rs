//! # Canonical Codec
//!
//! Fixed-width little-endian bincode. The same value always encodes to the same
//! bytes, and decoding refuses trailing data so there is exactly one valid
//! encoding per state.

use bincode::Options;

use crate::entities::{GenesisState, Hash};
use crate::errors::CodecError;
use crate::merkle::TreeHash;

/// Upper bound on encoded state size. Bounds allocation on malformed input.
pub const MAX_ENCODED_STATE_BYTES: u64 = 64 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_ENCODED_STATE_BYTES)
        .reject_trailing_bytes()
}

/// Encode a genesis state canonically.
pub fn encode(state: &GenesisState) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(state)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a canonically encoded genesis state.
pub fn decode(bytes: &[u8]) -> Result<GenesisState, CodecError> {
    options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Root committing to every field of the state.
pub fn hash_tree_root(state: &GenesisState) -> Hash {
    state.tree_hash_root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::{Digest, Sha3_256};

    fn sample_state() -> GenesisState {
        GenesisState::mock_interop(&[[0x11; 48], [0x22; 48]], 1_600_000_000)
    }

    #[test]
    fn test_decode_recovers_encoded_state() {
        let state = sample_state();
        let bytes = encode(&state).unwrap();
        assert_eq!(decode(&bytes).unwrap(), state);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode(&sample_state()).unwrap(), encode(&sample_state()).unwrap());
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let bytes = encode(&sample_state()).unwrap();
        let result = decode(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode(&sample_state()).unwrap();
        bytes.push(0);
        assert!(matches!(decode(&bytes), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"not a genesis state").is_err());
        assert!(decode(&[]).is_err());
    }

    /// Single validator with pubkey `0x11 * 48`, genesis time 1010.
    fn single_validator_state() -> GenesisState {
        GenesisState::mock_interop(&[[0x11; 48]], 1010)
    }

    #[test]
    fn test_encoding_known_answer() {
        let bytes = encode(&single_validator_state()).unwrap();

        assert_eq!(bytes.len(), 377);
        assert_eq!(&bytes[..8], &1010u64.to_le_bytes());
        assert_eq!(
            hex::encode(Sha3_256::digest(&bytes)),
            "85bb87090fa791feabd061a73068cfcd7bb160753b48fc2e43bdbefa3484408b"
        );
    }

    #[test]
    fn test_root_known_answer() {
        let state = single_validator_state();

        assert_eq!(
            hex::encode(state.validators[0].withdrawal_credentials),
            "008a09f6a55f95bd90acc068271dfb9952c339877c032dec5be935d6d3f5c6e0"
        );
        assert_eq!(
            hex::encode(hash_tree_root(&state)),
            "5d2cf9a12d914d3dc91e0207a419ae78aceaf3b3f002446bb7d202ce75ae549d"
        );
    }

    #[test]
    fn test_root_survives_decode() {
        let state = sample_state();
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(hash_tree_root(&decoded), hash_tree_root(&state));
    }
}
