//! Validator key material held by the keystore.

use std::fmt;

use genesis_types::BlsPubkey;
use primitive_types::U256;
use thiserror::Error;

/// Why a keystore record could not be parsed.
#[derive(Debug, Error, PartialEq)]
pub enum KeyMaterialError {
    /// Not valid hex
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Wider than 256 bits
    #[error("private key is {0} bytes, expected at most 32")]
    PrivateKeyTooLong(usize),

    /// Not a compressed G1 point length
    #[error("public key is {0} bytes, expected 48")]
    PubkeyLength(usize),
}

/// Validator private key as an unsigned 256-bit integer.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(U256);

impl PrivateKey {
    /// Parse big-endian hex, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyMaterialError> {
        let bytes = hex::decode(strip_hex_prefix(hex_str))?;
        if bytes.len() > 32 {
            return Err(KeyMaterialError::PrivateKeyTooLong(bytes.len()));
        }
        Ok(Self(U256::from_big_endian(&bytes)))
    }

    /// Canonical decimal rendering, as written to key files.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }
}

impl From<U256> for PrivateKey {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Parse a compressed 48-byte BLS public key from hex.
pub fn pubkey_from_hex(hex_str: &str) -> Result<BlsPubkey, KeyMaterialError> {
    let bytes = hex::decode(strip_hex_prefix(hex_str))?;
    BlsPubkey::try_from(bytes.as_slice()).map_err(|_| KeyMaterialError::PubkeyLength(bytes.len()))
}

fn strip_hex_prefix(hex_str: &str) -> &str {
    let trimmed = hex_str.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// One keystore entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Signing key
    pub private_key: PrivateKey,
    /// Matching public key, when the asset lists it
    pub pubkey: Option<BlsPubkey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_key_renders_decimal() {
        let key = PrivateKey::from_hex("0x0102").unwrap();
        assert_eq!(key.to_decimal_string(), "258");
    }

    #[test]
    fn test_private_key_accepts_full_width() {
        let key = PrivateKey::from_hex(
            "25295f0d1d592a90b333e26e85149708208e9f8e8bc18f6c77bd62f8ad7a6866",
        )
        .unwrap();
        assert_eq!(
            key.to_decimal_string(),
            "16808672146709759238327133555736750089977066230599028589193936481731504400486"
        );
    }

    #[test]
    fn test_private_key_too_long() {
        let too_long = format!("0x{}", "11".repeat(33));
        assert_eq!(
            PrivateKey::from_hex(&too_long),
            Err(KeyMaterialError::PrivateKeyTooLong(33))
        );
    }

    #[test]
    fn test_private_key_invalid_hex() {
        assert!(matches!(
            PrivateKey::from_hex("0xzz"),
            Err(KeyMaterialError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_odd_length_hex_reports_cause() {
        assert_eq!(
            PrivateKey::from_hex("0xabc"),
            Err(KeyMaterialError::InvalidHex(hex::FromHexError::OddLength))
        );
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = PrivateKey::from_hex("0x2a").unwrap();
        assert_eq!(format!("{key:?}"), "PrivateKey(<redacted>)");
    }

    #[test]
    fn test_pubkey_length_checked() {
        assert_eq!(
            pubkey_from_hex("0xaabb"),
            Err(KeyMaterialError::PubkeyLength(2))
        );
        assert!(pubkey_from_hex(&"ab".repeat(48)).is_ok());
    }
}
