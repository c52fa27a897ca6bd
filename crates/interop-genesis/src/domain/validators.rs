//! # Validator Selection
//!
//! Parses the operator's comma-separated validator list and range-checks it
//! against the keystore size. The whole list is rejected on the first bad
//! token or index; there is never a partial selection.
//!
//! A token that is an integer too wide for `i64` is still an integer: it fails
//! the range check, not the parse.

use std::fmt;
use std::num::IntErrorKind;

use crate::error::{BootstrapError, Result};
use crate::{KEY_FILE_EXTENSION, KEY_FILE_INDEX_WIDTH};

/// Index into the keystore, known to be in `[0, count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorIndex(u64);

impl ValidatorIndex {
    /// Range-check a raw index against a keystore of `count` records.
    pub fn new(raw: i64, count: usize) -> Result<Self> {
        match u64::try_from(raw) {
            Ok(index) if index < count as u64 => Ok(Self(index)),
            _ => Err(BootstrapError::ValidatorIndexOutOfRange {
                index: raw.to_string(),
                count,
            }),
        }
    }

    /// Numeric index.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Position in the keystore table.
    pub fn as_usize(self) -> usize {
        // Constructed below a usize count, so this never truncates.
        self.0 as usize
    }

    /// File name of this validator's key file, e.g. `v0000003.privkey`.
    pub fn key_file_name(self) -> String {
        format!(
            "v{:0width$}.{}",
            self.0,
            KEY_FILE_EXTENSION,
            width = KEY_FILE_INDEX_WIDTH
        )
    }
}

impl fmt::Display for ValidatorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One integer token of the validator list, not yet range-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorToken {
    /// Integer that fits in `i64`
    Index(i64),
    /// Integer outside the `i64` range, kept as written
    Oversized(String),
}

impl ValidatorToken {
    /// Parse one (untrimmed) token. Only non-integers are parse errors.
    pub fn parse(token: &str) -> Result<Self> {
        let trimmed = token.trim();
        match trimmed.parse::<i64>() {
            Ok(index) => Ok(Self::Index(index)),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Ok(Self::Oversized(trimmed.to_string()))
            }
            Err(_) => Err(BootstrapError::Parse {
                token: token.to_string(),
            }),
        }
    }

    /// Range-check against a keystore of `count` records.
    pub fn select(self, count: usize) -> Result<ValidatorIndex> {
        match self {
            Self::Index(raw) => ValidatorIndex::new(raw, count),
            Self::Oversized(index) => Err(BootstrapError::ValidatorIndexOutOfRange { index, count }),
        }
    }
}

/// Split the raw list into integer tokens. Absent or blank input means "no validators".
pub fn parse_validator_tokens(raw: Option<&str>) -> Result<Vec<ValidatorToken>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    raw.split(',').map(ValidatorToken::parse).collect()
}

/// Parse and range-check the raw list against a keystore of `count` records.
///
/// Input order is preserved and duplicates are kept.
pub fn select_validators(raw: Option<&str>, count: usize) -> Result<Vec<ValidatorIndex>> {
    parse_validator_tokens(raw)?
        .into_iter()
        .map(|token| token.select(count))
        .collect()
}
