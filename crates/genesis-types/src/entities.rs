//! # Genesis Entities
//!
//! The state every interop node must agree on before slot 0.
//!
//! Only `genesis_time` is ever overridden by the bootstrap pipeline; every other
//! field is carried through from the template byte-for-byte.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Sha3_256};

use crate::merkle::{merkleize, TreeHash, ZERO_CHUNK};

/// 32-byte hash / tree root.
pub type Hash = [u8; 32];

/// Fork version identifier.
pub type Version = [u8; 4];

/// Compressed BLS12-381 G1 public key.
pub type BlsPubkey = [u8; 48];

/// Epoch marker for "never".
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;

/// Effective balance of a freshly deposited validator (32 ETH in Gwei).
pub const MAX_EFFECTIVE_BALANCE: u64 = 32_000_000_000;

/// Fork version used by interop genesis states.
pub const GENESIS_FORK_VERSION: Version = [0x00, 0x00, 0x00, 0x00];

/// Withdrawal credential prefix for BLS withdrawal keys.
pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Eth1 block hash every interop genesis is seeded from.
pub const INTEROP_ETH1_BLOCK_HASH: Hash = [0x42; 32];

/// Fork schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: u64,
}

impl TreeHash for Fork {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&[
            self.previous_version.tree_hash_root(),
            self.current_version.tree_hash_root(),
            self.epoch.tree_hash_root(),
        ])
    }
}

/// Header of the most recent block (empty at genesis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub parent_root: Hash,
    pub state_root: Hash,
    pub body_root: Hash,
}

impl TreeHash for BeaconBlockHeader {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&[
            self.slot.tree_hash_root(),
            self.parent_root.tree_hash_root(),
            self.state_root.tree_hash_root(),
            self.body_root.tree_hash_root(),
        ])
    }
}

/// Deposit contract snapshot the genesis was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Eth1Data {
    pub deposit_root: Hash,
    pub deposit_count: u64,
    pub block_hash: Hash,
}

impl TreeHash for Eth1Data {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&[
            self.deposit_root.tree_hash_root(),
            self.deposit_count.tree_hash_root(),
            self.block_hash.tree_hash_root(),
        ])
    }
}

/// A registered validator.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    #[serde_as(as = "Bytes")]
    pub pubkey: BlsPubkey,
    pub withdrawal_credentials: Hash,
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_epoch: u64,
    pub exit_epoch: u64,
}

impl Validator {
    /// An active validator with BLS withdrawal credentials derived from its pubkey.
    pub fn genesis_active(pubkey: BlsPubkey) -> Self {
        Self {
            pubkey,
            withdrawal_credentials: bls_withdrawal_credentials(&pubkey),
            effective_balance: MAX_EFFECTIVE_BALANCE,
            slashed: false,
            activation_epoch: 0,
            exit_epoch: FAR_FUTURE_EPOCH,
        }
    }
}

impl TreeHash for Validator {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&[
            self.pubkey.tree_hash_root(),
            self.withdrawal_credentials.tree_hash_root(),
            self.effective_balance.tree_hash_root(),
            self.slashed.tree_hash_root(),
            self.activation_epoch.tree_hash_root(),
            self.exit_epoch.tree_hash_root(),
        ])
    }
}

/// `0x00 || H(pubkey)[1..]`
fn bls_withdrawal_credentials(pubkey: &BlsPubkey) -> Hash {
    let mut credentials: Hash = Sha3_256::digest(pubkey).into();
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    credentials
}

/// Genesis state decoded from a canonical template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Network start time (UNIX seconds).
    pub genesis_time: u64,
    pub slot: u64,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub eth1_data: Eth1Data,
    pub validators: Vec<Validator>,
    pub balances: Vec<u64>,
    pub randao_mix: Hash,
}

impl GenesisState {
    /// Return a copy of this state with `genesis_time` replaced.
    ///
    /// `self` is only borrowed; the template stays reusable by other callers.
    #[must_use]
    pub fn with_genesis_time(&self, genesis_time: u64) -> Self {
        Self {
            genesis_time,
            ..self.clone()
        }
    }

    /// Number of registered validators.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Deterministic interop genesis: one active validator per pubkey.
    pub fn mock_interop(pubkeys: &[BlsPubkey], genesis_time: u64) -> Self {
        let validators: Vec<Validator> = pubkeys
            .iter()
            .copied()
            .map(Validator::genesis_active)
            .collect();
        let balances = vec![MAX_EFFECTIVE_BALANCE; validators.len()];

        let eth1_data = Eth1Data {
            deposit_root: validators.tree_hash_root(),
            deposit_count: validators.len() as u64,
            block_hash: INTEROP_ETH1_BLOCK_HASH,
        };

        Self {
            genesis_time,
            slot: 0,
            fork: Fork {
                previous_version: GENESIS_FORK_VERSION,
                current_version: GENESIS_FORK_VERSION,
                epoch: 0,
            },
            latest_block_header: BeaconBlockHeader {
                body_root: ZERO_CHUNK,
                ..BeaconBlockHeader::default()
            },
            eth1_data,
            validators,
            balances,
            randao_mix: INTEROP_ETH1_BLOCK_HASH,
        }
    }
}

impl TreeHash for GenesisState {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&[
            self.genesis_time.tree_hash_root(),
            self.slot.tree_hash_root(),
            self.fork.tree_hash_root(),
            self.latest_block_header.tree_hash_root(),
            self.eth1_data.tree_hash_root(),
            self.validators.tree_hash_root(),
            self.balances.tree_hash_root(),
            self.randao_mix.tree_hash_root(),
        ])
    }
}
