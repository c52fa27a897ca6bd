//! # State Commitment
//!
//! Builds the final genesis state from the template and fingerprints it.
//!
//! The template is only borrowed. The committed state is private to
//! [`CommittedGenesis`], so the root can never drift from the state it covers.

use genesis_types::{hash_tree_root, GenesisState, Hash};
use tracing::info;

/// Final genesis state together with its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedGenesis {
    state: GenesisState,
    root: Hash,
}

impl CommittedGenesis {
    /// Override the template's start time and compute the root of the result.
    pub fn commit(template: &GenesisState, genesis_time: u64) -> Self {
        let state = template.with_genesis_time(genesis_time);
        let root = hash_tree_root(&state);

        info!("Genesis hash tree root: 0x{}", hex::encode(root));

        Self { state, root }
    }

    /// The committed state.
    pub fn state(&self) -> &GenesisState {
        &self.state
    }

    /// Root over [`Self::state`].
    pub fn root(&self) -> Hash {
        self.root
    }

    /// `0x`-prefixed hex of the root.
    pub fn root_hex(&self) -> String {
        format!("0x{}", hex::encode(self.root))
    }

    /// Genesis time baked into the state.
    pub fn genesis_time(&self) -> u64 {
        self.state.genesis_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_types::{decode, encode};

    fn template() -> GenesisState {
        GenesisState::mock_interop(&[[0x01; 48], [0x02; 48], [0x03; 48]], 0)
    }

    #[test]
    fn test_commit_overrides_only_genesis_time() {
        let template = template();
        let committed = CommittedGenesis::commit(&template, 1010);

        assert_eq!(committed.genesis_time(), 1010);
        assert_eq!(template.genesis_time, 0);

        let mut expected = template.clone();
        expected.genesis_time = 1010;
        assert_eq!(committed.state(), &expected);
    }

    #[test]
    fn test_commit_is_deterministic() {
        let a = CommittedGenesis::commit(&template(), 1010);
        let b = CommittedGenesis::commit(&template(), 1010);
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_commit_matches_independently_decoded_template() {
        let bytes = encode(&template()).unwrap();
        let here = CommittedGenesis::commit(&decode(&bytes).unwrap(), 1010);
        let there = CommittedGenesis::commit(&decode(&bytes).unwrap(), 1010);
        assert_eq!(here.root(), there.root());
    }

    #[test]
    fn test_different_time_different_root() {
        let a = CommittedGenesis::commit(&template(), 1010);
        let b = CommittedGenesis::commit(&template(), 1011);
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_root_hex_is_prefixed() {
        let committed = CommittedGenesis::commit(&template(), 1010);
        assert!(committed.root_hex().starts_with("0x"));
        assert_eq!(committed.root_hex().len(), 66);
    }
}
