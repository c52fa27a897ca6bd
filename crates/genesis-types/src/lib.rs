//! # Genesis Types Crate
//!
//! Genesis state entities, the canonical codec and merkleization.
//!
//! ## Design Principles
//!
//! - **Canonical Bytes**: `encode` is deterministic; structurally identical states
//!   always produce identical bytes, and `decode` rejects anything else.
//! - **Content Addressing**: `hash_tree_root` commits to every field, so two nodes
//!   comparing roots know they hold the same genesis state.
//! - **Copy-on-Write**: states are never edited in place; overrides produce a new value.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod merkle;

pub use codec::{decode, encode, hash_tree_root, MAX_ENCODED_STATE_BYTES};
pub use entities::*;
pub use errors::*;
pub use merkle::{merkleize, mix_in_length, TreeHash, ZERO_CHUNK};
