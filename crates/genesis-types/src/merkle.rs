//! # Merkleization
//!
//! Every value reduces to a 32-byte tree root.
//!
//! ## Algorithm
//!
//! 1. Basic values and short byte arrays pack little-endian into one zero-padded chunk
//! 2. Longer byte arrays split into 32-byte chunks and are merkleized
//! 3. Containers merkleize the roots of their fields, in declaration order
//! 4. Lists merkleize their element roots, then mix in the element count
//!
//! Trees pad leaves to a power of two with [`ZERO_CHUNK`] and combine siblings
//! as `H(left || right)` with SHA3-256.

use sha3::{Digest, Sha3_256};

use crate::entities::Hash;

/// Number of bytes in a single leaf chunk.
pub const BYTES_PER_CHUNK: usize = 32;

/// Padding leaf (all zeros).
pub const ZERO_CHUNK: Hash = [0u8; BYTES_PER_CHUNK];

/// A value with a canonical tree root.
pub trait TreeHash {
    /// Compute the 32-byte root committing to this value.
    fn tree_hash_root(&self) -> Hash;
}

/// Hash two sibling nodes: `H(left || right)`.
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha3_256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Compute the root of a binary Merkle tree over `chunks`.
///
/// Empty input yields [`ZERO_CHUNK`]; a single chunk is its own root.
pub fn merkleize(chunks: &[Hash]) -> Hash {
    match chunks.len() {
        0 => ZERO_CHUNK,
        1 => chunks[0],
        count => {
            let mut layer = chunks.to_vec();
            layer.resize(count.next_power_of_two(), ZERO_CHUNK);

            while layer.len() > 1 {
                layer = layer
                    .chunks_exact(2)
                    .map(|pair| hash_pair(&pair[0], &pair[1]))
                    .collect();
            }

            layer[0]
        }
    }
}

/// Bind a list root to its length so `[]` and `[0]` never collide.
pub fn mix_in_length(root: &Hash, length: usize) -> Hash {
    hash_pair(root, &(length as u64).tree_hash_root())
}

/// Split bytes into zero-padded chunks.
fn pack_bytes(bytes: &[u8]) -> Vec<Hash> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = ZERO_CHUNK;
            chunk[..piece.len()].copy_from_slice(piece);
            chunk
        })
        .collect()
}

impl TreeHash for u64 {
    fn tree_hash_root(&self) -> Hash {
        let mut chunk = ZERO_CHUNK;
        chunk[..8].copy_from_slice(&self.to_le_bytes());
        chunk
    }
}

impl TreeHash for bool {
    fn tree_hash_root(&self) -> Hash {
        let mut chunk = ZERO_CHUNK;
        chunk[0] = u8::from(*self);
        chunk
    }
}

impl<const N: usize> TreeHash for [u8; N] {
    fn tree_hash_root(&self) -> Hash {
        merkleize(&pack_bytes(self))
    }
}

impl<T: TreeHash> TreeHash for Vec<T> {
    fn tree_hash_root(&self) -> Hash {
        let leaves: Vec<Hash> = self.iter().map(TreeHash::tree_hash_root).collect();
        mix_in_length(&merkleize(&leaves), self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_from_byte(b: u8) -> Hash {
        let mut h = ZERO_CHUNK;
        h[0] = b;
        h
    }

    #[test]
    fn test_merkleize_empty_is_zero_chunk() {
        assert_eq!(merkleize(&[]), ZERO_CHUNK);
    }

    #[test]
    fn test_merkleize_single_chunk_is_identity() {
        let leaf = chunk_from_byte(0x07);
        assert_eq!(merkleize(&[leaf]), leaf);
    }

    #[test]
    fn test_merkleize_pads_three_to_four() {
        let leaves: Vec<Hash> = (1..=3).map(chunk_from_byte).collect();
        let expected = hash_pair(
            &hash_pair(&leaves[0], &leaves[1]),
            &hash_pair(&leaves[2], &ZERO_CHUNK),
        );
        assert_eq!(merkleize(&leaves), expected);
    }

    #[test]
    fn test_u64_packs_little_endian() {
        let root = 0x0102u64.tree_hash_root();
        assert_eq!(root[0], 0x02);
        assert_eq!(root[1], 0x01);
        assert!(root[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_short_array_is_padded_chunk() {
        let version: [u8; 4] = [1, 2, 3, 4];
        let root = version.tree_hash_root();
        assert_eq!(&root[..4], &version);
        assert!(root[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_long_array_spans_two_chunks() {
        let pubkey = [0xAAu8; 48];
        let mut tail = ZERO_CHUNK;
        tail[..16].copy_from_slice(&[0xAA; 16]);
        assert_eq!(pubkey.tree_hash_root(), hash_pair(&[0xAA; 32], &tail));
    }

    #[test]
    fn test_list_length_is_mixed_in() {
        let empty: Vec<u64> = vec![];
        let one_zero: Vec<u64> = vec![0];
        // Both lists merkleize to the zero chunk; only the length separates them.
        assert_ne!(empty.tree_hash_root(), one_zero.tree_hash_root());
    }
}
