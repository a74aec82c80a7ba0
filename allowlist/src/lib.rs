//! Merkle allowlist commitments for on-chain admission checks.
//!
//! # Overview
//! The crate commits to a list of participant identities with a single
//! 32-byte root and proves, per participant, that the identity is on the
//! list without revealing the rest of it. Digests use keccak-256 and the
//! sorted-pair combine rule, so the root and proofs can be checked by an EVM
//! contract that verifies with the same convention.
//!
//! # Architecture
//! - Leaf Encoder ([`encoder`]): identity bytes to a 32-byte leaf
//! - Tree Builder ([`merkletree::tree`]): leaves folded level by level into a root
//! - Proof Generator ([`merkletree::proof`]): sibling path for one leaf
//! - Proof Verifier ([`merkletree::proof`]): recompute root from leaf and path
//!
//! [`Allowlist`](allowlist::Allowlist) bundles the four into a service over
//! an identity list, and [`manifest`] persists its output for the tooling
//! that submits claims.
//!
//! # Example Usage
//! ```no_run
//! use allowlist::{build_tree, encode_leaf, prove_membership, verify_membership};
//! use allowlist::config::Config;
//!
//! let config = Config::default();
//! let ids: Vec<[u8; 20]> = vec![[1u8; 20], [2u8; 20], [3u8; 20]];
//! let leaves = ids
//!     .iter()
//!     .map(|id| encode_leaf(id, &config))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let tree = build_tree(leaves.clone()).unwrap();
//! let proof = prove_membership(&tree, 1).unwrap();
//! assert!(verify_membership(&leaves[1], &proof, &tree.root()));
//! ```
//!
//! # Note on Thread Safety
//! Every type here is immutable once built. A [`Tree`](merkletree::Tree) or
//! [`Allowlist`](allowlist::Allowlist) can be shared behind an `Arc` for
//! concurrent proof generation and verification without locking.

pub mod allowlist;
pub mod config;
pub mod def;
pub mod encoder;
pub mod error;
pub mod manifest;
pub mod merkletree;
pub mod utils;

use config::Config;
use encoder::LeafEncoder;
use error::{AllowlistError, Result};
use merkletree::{MerkleProof, Tree};
use utils::hasher::Hash32;

pub use allowlist::Allowlist;
pub use error::AllowlistError as Error;
pub use manifest::Manifest;

/// Maps one identity to its leaf digest under `config`'s encoding.
///
/// # Errors
/// [`AllowlistError::InvalidIdentity`] if the identity is empty or too wide
pub fn encode_leaf(identity: &[u8], config: &Config) -> Result<Hash32> {
    LeafEncoder::from_config(config).encode(identity)
}

/// Builds the tree over `leaves` in the given order.
///
/// # Errors
/// [`AllowlistError::EmptyLeafSet`] if there are no leaves
pub fn build_tree(leaves: Vec<Hash32>) -> Result<Tree> {
    Tree::new(leaves)
}

/// Returns the proof for the leaf at `leaf_index`.
///
/// # Errors
/// [`AllowlistError::IndexOutOfRange`] if `leaf_index` is outside
/// `[0, leaf_count)`, negative values included
pub fn prove_membership(tree: &Tree, leaf_index: i64) -> Result<MerkleProof> {
    if leaf_index < 0 || leaf_index as u64 >= tree.leaf_count() as u64 {
        return Err(AllowlistError::IndexOutOfRange {
            index: leaf_index,
            leaf_count: tree.leaf_count(),
        });
    }
    tree.get_proof(leaf_index as usize)
}

/// True iff `proof` links `leaf` to `root`. A mismatch is not an error.
pub fn verify_membership(leaf: &Hash32, proof: &MerkleProof, root: &Hash32) -> bool {
    merkletree::verify_proof(leaf, proof, root)
}

/// [`verify_membership`] over raw bytes, as received off the wire.
///
/// # Errors
/// [`AllowlistError::MalformedProof`] if any digest is not 32 bytes
pub fn verify_membership_bytes<S: AsRef<[u8]>>(
    leaf: &[u8],
    proof: &[S],
    root: &[u8],
) -> Result<bool> {
    merkletree::verify_proof_bytes(leaf, proof, root)
}
