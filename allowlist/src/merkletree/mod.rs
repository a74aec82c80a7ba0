//! Merkle tree over allowlist leaves.
//!
//! - [`Tree`]: level-array tree, built once and immutable afterwards
//! - [`proof`]: membership proof generation and verification
//! - [`check`]: tree consistency validation utilities

pub mod check;
pub mod proof;
pub mod tree;

pub use proof::{verify_proof, verify_proof_bytes, MerkleProof};
pub use tree::Tree;
