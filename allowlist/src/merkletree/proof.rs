//! Membership proofs: generation from a [`Tree`] and standalone verification.
//!
//! A proof is the list of sibling digests met while climbing from a leaf to
//! the root, ordered leaf to root. Because every pair is combined with the
//! sorted-pair rule, no left/right flags are carried.
//!
//! Binary layout produced by [`MerkleProof::to_bytes`]:
//! ```text
//! | magic (1) | count (4, LE) | sibling 0 (32) | ... | sibling count-1 (32) |
//! ```

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use super::tree::Tree;
use crate::def::{HASH_LEN, PROOF_MAGIC};
use crate::error::{AllowlistError, Result};
use crate::utils::codec;
use crate::utils::hasher::{self, Hash32};

const HEADER_LEN: usize = 1 + 4;

/// Sibling path proving one leaf's inclusion under a root.
///
/// A proof does not borrow the tree it came from; it stays valid for as long
/// as its root is trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MerkleProof {
    siblings: Vec<Hash32>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Hash32>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[Hash32] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Folds `leaf` with every sibling in order and returns the resulting root.
    pub fn compute_root(&self, leaf: &Hash32) -> Hash32 {
        let mut node = *leaf;
        for sibling in self.siblings.iter() {
            let cur = node;
            hasher::node_hash_inplace(&mut node, &cur, sibling);
        }
        node
    }

    /// True iff this proof links `leaf` to `root`.
    pub fn verify(&self, leaf: &Hash32, root: &Hash32) -> bool {
        self.compute_root(leaf) == *root
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bz = vec![0u8; HEADER_LEN + self.siblings.len() * HASH_LEN];
        bz[0] = PROOF_MAGIC;
        LittleEndian::write_u32(&mut bz[1..HEADER_LEN], self.siblings.len() as u32);
        for (i, sibling) in self.siblings.iter().enumerate() {
            let start = HEADER_LEN + i * HASH_LEN;
            bz[start..start + HASH_LEN].copy_from_slice(sibling);
        }
        bz
    }

    /// Parses the output of [`MerkleProof::to_bytes`].
    ///
    /// # Errors
    /// [`AllowlistError::MalformedProof`] if the header is missing or the
    /// body is not exactly `count` digests long
    pub fn from_bytes(bz: &[u8]) -> Result<Self> {
        if bz.len() < HEADER_LEN || bz[0] != PROOF_MAGIC {
            return Err(AllowlistError::MalformedProof {
                what: "proof header".to_owned(),
                len: bz.len().min(HEADER_LEN),
                expected: HEADER_LEN,
            });
        }
        let count = LittleEndian::read_u32(&bz[1..HEADER_LEN]) as usize;
        let body = &bz[HEADER_LEN..];
        if body.len() != count * HASH_LEN {
            return Err(AllowlistError::MalformedProof {
                what: "proof body".to_owned(),
                len: body.len(),
                expected: count * HASH_LEN,
            });
        }
        let siblings = body
            .chunks_exact(HASH_LEN)
            .enumerate()
            .map(|(i, c)| codec::digest_from_slice(&format!("sibling[{}]", i), c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }

    /// `0x`-prefixed hex string per sibling, the form a contract call takes.
    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(codec::to_hex).collect()
    }

    pub fn from_hex<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let siblings = items
            .iter()
            .enumerate()
            .map(|(i, s)| codec::digest_from_hex(&format!("sibling[{}]", i), s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }
}

impl TryFrom<Vec<String>> for MerkleProof {
    type Error = AllowlistError;

    fn try_from(items: Vec<String>) -> Result<Self> {
        Self::from_hex(&items)
    }
}

impl From<MerkleProof> for Vec<String> {
    fn from(proof: MerkleProof) -> Self {
        proof.to_hex()
    }
}

impl Tree {
    /// Extracts the proof for the leaf at `index`.
    ///
    /// One sibling is emitted per level. Where the odd-count rule paired a
    /// node with itself, the node's own digest is emitted as its sibling.
    ///
    /// # Errors
    /// [`AllowlistError::IndexOutOfRange`] if `index >= leaf_count()`
    pub fn get_proof(&self, index: usize) -> Result<MerkleProof> {
        if index >= self.leaf_count() {
            return Err(AllowlistError::IndexOutOfRange {
                index: index as i64,
                leaf_count: self.leaf_count(),
            });
        }
        let mut siblings = Vec::with_capacity(self.depth());
        let mut nth = index;
        for level in 0..self.depth() {
            siblings.push(self.sibling(level, nth));
            nth >>= 1;
        }
        Ok(MerkleProof { siblings })
    }
}

/// Recomputes the root from `leaf` and `proof` and compares it with `root`.
///
/// A mismatch is a normal negative answer, not an error.
pub fn verify_proof(leaf: &Hash32, proof: &MerkleProof, root: &Hash32) -> bool {
    proof.verify(leaf, root)
}

/// Like [`verify_proof`] but over unvalidated byte slices.
///
/// Every width is checked before any hashing happens.
///
/// # Errors
/// [`AllowlistError::MalformedProof`] if the leaf, the root or any sibling is
/// not exactly 32 bytes
pub fn verify_proof_bytes<S: AsRef<[u8]>>(leaf: &[u8], siblings: &[S], root: &[u8]) -> Result<bool> {
    let leaf = codec::digest_from_slice("leaf", leaf)?;
    let root = codec::digest_from_slice("root", root)?;
    let siblings = siblings
        .iter()
        .enumerate()
        .map(|(i, s)| codec::digest_from_slice(&format!("sibling[{}]", i), s.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(MerkleProof::new(siblings).verify(&leaf, &root))
}
