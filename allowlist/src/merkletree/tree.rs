//! Binary hash tree over allowlist leaves.
//!
//! The tree is stored as an arena of level arrays: `levels[0]` holds the
//! leaves in input order and the last level holds the single root. Levels
//! are folded bottom-up in a loop, so depth never touches the call stack.
//!
//! Pairing rules, fixed because on-chain and off-chain code must agree:
//! - Nodes at a level are paired left to right in input order, so the root
//!   depends on leaf order.
//! - A level with an odd count pairs its last node with itself.
//! - Each pair is combined with [`hasher::hash2_sorted`].
//!
//! Index layout (5 leaves):
//! ```text
//!   level 3:                 r
//!   level 2:         n0              n1 = H(n2', n2')
//!   level 1:     n0'     n1'     n2' = H(L4, L4)
//!   level 0:   L0  L1  L2  L3  L4
//! ```
//! The sibling of node `i` is `i ^ 1`, or `i` itself when `i ^ 1` falls off
//! the end of the level.

use log::debug;
use rayon::prelude::*;

use crate::def::{DEFAULT_PARALLEL_THRESHOLD, MAX_TREE_DEPTH};
use crate::error::{AllowlistError, Result};
use crate::utils::hasher::{self, Hash32};

/// Immutable Merkle tree holding every leaf and node digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    levels: Vec<Vec<Hash32>>,
}

impl Tree {
    /// Builds a tree, hashing wide levels on the rayon pool.
    ///
    /// # Errors
    /// [`AllowlistError::EmptyLeafSet`] if `leaves` is empty
    pub fn new(leaves: Vec<Hash32>) -> Result<Self> {
        Self::with_parallel_threshold(leaves, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Builds a tree, hashing levels with at least `parallel_threshold` nodes
    /// on the rayon pool. The threshold never changes the resulting digests.
    pub fn with_parallel_threshold(leaves: Vec<Hash32>, parallel_threshold: usize) -> Result<Self> {
        if leaves.is_empty() {
            return Err(AllowlistError::EmptyLeafSet);
        }
        let threshold = parallel_threshold.max(1);
        let leaf_count = leaves.len();

        let mut levels = vec![leaves];
        loop {
            let cur = &levels[levels.len() - 1];
            if cur.len() == 1 {
                break;
            }
            let next: Vec<Hash32> = if cur.len() >= threshold {
                cur.par_chunks(2).map(hash_pair).collect()
            } else {
                cur.chunks(2).map(hash_pair).collect()
            };
            levels.push(next);
        }

        let tree = Tree { levels };
        debug!(
            "built tree: leaves={} depth={} root={}",
            leaf_count,
            tree.depth(),
            hex::encode(tree.root())
        );
        Ok(tree)
    }

    /// Reassembles a tree from previously exported levels.
    ///
    /// Only the shape is validated here; use
    /// [`check::first_mismatch`](super::check::first_mismatch) to validate
    /// the digests.
    pub fn from_levels(levels: Vec<Vec<Hash32>>) -> Result<Self> {
        if levels.is_empty() || levels[0].is_empty() {
            return Err(AllowlistError::EmptyLeafSet);
        }
        if levels.len() > MAX_TREE_DEPTH + 1 {
            return Err(AllowlistError::MalformedTree {
                what: "level count".to_owned(),
                len: levels.len(),
                expected: MAX_TREE_DEPTH + 1,
            });
        }
        for (i, pair) in levels.windows(2).enumerate() {
            let expected = pair[0].len().div_ceil(2);
            if pair[1].len() != expected || pair[0].len() == 1 {
                return Err(AllowlistError::MalformedTree {
                    what: format!("level {}", i + 1),
                    len: pair[1].len(),
                    expected,
                });
            }
        }
        let top = levels[levels.len() - 1].len();
        if top != 1 {
            return Err(AllowlistError::MalformedTree {
                what: "top level".to_owned(),
                len: top,
                expected: 1,
            });
        }
        Ok(Tree { levels })
    }

    /// The commitment over the whole leaf set.
    pub fn root(&self) -> Hash32 {
        self.levels[self.levels.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    pub fn leaves(&self) -> &[Hash32] {
        &self.levels[0]
    }

    pub fn leaf(&self, index: usize) -> Option<&Hash32> {
        self.levels[0].get(index)
    }

    /// Number of combine steps between a leaf and the root; also the length
    /// of every proof from this tree.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn level(&self, level: usize) -> Option<&[Hash32]> {
        self.levels.get(level).map(|v| v.as_slice())
    }

    pub fn levels(&self) -> &[Vec<Hash32>] {
        &self.levels
    }

    /// Index of the first leaf equal to `leaf`.
    pub fn position_of(&self, leaf: &Hash32) -> Option<usize> {
        self.levels[0].iter().position(|l| l == leaf)
    }

    /// Sibling of node `nth` at `level`, applying the self-duplication rule.
    pub(crate) fn sibling(&self, level: usize, nth: usize) -> Hash32 {
        let nodes = &self.levels[level];
        let peer = nth ^ 1;
        if peer < nodes.len() {
            nodes[peer]
        } else {
            nodes[nth]
        }
    }
}

fn hash_pair(pair: &[Hash32]) -> Hash32 {
    match pair {
        [a, b] => hasher::hash2_sorted(a, b),
        [a] => hasher::hash2_sorted(a, a),
        _ => unreachable!("chunks(2) yields one or two nodes"),
    }
}
