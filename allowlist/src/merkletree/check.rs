//! Verification utilities for tree consistency checking.
//!
//! The checks recompute every internal node from its children under the
//! sorted-pair and self-duplication rules and compare it with the stored
//! digest. They matter for trees reassembled with
//! [`Tree::from_levels`], whose digests were not produced by this crate.

use super::tree::Tree;
use crate::utils::hasher::{self, ZERO_HASH32};

/// Position of a node: `(level, nth)`, level 0 being the leaves.
pub type NodePos = (usize, usize);

/// Returns the first node whose digest does not match its children, scanning
/// bottom-up and left to right.
///
/// # Arguments
/// * `tree` - The tree to verify
pub fn first_mismatch(tree: &Tree) -> Option<NodePos> {
    let mut sum = ZERO_HASH32;
    for level in 1..=tree.depth() {
        let (Some(children), Some(parents)) = (tree.level(level - 1), tree.level(level)) else {
            return Some((level, 0));
        };
        for (nth, parent) in parents.iter().enumerate() {
            let left = &children[2 * nth];
            let right = children.get(2 * nth + 1).unwrap_or(left);
            hasher::node_hash_inplace(&mut sum, left, right);
            if sum != *parent {
                return Some((level, nth));
            }
        }
    }
    None
}

/// Performs a complete consistency check of the tree
///
/// # Panics
/// Panics if any parent node's hash doesn't match its children
pub fn check_hash_consistency(tree: &Tree) {
    if let Some((level, nth)) = first_mismatch(tree) {
        panic!("Mismatch {}-{} l:{} r:{}", level, nth, 2 * nth, 2 * nth + 1);
    }
}

/// Checks that every leaf's generated proof verifies against the root and
/// returns the indices that do not.
pub fn failing_proofs(tree: &Tree) -> Vec<usize> {
    let root = tree.root();
    (0..tree.leaf_count())
        .filter(|&i| match (tree.leaf(i), tree.get_proof(i)) {
            (Some(leaf), Ok(proof)) => !proof.verify(leaf, &root),
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hasher::Hash32;

    fn leaves(n: usize) -> Vec<Hash32> {
        (0..n).map(|i| hasher::hash([i as u8, 0xaa])).collect()
    }

    #[test]
    fn test_built_tree_is_consistent() {
        for n in [1, 2, 3, 10, 17] {
            let tree = Tree::new(leaves(n)).unwrap();
            check_hash_consistency(&tree);
            assert!(failing_proofs(&tree).is_empty());
        }
    }

    #[test]
    fn test_detects_tampered_node() {
        let tree = Tree::new(leaves(7)).unwrap();
        let mut levels = tree.levels().to_vec();
        levels[1][3][5] ^= 0xff;
        let tampered = Tree::from_levels(levels).unwrap();
        assert_eq!(first_mismatch(&tampered), Some((1, 3)));
        assert!(!failing_proofs(&tampered).is_empty());
    }

    #[test]
    #[should_panic(expected = "Mismatch 1-0")]
    fn test_tampered_leaf_panics() {
        let tree = Tree::new(leaves(4)).unwrap();
        let mut levels = tree.levels().to_vec();
        levels[0][0][0] ^= 1;
        check_hash_consistency(&Tree::from_levels(levels).unwrap());
    }
}
