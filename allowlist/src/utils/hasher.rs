//! Hashing utilities for the allowlist tree.
//!
//! This module provides keccak-256 based hashing functions for:
//! - Single values (leaf digests)
//! - Ordered pairs of values
//! - Commutative pairs of values (the node combine rule)
//! - In-place node hashing
//!
//! keccak-256 is the hash an EVM contract verifies with, so every digest
//! produced here can be checked on-chain bit for bit.

use alloy_primitives::Keccak256;

use crate::def::HASH_LEN;

/// Type alias for a 32-byte hash value.
pub type Hash32 = [u8; HASH_LEN];

/// A constant representing a hash of all zeros.
pub const ZERO_HASH32: Hash32 = [0u8; HASH_LEN];

/// Computes the keccak-256 hash of a single value.
///
/// # Arguments
/// * `a` - Value to hash
///
/// # Returns
/// The 32-byte hash of the input
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(a);
    hasher.finalize().0
}

/// Computes the keccak-256 hash of two values concatenated in the given order.
///
/// # Arguments
/// * `a` - First value to hash
/// * `b` - Second value to hash
///
/// # Returns
/// The 32-byte hash of `a || b`
pub fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().0
}

/// Computes the keccak-256 hash of two values after sorting them.
///
/// This is the node combine rule: `hash(min(a, b) || max(a, b))`. Because
/// the result does not depend on argument order, a verifier never needs to
/// know on which side a sibling sat.
///
/// # Arguments
/// * `a` - First value to hash
/// * `b` - Second value to hash
///
/// # Returns
/// The 32-byte hash of the lexicographically smaller value followed by the larger
pub fn hash2_sorted<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
    if a.as_ref() <= b.as_ref() {
        hash2(a, b)
    } else {
        hash2(b, a)
    }
}

/// Computes the sorted-pair hash of two values and stores it in-place.
///
/// # Arguments
/// * `target` - Buffer to store the resulting hash
/// * `src_a` - First value to hash
/// * `src_b` - Second value to hash
pub fn node_hash_inplace<T: AsRef<[u8]>>(target: &mut [u8], src_a: T, src_b: T) {
    let (lo, hi) = if src_a.as_ref() <= src_b.as_ref() {
        (src_a, src_b)
    } else {
        (src_b, src_a)
    };
    let mut hasher = Keccak256::new();
    hasher.update(lo);
    hasher.update(hi);
    target.copy_from_slice(hasher.finalize().as_slice());
}
