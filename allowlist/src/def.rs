//! Core definitions and constants for the allowlist commitment.
//!
//! This module fixes the widths every other module agrees on:
//! - Digest width produced by the keccak-256 hasher
//! - Account-style identity width
//! - ABI word width used when identities are zero-padded before hashing
//!
//! and the default tuning knobs used by [`Config`](crate::config::Config).

/// Width in bytes of every digest (leaf, node and root).
pub const HASH_LEN: usize = 32;

/// Width of an account-style identity (an EVM address).
pub const ADDRESS_LEN: usize = 20;

/// Width of one ABI word. `Padded` leaves hash the identity left-padded to
/// this width.
pub const WORD_LEN: usize = 32;

/// Default upper bound for identity width, in bytes.
pub const DEFAULT_MAX_IDENTITY_LEN: usize = WORD_LEN;

/// Levels narrower than this are hashed on the calling thread.
/// Wider levels fan their pairs out over the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Upper bound on the depth of a tree: a level count beyond this would need
/// more leaves than fit in memory.
pub const MAX_TREE_DEPTH: usize = 64;

/// Tag written at the head of a binary-encoded proof.
pub const PROOF_MAGIC: u8 = 0xa1;
