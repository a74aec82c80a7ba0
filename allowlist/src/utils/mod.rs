//! Utility functions for the allowlist crate.
//!
//! This module provides:
//! - Hashing functions (keccak-256 leaf and node hashing)
//! - Hex encoding/decoding of digests and identities

pub mod codec;
pub mod hasher;
