//! Error type shared by every allowlist operation.
//!
//! All variants except [`AllowlistError::Io`] and [`AllowlistError::Json`] are
//! local validation failures raised before any hashing takes place. None of
//! them are retryable. A proof that simply does not match a root is not an
//! error: the verifier returns `false` for it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllowlistError {
    #[error("InvalidIdentity: length {len} is outside 1..={max}")]
    InvalidIdentity { len: usize, max: usize },

    #[error("EmptyLeafSet: a tree needs at least one leaf")]
    EmptyLeafSet,

    #[error("IndexOutOfRange: index {index} not in [0, {leaf_count})")]
    IndexOutOfRange { index: i64, leaf_count: usize },

    #[error("MalformedProof: {what} is {len} bytes, expected {expected}")]
    MalformedProof {
        what: String,
        len: usize,
        expected: usize,
    },

    #[error("MalformedTree: {what} has {len} nodes, expected {expected}")]
    MalformedTree {
        what: String,
        len: usize,
        expected: usize,
    },

    #[error("NotAMember: {0} is not on the allowlist")]
    NotAMember(String),

    #[error("MalformedHex: cannot decode {0:?}")]
    MalformedHex(String),

    #[error("Io: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json: {0}")]
    Json(#[from] serde_json::Error),
}

impl AllowlistError {
    /// True for the errors that describe a badly shaped proof, whether the
    /// bytes had the wrong width or the text could not be decoded.
    pub fn is_malformed_proof(&self) -> bool {
        matches!(
            self,
            AllowlistError::MalformedProof { .. } | AllowlistError::MalformedHex(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AllowlistError>;
