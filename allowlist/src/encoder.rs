//! Leaf encoder: maps a participant identity to a fixed-width leaf digest.
//!
//! Two canonical encodings are supported. Both hash with keccak-256 so the
//! leaves agree with what a contract computes from `msg.sender`:
//!
//! * [`LeafEncoding::Padded`] left-pads the identity with zeros to one ABI
//!   word before hashing, i.e. `keccak256(abi.encode(address))`.
//! * [`LeafEncoding::Packed`] hashes the identity bytes as they are, i.e.
//!   `keccak256(abi.encodePacked(address))`.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::def::WORD_LEN;
use crate::error::{AllowlistError, Result};
use crate::utils::hasher::{self, Hash32};

/// Canonical byte encoding applied to an identity before it is hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafEncoding {
    #[default]
    Padded,
    Packed,
}

impl LeafEncoding {
    /// Hard width limit imposed by the encoding itself, if any.
    pub fn width_limit(&self) -> Option<usize> {
        match self {
            LeafEncoding::Padded => Some(WORD_LEN),
            LeafEncoding::Packed => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LeafEncoding::Padded => "padded",
            LeafEncoding::Packed => "packed",
        }
    }
}

impl std::str::FromStr for LeafEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "padded" => Ok(LeafEncoding::Padded),
            "packed" => Ok(LeafEncoding::Packed),
            _ => Err(format!("unknown leaf encoding: {}", s)),
        }
    }
}

impl std::fmt::Display for LeafEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns identities into leaves under one fixed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafEncoder {
    encoding: LeafEncoding,
    max_len: usize,
}

impl Default for LeafEncoder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl LeafEncoder {
    pub fn new(encoding: LeafEncoding, max_identity_len: usize) -> Self {
        let max_len = match encoding.width_limit() {
            Some(limit) => limit.min(max_identity_len),
            None => max_identity_len,
        };
        Self { encoding, max_len }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.encoding, config.max_identity_len)
    }

    pub fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    pub fn max_identity_len(&self) -> usize {
        self.max_len
    }

    /// Checks an identity's width without hashing it.
    ///
    /// # Errors
    /// [`AllowlistError::InvalidIdentity`] if the identity is empty or wider
    /// than the encoder accepts
    pub fn validate(&self, identity: &[u8]) -> Result<()> {
        if identity.is_empty() || identity.len() > self.max_len {
            return Err(AllowlistError::InvalidIdentity {
                len: identity.len(),
                max: self.max_len,
            });
        }
        Ok(())
    }

    /// Hashes one identity into its leaf digest.
    ///
    /// # Arguments
    /// * `identity` - Raw identity bytes, typically a 20-byte address
    ///
    /// # Returns
    /// The 32-byte leaf digest
    pub fn encode(&self, identity: &[u8]) -> Result<Hash32> {
        self.validate(identity)?;
        let leaf = match self.encoding {
            LeafEncoding::Padded => {
                let mut word = [0u8; WORD_LEN];
                word[WORD_LEN - identity.len()..].copy_from_slice(identity);
                hasher::hash(word)
            }
            LeafEncoding::Packed => hasher::hash(identity),
        };
        Ok(leaf)
    }

    /// Hashes a batch of identities, failing on the first invalid one.
    pub fn encode_all<I, T>(&self, identities: I) -> Result<Vec<Hash32>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        identities
            .into_iter()
            .map(|id| self.encode(id.as_ref()))
            .collect()
    }
}
