//! Allowlist membership service.
//!
//! [`Allowlist`] owns the identity list, the encoder it was hashed with and
//! the tree built over the resulting leaves. After construction nothing is
//! mutated, so one instance can be shared across threads for any number of
//! concurrent proof and verification calls. Changing membership means
//! building a new instance.

use log::debug;

use crate::config::Config;
use crate::encoder::LeafEncoder;
use crate::error::{AllowlistError, Result};
use crate::merkletree::{MerkleProof, Tree};
use crate::utils::codec;
use crate::utils::hasher::Hash32;

#[derive(Clone, Debug)]
pub struct Allowlist {
    identities: Vec<Vec<u8>>,
    encoder: LeafEncoder,
    tree: Tree,
}

impl Allowlist {
    /// Encodes every identity and builds the commitment over them, in order.
    ///
    /// # Errors
    /// - [`AllowlistError::InvalidIdentity`] for the first identity the
    ///   encoder rejects
    /// - [`AllowlistError::EmptyLeafSet`] if `identities` is empty
    pub fn new<I, T>(identities: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let identities: Vec<Vec<u8>> = identities
            .into_iter()
            .map(|id| id.as_ref().to_vec())
            .collect();
        let encoder = LeafEncoder::from_config(config);
        let leaves = encoder.encode_all(&identities)?;
        let tree = Tree::with_parallel_threshold(leaves, config.parallel_threshold)?;
        debug!(
            "allowlist ready: {} identities, encoding={}",
            identities.len(),
            encoder.encoding()
        );
        Ok(Self {
            identities,
            encoder,
            tree,
        })
    }

    /// The commitment to publish to the on-chain verifier.
    pub fn root(&self) -> Hash32 {
        self.tree.root()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn encoder(&self) -> &LeafEncoder {
        &self.encoder
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn identities(&self) -> &[Vec<u8>] {
        &self.identities
    }

    /// Index of the first occurrence of `identity`.
    pub fn index_of(&self, identity: &[u8]) -> Option<usize> {
        self.identities.iter().position(|id| id.as_slice() == identity)
    }

    pub fn contains(&self, identity: &[u8]) -> bool {
        self.index_of(identity).is_some()
    }

    pub fn proof_at(&self, index: usize) -> Result<MerkleProof> {
        self.tree.get_proof(index)
    }

    /// Proof for the first occurrence of `identity`, or `None` if it is not
    /// on the list.
    pub fn proof_for_identity(&self, identity: &[u8]) -> Option<MerkleProof> {
        let index = self.index_of(identity)?;
        self.tree.get_proof(index).ok()
    }

    /// Checks an identity and proof against this list's root.
    ///
    /// # Errors
    /// [`AllowlistError::InvalidIdentity`] if the identity cannot be encoded
    pub fn verify_identity(&self, identity: &[u8], proof: &MerkleProof) -> Result<bool> {
        let leaf = self.encoder.encode(identity)?;
        Ok(proof.verify(&leaf, &self.root()))
    }

    /// Like [`Allowlist::proof_for_identity`] but reports an unknown identity
    /// as an error.
    ///
    /// # Errors
    /// - [`AllowlistError::InvalidIdentity`] if the identity cannot be encoded
    /// - [`AllowlistError::NotAMember`] if it is not on the list
    pub fn require_proof(&self, identity: &[u8]) -> Result<MerkleProof> {
        self.encoder.validate(identity)?;
        match self.index_of(identity) {
            Some(index) => self.tree.get_proof(index),
            None => Err(AllowlistError::NotAMember(codec::to_hex(identity))),
        }
    }
}
