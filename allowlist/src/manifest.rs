//! Persisted allowlist artifact.
//!
//! A manifest is the JSON file handed to whoever submits membership claims:
//! the root to publish plus one record per entry with the identity, its leaf
//! and its hex proof. It is self-describing, so a consumer can check it
//! without the original identity file:
//!
//! ```json
//! {
//!   "encoding": "padded",
//!   "max_identity_len": 32,
//!   "root": "0x…",
//!   "leaf_count": 2,
//!   "depth": 1,
//!   "entries": [
//!     { "index": 0, "identity": "0x…", "leaf": "0x…", "proof": ["0x…"] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::allowlist::Allowlist;
use crate::config::Config;
use crate::def::DEFAULT_MAX_IDENTITY_LEN;
use crate::encoder::{LeafEncoder, LeafEncoding};
use crate::error::{AllowlistError, Result};
use crate::merkletree::MerkleProof;
use crate::utils::codec;
use crate::utils::hasher::Hash32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub identity: String,
    pub leaf: String,
    pub proof: MerkleProof,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub encoding: LeafEncoding,
    /// Widest identity the building encoder accepted.
    #[serde(default = "default_max_identity_len")]
    pub max_identity_len: usize,
    pub root: String,
    pub leaf_count: usize,
    pub depth: usize,
    pub entries: Vec<ManifestEntry>,
}

/// Problem found by [`Manifest::check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestIssue {
    RootMismatch { recorded: String, rebuilt: String },
    LeafMismatch { index: usize },
    ProofRejected { index: usize },
    CountMismatch { recorded: usize, actual: usize },
    IndexMismatch { recorded: usize, actual: usize },
}

fn default_max_identity_len() -> usize {
    DEFAULT_MAX_IDENTITY_LEN
}

impl Manifest {
    pub fn from_allowlist(list: &Allowlist) -> Result<Self> {
        let tree = list.tree();
        let entries = list
            .identities()
            .iter()
            .enumerate()
            .map(|(index, identity)| {
                Ok(ManifestEntry {
                    index,
                    identity: codec::to_hex(identity),
                    leaf: codec::to_hex(tree.leaves()[index]),
                    proof: tree.get_proof(index)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            encoding: list.encoder().encoding(),
            max_identity_len: list.encoder().max_identity_len(),
            root: codec::to_hex(list.root()),
            leaf_count: tree.leaf_count(),
            depth: tree.depth(),
            entries,
        })
    }

    pub fn root_digest(&self) -> Result<Hash32> {
        codec::digest_from_hex("root", &self.root)
    }

    /// Looks up an entry by identity. Comparison is on decoded bytes, so
    /// letter case and the `0x` prefix do not matter.
    ///
    /// # Returns
    /// The entry's position in the file together with the entry
    pub fn find(&self, identity: &[u8]) -> Option<(usize, &ManifestEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| codec::from_hex(&e.identity).is_ok_and(|id| id == identity))
    }

    /// Decodes the recorded identities, in order.
    pub fn identities(&self) -> Result<Vec<Vec<u8>>> {
        self.entries
            .iter()
            .map(|e| codec::from_hex(&e.identity))
            .collect()
    }

    /// Rebuilds the commitment from the recorded identities and checks every
    /// recorded leaf and proof against it. The encoding and identity width
    /// recorded in the manifest override those in `config`.
    ///
    /// Issues are labelled with the entry's position in the file, not its
    /// recorded index.
    ///
    /// # Returns
    /// The issues found; empty means the manifest is sound
    pub fn check(&self, config: &Config) -> Result<Vec<ManifestIssue>> {
        let mut config = config.clone();
        config.set_encoding(self.encoding);
        config.set_max_identity_len(self.max_identity_len);
        let list = Allowlist::new(self.identities()?, &config)?;
        let encoder = LeafEncoder::from_config(&config);
        let root = list.root();

        let mut issues = vec![];
        if self.leaf_count != self.entries.len() {
            issues.push(ManifestIssue::CountMismatch {
                recorded: self.leaf_count,
                actual: self.entries.len(),
            });
        }
        if self.root_digest()? != root {
            issues.push(ManifestIssue::RootMismatch {
                recorded: self.root.clone(),
                rebuilt: codec::to_hex(root),
            });
        }
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.index != position {
                issues.push(ManifestIssue::IndexMismatch {
                    recorded: entry.index,
                    actual: position,
                });
            }
            let identity = codec::from_hex(&entry.identity)?;
            let leaf = encoder.encode(&identity)?;
            if codec::digest_from_hex("leaf", &entry.leaf)? != leaf {
                issues.push(ManifestIssue::LeafMismatch { index: position });
            }
            if !entry.proof.verify(&leaf, &root) {
                issues.push(ManifestIssue::ProofRejected { index: position });
            }
        }
        Ok(issues)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(
            "Saved manifest with {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let manifest: Manifest = serde_json::from_slice(&fs::read(path)?)?;
        if manifest.entries.is_empty() {
            return Err(AllowlistError::EmptyLeafSet);
        }
        info!(
            "Loaded manifest with {} entries from {}",
            manifest.entries.len(),
            path.display()
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Allowlist {
        let ids: Vec<Vec<u8>> = (1..=5u8).map(|i| vec![i; 20]).collect();
        Allowlist::new(&ids, &Config::default()).unwrap()
    }

    #[test]
    fn test_manifest_roundtrip_and_check() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-manifest")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("out/manifest.json");

        let list = sample();
        let manifest = Manifest::from_allowlist(&list).unwrap();
        assert_eq!(manifest.leaf_count, 5);
        assert_eq!(manifest.depth, 3);
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.root_digest().unwrap(), list.root());
        assert!(loaded.check(&Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_identity() {
        let manifest = Manifest::from_allowlist(&sample()).unwrap();
        let (position, entry) = manifest.find(&[3u8; 20]).unwrap();
        assert_eq!(position, 2);
        assert_eq!(entry.identity, codec::to_hex([3u8; 20]));
        assert!(manifest.find(&[9u8; 20]).is_none());
    }

    #[test]
    fn test_check_reports_tampering() {
        let mut manifest = Manifest::from_allowlist(&sample()).unwrap();
        let other = manifest.entries[0].proof.clone();
        manifest.entries[1].proof = other;
        manifest.entries[2].leaf = codec::to_hex([0u8; 32]);
        let issues = manifest.check(&Config::default()).unwrap();
        assert!(issues.contains(&ManifestIssue::ProofRejected { index: 1 }));
        assert!(issues.contains(&ManifestIssue::LeafMismatch { index: 2 }));

        manifest.entries[3].index = 99;
        let issues = manifest.check(&Config::default()).unwrap();
        assert!(issues.contains(&ManifestIssue::IndexMismatch {
            recorded: 99,
            actual: 3
        }));

        manifest.root = codec::to_hex([1u8; 32]);
        let issues = manifest.check(&Config::default()).unwrap();
        assert!(matches!(issues[0], ManifestIssue::RootMismatch { .. }));
    }

    #[test]
    fn test_check_uses_recorded_width() {
        let ids: Vec<Vec<u8>> = (1..=3u8).map(|i| vec![i; 40]).collect();
        let config = Config::new(LeafEncoding::Packed, 64, 4096);
        let manifest = Manifest::from_allowlist(&Allowlist::new(&ids, &config).unwrap()).unwrap();
        assert_eq!(manifest.max_identity_len, 64);
        assert!(manifest.check(&Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_load_without_width_uses_default() {
        let manifest = Manifest::from_allowlist(&sample()).unwrap();
        let mut value = serde_json::to_value(&manifest).unwrap();
        value.as_object_mut().unwrap().remove("max_identity_len");
        let back: Manifest = serde_json::from_value(value).unwrap();
        assert_eq!(back.max_identity_len, DEFAULT_MAX_IDENTITY_LEN);
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_load_rejects_empty() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-manifest")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("empty.json");
        std::fs::write(
            &path,
            r#"{"encoding":"padded","root":"0x00","leaf_count":0,"depth":0,"entries":[]}"#,
        )
        .unwrap();
        assert!(matches!(
            Manifest::load(&path),
            Err(AllowlistError::EmptyLeafSet)
        ));
    }
}
