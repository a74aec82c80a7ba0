//! Configuration module for the allowlist commitment.
//!
//! Three knobs shape a commitment:
//!
//! ## Leaf Encoding
//! - `encoding`: how an identity becomes a leaf (default: [`LeafEncoding::Padded`])
//!   - Must match whatever the on-chain verifier hashes, otherwise no proof
//!     will ever verify
//!
//! ## Identity Validation
//! - `max_identity_len`: largest accepted identity, in bytes (default: 32)
//!   - `Padded` never accepts more than one ABI word regardless of this value
//!
//! ## Parallelism
//! - `parallel_threshold`: narrowest level hashed on the rayon pool (default: 4096)
//!   - Does not change any digest, only where the hashing runs
//!
//! # Usage Examples
//! ```no_run
//! use allowlist::config::Config;
//! use allowlist::encoder::LeafEncoding;
//!
//! let mut config = Config::default();
//! config.set_encoding(LeafEncoding::Packed);
//! config.save("allowlist.config.json").unwrap();
//!
//! let loaded = Config::load("allowlist.config.json").unwrap();
//! assert_eq!(loaded.encoding, LeafEncoding::Packed);
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::def::{DEFAULT_MAX_IDENTITY_LEN, DEFAULT_PARALLEL_THRESHOLD};
use crate::encoder::{LeafEncoder, LeafEncoding};
use crate::error::Result;

/// Configuration for building and verifying an allowlist commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity-to-leaf encoding.
    pub encoding: LeafEncoding,
    /// Largest accepted identity, in bytes.
    pub max_identity_len: usize,
    /// Levels with at least this many nodes are hashed in parallel.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: LeafEncoding::default(),
            max_identity_len: DEFAULT_MAX_IDENTITY_LEN,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Config {
    pub fn new(encoding: LeafEncoding, max_identity_len: usize, parallel_threshold: usize) -> Self {
        Self {
            encoding,
            max_identity_len,
            parallel_threshold,
        }
    }

    pub fn set_encoding(&mut self, encoding: LeafEncoding) {
        self.encoding = encoding;
    }

    pub fn set_max_identity_len(&mut self, max_identity_len: usize) {
        self.max_identity_len = max_identity_len;
    }

    /// A threshold of 0 is treated as 1 so every level stays eligible.
    pub fn set_parallel_threshold(&mut self, parallel_threshold: usize) {
        self.parallel_threshold = parallel_threshold.max(1);
    }

    /// Largest identity this configuration accepts once the encoding's own
    /// limit is applied.
    pub fn effective_max_identity_len(&self) -> usize {
        LeafEncoder::from_config(self).max_identity_len()
    }

    /// Reads a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bz = fs::read(path.as_ref())?;
        let config: Config = serde_json::from_slice(&bz)?;
        info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.encoding, LeafEncoding::Padded);
        assert_eq!(config.max_identity_len, 32);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_effective_max_identity_len() {
        let mut config = Config::new(LeafEncoding::Padded, 64, 16);
        assert_eq!(config.effective_max_identity_len(), 32);
        config.set_encoding(LeafEncoding::Packed);
        assert_eq!(config.effective_max_identity_len(), 64);
        config.set_max_identity_len(20);
        assert_eq!(config.effective_max_identity_len(), 20);
    }

    #[test]
    fn test_zero_threshold_clamped() {
        let mut config = Config::default();
        config.set_parallel_threshold(0);
        assert_eq!(config.parallel_threshold, 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-config")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.set_encoding(LeafEncoding::Packed);
        config.set_parallel_threshold(8);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-config")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"encoding":"packed"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.encoding, LeafEncoding::Packed);
        assert_eq!(config.max_identity_len, DEFAULT_MAX_IDENTITY_LEN);
    }
}
