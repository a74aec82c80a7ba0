use allowlist::encoder::LeafEncoding;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Subcommand, Debug, Serialize, Clone)]
pub enum Command {
    /// Build the commitment over an identity file and write a manifest
    Build {
        /// Identity file: one hex identity per line, or a JSON array of hex strings
        #[arg(long)]
        input: String,

        #[arg(long, default_value = "allowlist.manifest.json")]
        output: String,
    },
    /// Print only the root for an identity file
    Root {
        #[arg(long)]
        input: String,
    },
    /// Print the proof for one identity recorded in a manifest
    Prove {
        #[arg(long)]
        manifest: String,

        #[arg(long)]
        identity: String,
    },
    /// Check a proof against a root; exits with status 1 when it does not verify
    Verify {
        #[arg(long)]
        root: String,

        /// Identity to encode into the leaf (mutually exclusive with --leaf)
        #[arg(long, conflicts_with = "leaf")]
        identity: Option<String>,

        /// Already-encoded leaf digest
        #[arg(long)]
        leaf: Option<String>,

        /// Comma-separated sibling digests, leaf to root
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },
    /// Rebuild a manifest's tree and re-verify every recorded proof
    Check {
        #[arg(long)]
        manifest: String,
    },
}

#[derive(Parser, Debug, Serialize, Clone)]
#[command(name = "allowlist-cli", about = "Merkle allowlist commitments and proofs")]
pub struct AllowlistCli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// JSON config file; flags below override its values
    #[arg(long, default_value = "")]
    pub config: String,

    /// Leaf encoding: "padded" (zero-pad to 32 bytes) or "packed"
    #[arg(long)]
    pub encoding: Option<LeafEncoding>,

    #[arg(long)]
    pub max_identity_len: Option<usize>,

    /// Levels at least this wide are hashed in parallel
    #[arg(long)]
    pub parallel_threshold: Option<usize>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}
