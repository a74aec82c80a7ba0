// Command-line driver for allowlist commitments.
// 5 sub-commands
// - build  (identities -> manifest with root and per-entry proofs)
// - root   (identities -> root only)
// - prove  (manifest + identity -> hex proof)
// - verify (root + leaf/identity + proof -> exit status)
// - check  (manifest -> rebuild and re-verify everything)
use allowlist::config::Config;
use allowlist::encoder::LeafEncoder;
use allowlist::manifest::{Manifest, ManifestIssue};
use allowlist::merkletree::MerkleProof;
use allowlist::utils::codec;
use allowlist::Allowlist;
use allowlist_cli::common::{cli, input, utils};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::process;
use std::time::Instant;

fn build(config: &Config, input_path: &str, output: &str) -> Result<()> {
    let ids = input::read_identities(input_path)?;
    let start = Instant::now();
    let list = Allowlist::new(ids, config)?;
    info!(
        "Built tree over {} leaves (depth {}) in {:.1?}",
        list.len(),
        list.tree().depth(),
        start.elapsed()
    );
    Manifest::from_allowlist(&list)?
        .save(output)
        .with_context(|| format!("writing manifest {}", output))?;
    info!("Root: {}", codec::to_hex(list.root()));
    println!("{}", codec::to_hex(list.root()));
    Ok(())
}

fn root(config: &Config, input_path: &str) -> Result<()> {
    let ids = input::read_identities(input_path)?;
    let list = Allowlist::new(ids, config)?;
    println!("{}", codec::to_hex(list.root()));
    Ok(())
}

fn prove(manifest_path: &str, identity: &str) -> Result<()> {
    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path))?;
    let id = input::parse_identity(identity)?;
    let (position, entry) = manifest
        .find(&id)
        .ok_or_else(|| anyhow!("{} is not in {}", identity, manifest_path))?;
    debug!("{} found at position {}", identity, position);
    println!("{}", serde_json::to_string_pretty(&entry.proof)?);
    Ok(())
}

fn verify(
    config: &Config,
    root: &str,
    identity: Option<&str>,
    leaf: Option<&str>,
    proof: &[String],
) -> Result<bool> {
    let root = codec::digest_from_hex("root", root)?;
    let leaf = match (identity, leaf) {
        (Some(identity), _) => {
            let id = input::parse_identity(identity)?;
            LeafEncoder::from_config(config).encode(&id)?
        }
        (None, Some(leaf)) => codec::digest_from_hex("leaf", leaf)?,
        (None, None) => bail!("one of --identity or --leaf is required"),
    };
    let proof = MerkleProof::from_hex(proof)?;
    Ok(allowlist::verify_membership(&leaf, &proof, &root))
}

fn check(config: &Config, manifest_path: &str) -> Result<bool> {
    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path))?;
    let issues = manifest.check(config)?;
    for issue in issues.iter() {
        match issue {
            ManifestIssue::RootMismatch { recorded, rebuilt } => {
                warn!("root mismatch: recorded {} rebuilt {}", recorded, rebuilt)
            }
            ManifestIssue::LeafMismatch { index } => warn!("entry {}: leaf mismatch", index),
            ManifestIssue::ProofRejected { index } => warn!("entry {}: proof rejected", index),
            ManifestIssue::CountMismatch { recorded, actual } => {
                warn!("leaf_count {} but {} entries", recorded, actual)
            }
            ManifestIssue::IndexMismatch { recorded, actual } => {
                warn!("entry {}: recorded index {}", actual, recorded)
            }
        }
    }
    info!(
        "Checked {} entries: {} issue(s)",
        manifest.entries.len(),
        issues.len()
    );
    Ok(issues.is_empty())
}

fn run(args: &cli::AllowlistCli) -> Result<bool> {
    let config = utils::load_config(args)?;
    debug!("cli: {}", serde_json::to_string(args)?);
    match &args.command {
        Some(cli::Command::Build { input, output }) => build(&config, input, output).map(|_| true),
        Some(cli::Command::Root { input }) => root(&config, input).map(|_| true),
        Some(cli::Command::Prove { manifest, identity }) => prove(manifest, identity).map(|_| true),
        Some(cli::Command::Verify {
            root,
            identity,
            leaf,
            proof,
        }) => {
            let ok = verify(&config, root, identity.as_deref(), leaf.as_deref(), proof)?;
            println!("{}", ok);
            Ok(ok)
        }
        Some(cli::Command::Check { manifest }) => check(&config, manifest),
        None => bail!(
            "No command provided: valid commands are build, root, prove, verify, check. Use --help to see all options."
        ),
    }
}

fn main() {
    let args = cli::AllowlistCli::parse();
    utils::init_logging(&args.log_level);
    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            log::error!("{:#}", err);
            process::exit(2);
        }
    }
}
