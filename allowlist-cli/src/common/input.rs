//! Reading identity lists.
//!
//! Two formats are accepted:
//! - a JSON array of hex strings, e.g. the `addresses` list a deploy script dumps
//! - plain text with one hex identity per line; blank lines and `#` comments
//!   are skipped

use std::fs;

use allowlist::def::ADDRESS_LEN;
use allowlist::utils::codec;
use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use log::{info, warn};

pub fn parse_identity(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let bz = codec::from_hex(s).with_context(|| format!("invalid identity {:?}", s))?;
    if bz.len() == ADDRESS_LEN && has_mixed_case(s) && Address::parse_checksummed(s, None).is_err() {
        warn!("{} does not match its EIP-55 checksum", s);
    }
    Ok(bz)
}

fn has_mixed_case(s: &str) -> bool {
    let body = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    body.chars().any(|c| c.is_ascii_uppercase()) && body.chars().any(|c| c.is_ascii_lowercase())
}

pub fn parse_identities(text: &str) -> Result<Vec<Vec<u8>>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let items: Vec<String> =
            serde_json::from_str(trimmed).context("identity file is not a JSON array of strings")?;
        return items.iter().map(|s| parse_identity(s)).collect();
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| parse_identity(line).with_context(|| format!("line {}", n + 1)))
        .collect()
}

pub fn read_identities(path: &str) -> Result<Vec<Vec<u8>>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let ids = parse_identities(&text)?;
    if ids.is_empty() {
        return Err(anyhow!("{} contains no identities", path));
    }
    info!("Read {} identities from {}", ids.len(), path);
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let text = "# allowlist\n0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\n  0x70997970c51812dc3a010c7d01b50e0d17dc79c8  \n";
        let ids = parse_identities(text).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0][0], 0xf3);
        assert_eq!(ids[1][19], 0xc8);
    }

    #[test]
    fn test_mixed_case_ignores_prefix() {
        assert!(!has_mixed_case("0Xabcdef"));
        assert!(!has_mixed_case("0xABCDEF"));
        assert!(!has_mixed_case("ABCDEF"));
        assert!(has_mixed_case("0XaBcdef"));
        assert!(has_mixed_case("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
    }

    #[test]
    fn test_parse_json() {
        let text = r#"["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "0x01"]"#;
        let ids = parse_identities(text).unwrap();
        assert_eq!(ids[1], vec![1u8]);
    }

    #[test]
    fn test_bad_line_reports_position() {
        let err = parse_identities("0x01\nnot-hex\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-input")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("ids.txt");
        std::fs::write(&path, "# nothing here\n").unwrap();
        assert!(read_identities(path.to_str().unwrap()).is_err());
    }
}
