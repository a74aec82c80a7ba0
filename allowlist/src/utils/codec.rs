//! Encoding and decoding utilities for digests and identities.
//!
//! Digests and identities travel as `0x`-prefixed lowercase hex strings, the
//! form an EVM contract call takes them in. Decoding accepts the prefix as
//! optional and is case-insensitive.

use crate::def::HASH_LEN;
use crate::error::{AllowlistError, Result};
use crate::utils::hasher::Hash32;

/// Encodes bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex<T: AsRef<[u8]>>(bz: T) -> String {
    format!("0x{}", hex::encode(bz))
}

/// Decodes a hex string, with or without the `0x` prefix.
///
/// # Errors
/// [`AllowlistError::MalformedHex`] if the text is not valid hex
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let body = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(body).map_err(|_| AllowlistError::MalformedHex(s.to_owned()))
}

/// Copies a byte slice into a fixed-width digest.
///
/// # Arguments
/// * `what` - Name of the field, used in the error message
/// * `bz` - Bytes that must be exactly [`HASH_LEN`] long
///
/// # Errors
/// [`AllowlistError::MalformedProof`] if the width is wrong
pub fn digest_from_slice(what: &str, bz: &[u8]) -> Result<Hash32> {
    Hash32::try_from(bz).map_err(|_| AllowlistError::MalformedProof {
        what: what.to_owned(),
        len: bz.len(),
        expected: HASH_LEN,
    })
}

/// Decodes a hex string into a fixed-width digest.
pub fn digest_from_hex(what: &str, s: &str) -> Result<Hash32> {
    let bz = from_hex(s)?;
    digest_from_slice(what, &bz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_prefix_is_optional() {
        assert_eq!(from_hex("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(from_hex("DEAD").unwrap(), vec![0xde, 0xad]);
        assert_eq!(from_hex(" 0XdeAD\n").unwrap(), vec![0xde, 0xad]);
        assert_eq!(to_hex([0xde, 0xad]), "0xdead");
    }

    #[test]
    fn test_bad_hex() {
        let err = from_hex("0xzz").unwrap_err();
        assert!(err.is_malformed_proof());
        assert!(from_hex("0xabc").is_err());
    }

    #[test]
    fn test_digest_width() {
        let d = digest_from_hex("root", &to_hex([7u8; 32])).unwrap();
        assert_eq!(d, [7u8; 32]);

        match digest_from_slice("sibling[0]", &[1u8; 31]) {
            Err(AllowlistError::MalformedProof { what, len, expected }) => {
                assert_eq!(what, "sibling[0]");
                assert_eq!(len, 31);
                assert_eq!(expected, 32);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
