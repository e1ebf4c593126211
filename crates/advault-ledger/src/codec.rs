//! Identifier codec.
//!
//! The contracts take 32-byte identifiers and strkey addresses; callers send
//! free-form labels, raw hex, or aliases. These conversions are pure and run
//! at every boundary before anything touches the external tool.

use crate::domain::error::LedgerError;
use lazy_static::lazy_static;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref HEX64: Regex = Regex::new(r"^[0-9a-fA-F]{64}$").expect("static regex");
    static ref ADDRESS: Regex = Regex::new(r"^G[A-Z0-9]{10,}$").expect("static regex");
}

/// Normalize a caller-supplied campaign identifier to 64 lowercase hex chars.
///
/// No input draws 32 bytes from the OS RNG. A value already in 64-hex form is
/// used verbatim (lowercased). Anything else is hashed with SHA-256, so the
/// same human-readable label always maps to the same on-ledger identifier.
pub fn campaign_id_hex(input: Option<&str>) -> String {
    match input {
        None | Some("") => {
            let mut bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
        Some(raw) if HEX64.is_match(raw) => raw.to_lowercase(),
        Some(raw) => hex::encode(Sha256::digest(raw.as_bytes())),
    }
}

/// Check whether a string already has the public-address shape (`G` followed
/// by at least 10 uppercase alphanumerics).
pub fn is_address(s: &str) -> bool {
    ADDRESS.is_match(s)
}

/// Validate an address at a caller boundary.
pub fn validate_address(s: &str) -> Result<&str, LedgerError> {
    if is_address(s) {
        Ok(s)
    } else {
        Err(LedgerError::Validation(format!(
            "invalid address (expected G...): {s:?}"
        )))
    }
}

/// Normalize a categorical event tag to a lowercase symbol, defaulting to
/// `click`.
pub fn event_symbol(input: Option<&str>) -> String {
    match input {
        None | Some("") => "click".to_string(),
        Some(raw) => raw.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_id_deterministic_for_labels() {
        let a = campaign_id_hex(Some("promo-fall-2024"));
        let b = campaign_id_hex(Some("promo-fall-2024"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        // sha256("promo-fall-2024")
        assert_eq!(
            a,
            hex::encode(Sha256::digest(b"promo-fall-2024".as_slice()))
        );
    }

    #[test]
    fn test_campaign_id_hex_passthrough_lowercased() {
        let upper = "AB".repeat(32);
        let out = campaign_id_hex(Some(&upper));
        assert_eq!(out, upper.to_lowercase());
    }

    #[test]
    fn test_campaign_id_random_when_absent() {
        let a = campaign_id_hex(None);
        let b = campaign_id_hex(None);
        assert_eq!(a.len(), 64);
        assert_eq!(b.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_string_treated_as_absent() {
        let a = campaign_id_hex(Some(""));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_address_shape() {
        assert!(is_address("GABCDEFGHIJ"));
        assert!(is_address("GA7QYNF7SOWQ3GLR2BGMW6LWBA7SAFKBX5WBKGOMGLBS3RVOS4ZF5HEX"));
        assert!(!is_address("ABCDEFGHIJK")); // wrong prefix
        assert!(!is_address("GABCDEFGHI")); // too short (10 chars total)
        assert!(!is_address("GABCDE-GHIJ")); // symbol
        assert!(!is_address("gabcdefghij")); // lowercase
    }

    #[test]
    fn test_validate_address_error_is_validation() {
        let err = validate_address("nope").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_event_symbol_defaults_and_lowercases() {
        assert_eq!(event_symbol(None), "click");
        assert_eq!(event_symbol(Some("")), "click");
        assert_eq!(event_symbol(Some("IMPRESSION")), "impression");
    }
}
