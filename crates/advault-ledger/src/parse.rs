//! Best-effort parsing of the external tool's output.
//!
//! The tool's contract is human-oriented text. A transaction hash, when
//! present, follows one of a few known label phrases; stdout is JSON only
//! when the invoked contract function returns a value. Neither is guaranteed,
//! so both extractors return `None` on no match instead of failing - a
//! missing hash means "the operation may have succeeded but no identifier
//! could be recovered", which callers must treat as distinct from failure.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Ordered label patterns observed across tool versions. First match
    /// wins.
    static ref TX_HASH_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Signing transaction:\s*([0-9a-fA-F]{64})").expect("static regex"),
        Regex::new(r"(?i)Submitting transaction:\s*([0-9a-fA-F]{64})").expect("static regex"),
        Regex::new(r"(?i)Submitted tx hash:\s*([0-9a-fA-F]{64})").expect("static regex"),
        Regex::new(r"(?i)Transaction Hash:\s*([0-9a-fA-F]{64})").expect("static regex"),
    ];
}

/// Extract a 64-hex transaction hash from free-text tool output.
pub fn extract_tx_hash(text: &str) -> Option<String> {
    for pattern in TX_HASH_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(m) = captures.get(1) {
                return Some(m.as_str().to_lowercase());
            }
        }
    }
    None
}

/// Parse text as JSON if it happens to be JSON.
pub fn parse_json_opt(text: &str) -> Option<serde_json::Value> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "d6f3cba49f2f9d0b2a9a0e8b1c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d";

    #[test]
    fn test_all_label_phrases() {
        for label in [
            "Signing transaction:",
            "Submitting transaction:",
            "Submitted tx hash:",
            "Transaction Hash:",
        ] {
            let text = format!("noise before\n{label} {HASH}\nnoise after");
            assert_eq!(extract_tx_hash(&text).as_deref(), Some(HASH), "{label}");
        }
    }

    #[test]
    fn test_label_is_case_insensitive() {
        let text = format!("SIGNING TRANSACTION: {HASH}");
        assert_eq!(extract_tx_hash(&text).as_deref(), Some(HASH));
    }

    #[test]
    fn test_hash_is_lowercased() {
        let upper = HASH.to_uppercase();
        let text = format!("Transaction Hash: {upper}");
        assert_eq!(extract_tx_hash(&text).as_deref(), Some(HASH));
    }

    #[test]
    fn test_no_match_is_none_not_error() {
        assert_eq!(extract_tx_hash("nothing of interest here"), None);
        assert_eq!(extract_tx_hash(""), None);
        // A bare hash without a recognized label is not extracted.
        assert_eq!(extract_tx_hash(HASH), None);
        // A short hash after a label does not match.
        assert_eq!(
            extract_tx_hash("Transaction Hash: abc123"),
            None
        );
    }

    #[test]
    fn test_pattern_order_first_match_wins() {
        let other = "e".repeat(64);
        let text = format!("Transaction Hash: {other}\nSigning transaction: {HASH}");
        // "Signing transaction" is earlier in the ordered list even though it
        // appears later in the text.
        assert_eq!(extract_tx_hash(&text).as_deref(), Some(HASH));
    }

    #[test]
    fn test_json_best_effort() {
        assert_eq!(
            parse_json_opt(r#"{"budget":100}"#),
            Some(serde_json::json!({"budget": 100}))
        );
        assert_eq!(parse_json_opt("true"), Some(serde_json::json!(true)));
        assert_eq!(parse_json_opt("not json"), None);
        assert_eq!(parse_json_opt(""), None);
    }
}
