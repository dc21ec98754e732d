use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 of the PIN as lowercase hex.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// How the PIN is kept on line 1 of an account record.
///
/// `Plain` keeps files readable by the stock ATM. `Sha256` stores
/// [`hash_pin`] output instead; records written under one scheme are not
/// readable under the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinScheme {
    #[default]
    Plain,
    Sha256,
}

impl PinScheme {
    /// Converts a PIN typed by the user into its stored form.
    pub fn encode(&self, pin: &str) -> String {
        match self {
            PinScheme::Plain => pin.to_string(),
            PinScheme::Sha256 => hash_pin(pin),
        }
    }

    /// Exact, case-sensitive comparison of user input against a stored PIN.
    pub fn matches(&self, stored: &str, input: &str) -> bool {
        match self {
            PinScheme::Plain => stored == input,
            PinScheme::Sha256 => stored == hash_pin(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_pin_is_sha256_hex() {
        assert_eq!(
            hash_pin("5678"),
            "f8638b979b2f4f793ddb6dbd197e0ee25a7a6ea32b0ae22f5e3c5d119d839e75"
        );
        assert_eq!(hash_pin("5678").len(), 64);
    }

    #[test]
    fn plain_scheme_is_exact_and_case_sensitive() {
        let scheme = PinScheme::Plain;
        assert_eq!(scheme.encode("ab12"), "ab12");
        assert!(scheme.matches("ab12", "ab12"));
        assert!(!scheme.matches("ab12", "AB12"));
        assert!(!scheme.matches("ab12", " ab12"));
    }

    #[test]
    fn sha256_scheme_compares_digests() {
        let scheme = PinScheme::Sha256;
        let stored = scheme.encode("5678");
        assert_ne!(stored, "5678");
        assert!(scheme.matches(&stored, "5678"));
        assert!(!scheme.matches(&stored, "5679"));
        // a plaintext record does not authenticate under the hashed scheme
        assert!(!scheme.matches("5678", "5678"));
    }
}
