//! Credential digest module
//!
//! Turns a username/password pair into a deterministic one-way hash:
//! lowercase the username, apply Unicode NFC to both fields, concatenate,
//! digest the UTF-8 bytes, and render as lowercase hex.

use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use unicode_normalization::UnicodeNormalization;

/// Supported digest algorithms
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        };
        write!(f, "{name}")
    }
}

impl Algorithm {
    /// Hex digest length in characters (two per output byte)
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }
}

/// Normalize a credential pair into the canonical string to be hashed
///
/// The username is lowercased before NFC so that case variants collapse to
/// one form; the password keeps its case and only gets NFC. The two are
/// concatenated with no separator.
#[must_use]
pub fn normalize_credentials(uname: &str, passwd: &str) -> String {
    let user: String = uname.to_lowercase().nfc().collect();
    let pass: String = passwd.nfc().collect();
    user + &pass
}

/// Compute the lowercase hex digest of a byte sequence
#[must_use]
pub fn digest_hex(algorithm: Algorithm, data: &[u8]) -> String {
    match algorithm {
        Algorithm::Sha1 => hex::encode(Sha1::digest(data)),
        Algorithm::Sha256 => hex::encode(Sha256::digest(data)),
        Algorithm::Sha384 => hex::encode(Sha384::digest(data)),
        Algorithm::Sha512 => hex::encode(Sha512::digest(data)),
    }
}

/// Derive the lookup key for a credential pair
#[must_use]
pub fn credential_key(algorithm: Algorithm, uname: &str, passwd: &str) -> String {
    let normalized = normalize_credentials(uname, passwd);
    digest_hex(algorithm, normalized.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256_vector() {
        // Re-verified against a reference SHA-256 implementation
        let key = credential_key(Algorithm::Sha256, "Normalisation@Test.NL", "ümláût");
        assert_eq!(
            key,
            "35383e4c63b157472d939ca98fac0da3fdc468c7641d7fc70411348b9b6e98a2"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = credential_key(Algorithm::Sha256, "alice", "P@ssw0rd");
        let b = credential_key(Algorithm::Sha256, "alice", "P@ssw0rd");
        assert_eq!(a, b);
        assert_eq!(
            a,
            "218d87c160e6cd29225f48d06435e3f7c49ad62002ab929990b403e3f9939644"
        );
    }

    #[test]
    fn test_username_case_is_folded() {
        let lower = credential_key(Algorithm::Sha256, "alice", "P@ssw0rd");
        let mixed = credential_key(Algorithm::Sha256, "ALiCe", "P@ssw0rd");
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_password_case_is_preserved() {
        let upper = credential_key(Algorithm::Sha256, "alice", "SECRET");
        let lower = credential_key(Algorithm::Sha256, "alice", "secret");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_decomposed_form_matches_precomposed() {
        // "ümláût" with combining marks instead of precomposed characters
        let decomposed = "u\u{0308}mla\u{0301}u\u{0302}t";
        let precomposed = "\u{fc}ml\u{e1}\u{fb}t";
        let a = credential_key(Algorithm::Sha256, "Normalisation@Test.NL", decomposed);
        let b = credential_key(Algorithm::Sha256, "normalisation@test.nl", precomposed);
        assert_eq!(a, b);
        assert_eq!(
            a,
            "35383e4c63b157472d939ca98fac0da3fdc468c7641d7fc70411348b9b6e98a2"
        );
    }

    #[test]
    fn test_hex_output_shape() {
        for algorithm in [
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha384,
            Algorithm::Sha512,
        ] {
            let key = credential_key(algorithm, "alice", "P@ssw0rd");
            assert_eq!(key.len(), algorithm.hex_len());
            assert!(key
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_algorithm_vectors() {
        assert_eq!(
            credential_key(Algorithm::Sha1, "alice", "P@ssw0rd"),
            "87285d72796cdf68b5b4c26c940e74a4bf8ca890"
        );
        assert_eq!(
            credential_key(Algorithm::Sha384, "alice", "P@ssw0rd"),
            "e569db1987db973ec6ce0a155cc112c290fcfaa0b8afa867c59c94731cb85eca\
             70872ebd53addd040681dc4648907794"
        );
        assert_eq!(
            credential_key(Algorithm::Sha512, "alice", "P@ssw0rd"),
            "dd51bee84844eeabf59603f4daa47bcc2cbb975a48e60f2cfa8a1360a13cf2b9\
             d7279fe61a5185daba460a3487885a5c9f17e148f7039526a9747a5d5b05c7f2"
        );
    }

    #[test]
    fn test_normalized_concatenation_has_no_separator() {
        assert_eq!(normalize_credentials("User", "Pass"), "userPass");
    }
}
