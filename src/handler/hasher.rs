//! Credential hashing endpoint
//!
//! Implements the one request/response transformation this service exists
//! for: gate on size, read the JSON body, validate the credential fields,
//! derive the digest key, and answer with one of three fixed shapes.

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::Request;
use serde::Deserialize;

use crate::config::{HashConfig, HttpConfig};
use crate::hash;
use crate::http::response;
use crate::logger;

/// Why a request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// Declared or observed body size at or above the configured limit
    OversizedBody,
    /// Body could not be read or parsed into the expected JSON shape
    MalformedBody,
    /// JSON was valid but the credential fields fail validation
    InvalidCredentialFields,
}

impl CredentialError {
    /// Fixed response body for this rejection
    ///
    /// Malformed bodies and invalid fields are indistinguishable to the
    /// caller by contract.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OversizedBody => response::BODY_TOO_LARGE,
            Self::MalformedBody | Self::InvalidCredentialFields => response::BODY_INVALID,
        }
    }
}

/// Expected request body shape
#[derive(Deserialize)]
struct CredentialBody {
    uname: String,
    passwd: String,
}

/// Gate a request on its declared Content-Length before touching the body
///
/// `header` is the Content-Length value if it was present and ASCII. A
/// missing or unparseable value is resolved by the configured policy rather
/// than silently ignored.
pub fn check_declared_length(
    header: Option<&str>,
    max_body_size: u64,
    reject_missing: bool,
) -> Result<(), CredentialError> {
    match header.map(str::parse::<u64>) {
        Some(Ok(size)) if size >= max_body_size => Err(CredentialError::OversizedBody),
        Some(Ok(_)) => Ok(()),
        Some(Err(_)) | None => {
            if reject_missing {
                Err(CredentialError::OversizedBody)
            } else {
                Ok(())
            }
        }
    }
}

/// Validate a credential body and derive its digest key
///
/// Rules: `uname` must be non-empty and `passwd` strictly longer than one
/// character (characters, not bytes).
pub fn process_body(body: &[u8], hash_config: &HashConfig) -> Result<String, CredentialError> {
    let credentials: CredentialBody =
        serde_json::from_slice(body).map_err(|_| CredentialError::MalformedBody)?;

    if credentials.uname.is_empty() || credentials.passwd.chars().count() <= 1 {
        return Err(CredentialError::InvalidCredentialFields);
    }

    Ok(hash::credential_key(
        hash_config.algorithm,
        &credentials.uname,
        &credentials.passwd,
    ))
}

/// Handle a request to the hash endpoint
pub async fn handle_hash(
    req: Request<Incoming>,
    http_config: &HttpConfig,
    hash_config: &HashConfig,
) -> hyper::Response<Full<Bytes>> {
    let declared = req
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    if let Err(e) = check_declared_length(
        declared.as_deref(),
        http_config.max_body_size,
        http_config.reject_missing_content_length,
    ) {
        logger::log_error(&format!(
            "Request rejected by size gate (Content-Length: {})",
            declared.as_deref().unwrap_or("<missing>")
        ));
        return build_rejection(e);
    }

    // Hard read limit independent of the declared header; the limit is one
    // below max_body_size because sizes at the maximum are already rejected
    let limit = usize::try_from(http_config.max_body_size)
        .unwrap_or(usize::MAX)
        .saturating_sub(1);

    let body = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            let reason = if e.downcast_ref::<http_body_util::LengthLimitError>().is_some() {
                CredentialError::OversizedBody
            } else {
                CredentialError::MalformedBody
            };
            logger::log_error(&format!("Failed to read request body: {e}"));
            return build_rejection(reason);
        }
    };

    match process_body(&body, hash_config) {
        Ok(key) => {
            logger::log_digest_created();
            response::build_key_response(&key)
        }
        Err(e) => {
            logger::log_error(&format!("Credential body rejected: {e:?}"));
            build_rejection(e)
        }
    }
}

/// Map a rejection to its fixed response shape
fn build_rejection(error: CredentialError) -> hyper::Response<Full<Bytes>> {
    response::build_rejection_response(error.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Algorithm;

    fn sha256_config() -> HashConfig {
        HashConfig {
            algorithm: Algorithm::Sha256,
        }
    }

    #[test]
    fn test_valid_body_produces_hex_key() {
        let body = br#"{"uname": "alice", "passwd": "P@ssw0rd"}"#;
        let key = process_body(body, &sha256_config()).expect("valid body");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_worked_example() {
        let body = r#"{"uname": "Normalisation@Test.NL", "passwd": "ümláût"}"#;
        let key = process_body(body.as_bytes(), &sha256_config()).expect("valid body");
        assert_eq!(
            key,
            "35383e4c63b157472d939ca98fac0da3fdc468c7641d7fc70411348b9b6e98a2"
        );
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = process_body(b"not json at all", &sha256_config()).unwrap_err();
        assert_eq!(err, CredentialError::MalformedBody);
        assert_eq!(err.message(), "Something wrong with the provided body");
    }

    #[test]
    fn test_missing_passwd_is_rejected() {
        let err = process_body(br#"{"uname": "alice"}"#, &sha256_config()).unwrap_err();
        assert_eq!(err, CredentialError::MalformedBody);
        assert_eq!(err.message(), "Something wrong with the provided body");
    }

    #[test]
    fn test_empty_uname_is_rejected() {
        let err = process_body(br#"{"uname": "", "passwd": "P@ssw0rd"}"#, &sha256_config())
            .unwrap_err();
        assert_eq!(err, CredentialError::InvalidCredentialFields);
    }

    #[test]
    fn test_password_length_boundary() {
        // One character: rejected
        let err = process_body(br#"{"uname": "alice", "passwd": "x"}"#, &sha256_config())
            .unwrap_err();
        assert_eq!(err, CredentialError::InvalidCredentialFields);

        // Two characters: accepted
        let key = process_body(br#"{"uname": "alice", "passwd": "xy"}"#, &sha256_config());
        assert!(key.is_ok());
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // Two characters, four UTF-8 bytes
        let body = r#"{"uname": "alice", "passwd": "áé"}"#;
        assert!(process_body(body.as_bytes(), &sha256_config()).is_ok());
    }

    #[test]
    fn test_non_string_fields_are_rejected() {
        let err = process_body(br#"{"uname": 42, "passwd": "P@ssw0rd"}"#, &sha256_config())
            .unwrap_err();
        assert_eq!(err, CredentialError::MalformedBody);
    }

    #[test]
    fn test_declared_length_boundary() {
        // One below the limit passes, the limit itself is rejected
        assert!(check_declared_length(Some("16383"), 16_384, false).is_ok());
        assert_eq!(
            check_declared_length(Some("16384"), 16_384, false),
            Err(CredentialError::OversizedBody)
        );
    }

    #[test]
    fn test_declared_length_missing_fails_open_by_default() {
        assert!(check_declared_length(None, 16_384, false).is_ok());
        assert!(check_declared_length(Some("garbage"), 16_384, false).is_ok());
    }

    #[test]
    fn test_declared_length_missing_fails_closed_when_configured() {
        assert_eq!(
            check_declared_length(None, 16_384, true),
            Err(CredentialError::OversizedBody)
        );
        assert_eq!(
            check_declared_length(Some("garbage"), 16_384, true),
            Err(CredentialError::OversizedBody)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CredentialError::OversizedBody.message(), "Body too large");
        assert_eq!(
            CredentialError::InvalidCredentialFields.message(),
            CredentialError::MalformedBody.message()
        );
    }
}
