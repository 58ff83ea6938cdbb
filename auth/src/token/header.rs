use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

use super::errors::TokenError;

/// The one signing algorithm tokens are issued with and accepted under.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Wire name of [`SIGNING_ALGORITHM`] as it appears in the `alg` header field.
const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// Only the field the allow-list needs. Decoded independently of
/// `jsonwebtoken::Header`, whose enum rejects identifiers such as `none`
/// as a parse error rather than reporting them.
#[derive(Debug, Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Check the `alg` declared in an encoded header segment against the allow-list.
///
/// Runs before any key material is touched.
pub(super) fn ensure_pinned_algorithm(segment: &str) -> Result<(), TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedCredential(format!("header is not base64url: {}", e)))?;

    let header: DeclaredHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedCredential(format!("header is not valid JSON: {}", e)))?;

    if header.alg != SIGNING_ALGORITHM_NAME {
        return Err(TokenError::UnsupportedAlgorithm(header.alg));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_accept_hs256() {
        let segment = encode(r#"{"typ":"JWT","alg":"HS256"}"#);
        assert_eq!(ensure_pinned_algorithm(&segment), Ok(()));
    }

    #[test]
    fn test_reject_other_algorithms() {
        for alg in ["none", "None", "HS384", "HS512", "RS256", "ES256", "EdDSA", "hs256"] {
            let segment = encode(&format!(r#"{{"typ":"JWT","alg":"{}"}}"#, alg));
            assert_eq!(
                ensure_pinned_algorithm(&segment),
                Err(TokenError::UnsupportedAlgorithm(alg.to_string())),
                "alg {} should be rejected",
                alg
            );
        }
    }

    #[test]
    fn test_reject_garbage_header() {
        assert!(matches!(
            ensure_pinned_algorithm("!!!"),
            Err(TokenError::MalformedCredential(_))
        ));
        assert!(matches!(
            ensure_pinned_algorithm(&encode("not json")),
            Err(TokenError::MalformedCredential(_))
        ));
        assert!(matches!(
            ensure_pinned_algorithm(&encode(r#"{"typ":"JWT"}"#)),
            Err(TokenError::MalformedCredential(_))
        ));
    }
}
