//! Bearer credential extraction from `Authorization` headers.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

/// Authentication scheme accepted in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// Error type for bearer extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format, expected `Bearer <token>`: {0}")]
    MalformedHeader(String),
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly `Bearer`, one space, and a token containing no
/// whitespace. The scheme is matched case-sensitively and nothing is trimmed.
///
/// # Errors
/// * `MissingHeader` - Value is empty
/// * `MalformedHeader` - Wrong or missing scheme, or no token after it
pub fn extract_bearer(header_value: &str) -> Result<&str, BearerError> {
    if header_value.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or_else(|| BearerError::MalformedHeader("no scheme separator".to_string()))?;

    if scheme != BEARER_SCHEME {
        return Err(BearerError::MalformedHeader(format!(
            "unsupported scheme `{}`",
            scheme
        )));
    }

    if token.is_empty() {
        return Err(BearerError::MalformedHeader("empty token".to_string()));
    }

    if token.chars().any(char::is_whitespace) {
        return Err(BearerError::MalformedHeader(
            "token contains whitespace".to_string(),
        ));
    }

    Ok(token)
}

/// Extract the bearer token from request headers.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header, or an empty one
/// * `MalformedHeader` - Header is not visible ASCII or not `Bearer <token>`
pub fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?;

    let value = value
        .to_str()
        .map_err(|_| BearerError::MalformedHeader("header is not visible ASCII".to_string()))?;

    extract_bearer(value)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_empty_header_is_missing() {
        assert_eq!(extract_bearer(""), Err(BearerError::MissingHeader));
    }

    #[test]
    fn test_no_scheme() {
        assert!(matches!(
            extract_bearer("abc.def.ghi"),
            Err(BearerError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_malformed_values() {
        for value in [
            "Bearer",
            "Bearer ",
            "Bearer  abc.def.ghi",
            "Bearer abc def",
            "Bearer abc.def.ghi ",
            "bearer abc.def.ghi",
            "BEARER abc.def.ghi",
            "Basic dXNlcjpwYXNz",
            "Bearer\tabc.def.ghi",
            " Bearer abc.def.ghi",
            "Token abc.def.ghi",
        ] {
            assert!(
                matches!(extract_bearer(value), Err(BearerError::MalformedHeader(_))),
                "{:?} should be malformed",
                value
            );
        }
    }

    #[test]
    fn test_extract_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(extract_bearer_from_headers(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_headers_without_authorization() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer_from_headers(&headers),
            Err(BearerError::MissingHeader)
        );
    }

    #[test]
    fn test_headers_with_opaque_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );

        assert!(matches!(
            extract_bearer_from_headers(&headers),
            Err(BearerError::MalformedHeader(_))
        ));
    }
}
