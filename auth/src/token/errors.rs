use chrono::Duration;
use thiserror::Error;

/// Error type for token issuance and validation.
///
/// Validation stops at the first failing stage, so each variant also tells
/// how far a rejected token got: structure, algorithm, signature, expiry,
/// issuer, subject.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token lifetime must be at least one second, got {0}")]
    InvalidLifetime(Duration),

    #[error("Malformed token: {0}")]
    MalformedCredential(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Unexpected token issuer: {0}")]
    WrongIssuer(String),

    #[error("Invalid token subject: {0}")]
    BadSubject(String),
}

impl TokenError {
    /// Short stable label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::SigningFailed(_) => "signing_failed",
            TokenError::InvalidLifetime(_) => "invalid_lifetime",
            TokenError::MalformedCredential(_) => "malformed_credential",
            TokenError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            TokenError::BadSignature => "bad_signature",
            TokenError::Expired => "expired",
            TokenError::WrongIssuer(_) => "wrong_issuer",
            TokenError::BadSubject(_) => "bad_subject",
        }
    }
}
