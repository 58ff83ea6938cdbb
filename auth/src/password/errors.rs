use thiserror::Error;

/// Error type for password operations.
///
/// `Mismatch` and `MalformedHash` must reach the outside world as the same
/// "invalid credentials" outcome; see `AuthenticationError::classify`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
