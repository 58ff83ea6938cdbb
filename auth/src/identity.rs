use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// User unique identifier type.
///
/// Carried through a token's `sub` claim in canonical hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Length of the canonical hyphenated form (8-4-4-4-12).
    const CANONICAL_LENGTH: usize = 36;

    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero identifier.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Parse a user ID from its canonical string form.
    ///
    /// Only the hyphenated 36-character form is accepted; braced, URN and
    /// simple (no hyphens) encodings are rejected.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a canonical UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        if s.len() != Self::CANONICAL_LENGTH {
            return Err(UserIdError::InvalidFormat(format!(
                "expected {} characters, got {}",
                Self::CANONICAL_LENGTH,
                s.len()
            )));
        }

        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
