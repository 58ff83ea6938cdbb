use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;
use crate::identity::UserId;

/// Issuer stamped into every token and required on validation.
pub const ISSUER: &str = "chirpy";

/// Claim set carried by every token.
///
/// Fixed schema: all four registered claims are required, instants are
/// seconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Subject (canonical user identifier)
    pub sub: String,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Identifier placed in `sub`
    /// * `issued_at` - Current instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is under one second
    pub fn for_user(
        user_id: UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let lifetime = ttl.num_seconds();
        if lifetime < 1 {
            return Err(TokenError::InvalidLifetime(ttl));
        }

        let iat = issued_at.timestamp();
        let exp = iat
            .checked_add(lifetime)
            .ok_or(TokenError::InvalidLifetime(ttl))?;

        Ok(Self {
            iss: ISSUER.to_string(),
            iat,
            exp,
            sub: user_id.to_string(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is no longer acceptable from the `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
