use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::TokenError;
use super::header::ensure_pinned_algorithm;
use super::header::SIGNING_ALGORITHM;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::identity::UserId;
use crate::secret::Secret;

/// Issues and validates signed tokens.
///
/// Stateless apart from the clock: the secret is handed in on every call so
/// that nothing here outlives a request or hides process-wide key state.
#[derive(Debug, Clone, Default)]
pub struct TokenCodec<C = SystemClock> {
    clock: C,
}

/// A freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Token string `header.claims.signature`
    pub token: String,

    /// Instant from which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl TokenCodec<SystemClock> {
    /// Create a codec reading the wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TokenCodec<C> {
    /// Create a codec reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issue a token for `user_id`, valid for `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Identifier to embed as the subject
    /// * `secret` - Signing key
    /// * `ttl` - Token lifetime, at least one second
    ///
    /// This is the only way to obtain a signed token: the issuer is always
    /// [`ISSUER`] and `exp` is always after `iat`.
    ///
    /// # Returns
    /// The token and its expiry instant
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` under one second, or an expiry outside the
    ///   representable range
    /// * `SigningFailed` - Encoding or signing failed
    pub fn issue(
        &self,
        user_id: UserId,
        secret: &Secret,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::for_user(user_id, self.clock.now(), ttl)?;
        let expires_at = claims
            .expires_at()
            .ok_or(TokenError::InvalidLifetime(ttl))?;
        let token = self.sign(&claims, secret)?;

        tracing::debug!(
            user_id = %user_id,
            expires_at = %expires_at,
            "Token issued"
        );

        Ok(IssuedToken { token, expires_at })
    }

    /// Sign a claim set with the pinned algorithm.
    ///
    /// # Errors
    /// * `SigningFailed` - Encoding or signing failed
    fn sign(&self, claims: &Claims, secret: &Secret) -> Result<String, TokenError> {
        let header = Header::new(SIGNING_ALGORITHM);

        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return the user it was issued for.
    ///
    /// Checks run in order and stop at the first failure: three non-empty
    /// segments, pinned algorithm, signature, expiry, issuer, subject.
    ///
    /// # Errors
    /// * `MalformedCredential` - Not three segments, undecodable header, or a
    ///   claim set that does not match the schema
    /// * `UnsupportedAlgorithm` - Header declares anything but HS256
    /// * `BadSignature` - Signature does not match under `secret`
    /// * `Expired` - Current instant is at or past `exp`
    /// * `WrongIssuer` - `iss` is not [`ISSUER`]
    /// * `BadSubject` - `sub` is not a canonical user identifier
    pub fn validate(&self, token: &str, secret: &Secret) -> Result<UserId, TokenError> {
        let header_segment = split_segments(token)?;
        ensure_pinned_algorithm(header_segment)?;

        let claims = verify_signature(token, secret)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        if claims.iss != ISSUER {
            return Err(TokenError::WrongIssuer(claims.iss));
        }

        UserId::from_string(&claims.sub).map_err(|e| TokenError::BadSubject(e.to_string()))
    }
}

/// Structural check, returning the header segment.
fn split_segments(token: &str) -> Result<&str, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();

    if segments.len() != 3 {
        return Err(TokenError::MalformedCredential(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }

    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(TokenError::MalformedCredential(
            "empty token segment".to_string(),
        ));
    }

    Ok(segments[0])
}

/// Verify the signature and decode the claim set.
///
/// Time-based checks are switched off here; expiry is judged against the
/// codec's clock afterwards.
fn verify_signature(token: &str, secret: &Secret) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::InvalidAlgorithm => {
                TokenError::UnsupportedAlgorithm("algorithm mismatch".to_string())
            }
            _ => TokenError::MalformedCredential(e.to_string()),
        })
}
