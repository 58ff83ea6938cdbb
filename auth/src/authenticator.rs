use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use http::HeaderMap;
use http::StatusCode;

use crate::bearer::extract_bearer;
use crate::bearer::extract_bearer_from_headers;
use crate::bearer::BearerError;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::JwtConfig;
use crate::identity::UserId;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::Secret;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token handling.
///
/// Owns the process-wide signing secret, handed in by the caller, and passes
/// it explicitly to the token codec on every call.
pub struct Authenticator<C = SystemClock> {
    secret: Secret,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec<C>,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// User the token was issued for
    pub user_id: UserId,

    /// Instant from which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
///
/// Carries full detail for logs. Anything leaving the service must go
/// through [`AuthenticationError::classify`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),
}

/// The only failure signals callers may expose to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PublicFailure {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal,
}

impl PublicFailure {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PublicFailure::InvalidCredentials | PublicFailure::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            PublicFailure::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AuthenticationError {
    /// Collapse the internal error into its user-facing signal.
    pub fn classify(&self) -> PublicFailure {
        match self {
            AuthenticationError::Password(PasswordError::HashingFailed(_)) => {
                PublicFailure::Internal
            }
            AuthenticationError::Password(PasswordError::Mismatch)
            | AuthenticationError::Password(PasswordError::MalformedHash(_)) => {
                PublicFailure::InvalidCredentials
            }
            AuthenticationError::Token(TokenError::SigningFailed(_))
            | AuthenticationError::Token(TokenError::InvalidLifetime(_)) => {
                PublicFailure::Internal
            }
            AuthenticationError::Token(_) | AuthenticationError::Bearer(_) => {
                PublicFailure::Unauthorized
            }
        }
    }

    /// Short stable label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthenticationError::Password(PasswordError::HashingFailed(_)) => "hashing_failed",
            AuthenticationError::Password(PasswordError::Mismatch) => "password_mismatch",
            AuthenticationError::Password(PasswordError::MalformedHash(_)) => "malformed_hash",
            AuthenticationError::Token(e) => e.kind(),
            AuthenticationError::Bearer(BearerError::MissingHeader) => "missing_header",
            AuthenticationError::Bearer(BearerError::MalformedHeader(_)) => "malformed_header",
        }
    }
}

impl Authenticator<SystemClock> {
    /// Create a new authenticator reading the wall clock.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    pub fn new(secret: Secret) -> Self {
        Self::with_clock(secret, SystemClock)
    }

    /// Create an authenticator from loaded configuration.
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone())
    }
}

impl<C: Clock> Authenticator<C> {
    /// Create a new authenticator reading time from `clock`.
    pub fn with_clock(secret: Secret, clock: C) -> Self {
        Self {
            secret,
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::with_clock(clock),
        }
    }

    pub fn clock(&self) -> &C {
        self.token_codec.clock()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Owner of `stored_hash`
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `Password` - Password mismatch or unusable stored hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| self.reject(AuthenticationError::from(e)))?;

        self.issue_token(user_id, ttl)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `Token` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let issued = self
            .token_codec
            .issue(user_id, &self.secret, ttl)
            .map_err(|e| self.reject(AuthenticationError::from(e)))?;

        Ok(AuthenticationResult {
            access_token: issued.token,
            user_id,
            expires_at: issued.expires_at,
        })
    }

    /// Validate a token and return its user.
    ///
    /// # Errors
    /// * `Token` - Token rejected at any stage
    pub fn validate_token(&self, token: &str) -> Result<UserId, AuthenticationError> {
        self.token_codec
            .validate(token, &self.secret)
            .map_err(|e| self.reject(AuthenticationError::from(e)))
    }

    /// Resolve the user behind an `Authorization` header value.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not `Bearer <token>`
    /// * `Token` - Token rejected at any stage
    pub fn authenticate_request(&self, header_value: &str) -> Result<UserId, AuthenticationError> {
        let token =
            extract_bearer(header_value).map_err(|e| self.reject(AuthenticationError::from(e)))?;
        self.validate_token(token)
    }

    /// Resolve the user behind a request's headers.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not `Bearer <token>`
    /// * `Token` - Token rejected at any stage
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> Result<UserId, AuthenticationError> {
        let token = extract_bearer_from_headers(headers)
            .map_err(|e| self.reject(AuthenticationError::from(e)))?;
        self.validate_token(token)
    }

    fn reject(&self, error: AuthenticationError) -> AuthenticationError {
        match error.classify() {
            PublicFailure::Internal => {
                tracing::error!(kind = error.kind(), error = %error, "Authentication failed")
            }
            _ => tracing::warn!(kind = error.kind(), error = %error, "Authentication rejected"),
        }
        error
    }
}
