//! Authentication core for the chirpy service
//!
//! Establishes a user's identity at login and re-derives it from a signed
//! token on every later request, without a session store:
//! - Password hashing and verification (Argon2id)
//! - Token issuance and validation (HS256, fixed claim set, pinned algorithm)
//! - Bearer credential extraction from `Authorization` headers
//!
//! Every rejection carries a precise internal reason for logs, and collapses
//! to a single user-facing signal through [`AuthenticationError::classify`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Tokens
//! ```
//! use chirpy_auth::{Secret, TokenCodec, UserId};
//! use chrono::Duration;
//!
//! let secret = Secret::try_from("s3cr3t").unwrap();
//! let codec = TokenCodec::new();
//!
//! let user_id = UserId::new();
//! let issued = codec.issue(user_id, &secret, Duration::seconds(3600)).unwrap();
//! assert_eq!(codec.validate(&issued.token, &secret).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::{Authenticator, PublicFailure, Secret, UserId};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(Secret::try_from("s3cr3t").unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let user_id = UserId::new();
//! let result = auth
//!     .authenticate("password123", &hash, user_id, Duration::hours(1))
//!     .unwrap();
//!
//! // Later request: resolve the user from the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authenticate_request(&header).unwrap(), user_id);
//!
//! // Every request-path failure looks the same from outside
//! let failure = auth.authenticate_request("Bearer nope").unwrap_err();
//! assert_eq!(failure.classify(), PublicFailure::Unauthorized);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod clock;
pub mod config;
pub mod identity;
pub mod password;
pub mod secret;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::PublicFailure;
pub use bearer::extract_bearer;
pub use bearer::extract_bearer_from_headers;
pub use bearer::BearerError;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::Config;
pub use config::JwtConfig;
pub use config::TokenLifetimePolicy;
pub use identity::UserId;
pub use identity::UserIdError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::Secret;
pub use secret::SecretError;
pub use token::Claims;
pub use token::IssuedToken;
pub use token::TokenCodec;
pub use token::TokenError;
