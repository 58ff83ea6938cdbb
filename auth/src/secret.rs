use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Error for signing secret construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret must not be empty")]
    Empty,
}

/// Symmetric key used both to sign and to verify tokens.
///
/// Never embedded in a token. `Debug` is redacted and there is no `Display`
/// or `Serialize`, so a secret cannot end up in logs or payloads by accident.
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Create a secret from raw key bytes.
    ///
    /// # Errors
    /// * `Empty` - No key material supplied
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for Secret {
    type Error = SecretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value.into_bytes())
    }
}

impl TryFrom<&str> for Secret {
    type Error = SecretError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.as_bytes())
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = SecretError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_empty() {
        assert!(matches!(Secret::new(Vec::new()), Err(SecretError::Empty)));
        assert!(matches!(Secret::try_from(""), Err(SecretError::Empty)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::try_from("s3cr3t").unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("s3cr3t"));
        assert_eq!(debug, "Secret(<redacted>)");
    }

    #[test]
    fn test_deserialize_from_string() {
        let secret: Secret = serde_json::from_str("\"s3cr3t\"").unwrap();
        assert_eq!(secret.as_bytes(), b"s3cr3t");

        let empty = serde_json::from_str::<Secret>("\"\"");
        assert!(empty.is_err());
    }
}
