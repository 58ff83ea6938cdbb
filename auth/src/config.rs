use std::env;

use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as RawConfig;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::secret::Secret;

/// Default token lifetime when the caller does not ask for one.
pub const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Longest token lifetime a caller may ask for.
pub const MAX_TTL_SECONDS: i64 = 3600;

/// Authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: Secret,
    pub default_ttl_seconds: i64,
    pub max_ttl_seconds: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, JWT__MAX_TTL_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = RawConfig::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Load configuration from an in-memory TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::from_builder(
            RawConfig::builder().add_source(File::from_str(contents, FileFormat::Toml)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder
            .set_default("jwt.default_ttl_seconds", DEFAULT_TTL_SECONDS)?
            .set_default("jwt.max_ttl_seconds", MAX_TTL_SECONDS)?
            .build()?
            .try_deserialize()?;

        for (key, seconds) in [
            ("jwt.default_ttl_seconds", config.jwt.default_ttl_seconds),
            ("jwt.max_ttl_seconds", config.jwt.max_ttl_seconds),
        ] {
            if seconds < 1 || Duration::try_seconds(seconds).is_none() {
                return Err(ConfigError::Message(format!(
                    "{} must be a positive number of seconds within range, got {}",
                    key, seconds
                )));
            }
        }

        Ok(config)
    }
}

/// Resolves the lifetime of a token from what a client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimePolicy {
    default: Duration,
    max: Duration,
}

impl TokenLifetimePolicy {
    /// Create a policy; `default` is capped at `max`.
    pub fn new(default: Duration, max: Duration) -> Self {
        Self {
            default: default.min(max),
            max,
        }
    }

    /// Lifetime for a request asking for `requested_seconds`.
    ///
    /// Absent or non-positive requests get the default; anything above the
    /// maximum is clamped to it.
    pub fn resolve(&self, requested_seconds: Option<i64>) -> Duration {
        match requested_seconds {
            Some(seconds) if seconds > 0 => {
                if seconds >= self.max.num_seconds() {
                    self.max
                } else {
                    Duration::seconds(seconds)
                }
            }
            _ => self.default,
        }
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Default for TokenLifetimePolicy {
    fn default() -> Self {
        Self::new(
            Duration::seconds(DEFAULT_TTL_SECONDS),
            Duration::seconds(MAX_TTL_SECONDS),
        )
    }
}

impl From<&JwtConfig> for TokenLifetimePolicy {
    fn from(config: &JwtConfig) -> Self {
        Self::new(
            lifetime_from_seconds(config.default_ttl_seconds),
            lifetime_from_seconds(config.max_ttl_seconds),
        )
    }
}

/// Lifetime of at least one second, saturating at the largest representable one.
fn lifetime_from_seconds(seconds: i64) -> Duration {
    Duration::try_seconds(seconds.max(1)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_with_defaults() {
        let config = Config::from_toml(
            r#"
            [jwt]
            secret = "s3cr3t"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.jwt.secret.as_bytes(), b"s3cr3t");
        assert_eq!(config.jwt.default_ttl_seconds, DEFAULT_TTL_SECONDS);
        assert_eq!(config.jwt.max_ttl_seconds, MAX_TTL_SECONDS);
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = Config::from_toml(
            r#"
            [jwt]
            secret = "s3cr3t"
            default_ttl_seconds = 600
            max_ttl_seconds = 7200
            "#,
        )
        .unwrap();

        let policy = TokenLifetimePolicy::from(&config.jwt);
        assert_eq!(policy.resolve(None), Duration::seconds(600));
        assert_eq!(policy.max(), Duration::seconds(7200));
    }

    #[test]
    fn test_missing_secret() {
        assert!(Config::from_toml("[jwt]\ndefault_ttl_seconds = 60\n").is_err());
    }

    #[test]
    fn test_empty_secret() {
        assert!(Config::from_toml("[jwt]\nsecret = \"\"\n").is_err());
    }

    #[test]
    fn test_non_positive_lifetime() {
        let result = Config::from_toml("[jwt]\nsecret = \"s3cr3t\"\nmax_ttl_seconds = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_lifetime() {
        let result = Config::from_toml(&format!(
            "[jwt]\nsecret = \"s3cr3t\"\nmax_ttl_seconds = {}\n",
            i64::MAX
        ));
        assert!(result.is_err());

        let result = Config::from_toml(&format!(
            "[jwt]\nsecret = \"s3cr3t\"\ndefault_ttl_seconds = {}\n",
            i64::MAX / 1000 + 1
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_from_unchecked_config() {
        let config = JwtConfig {
            secret: Secret::try_from("s3cr3t").unwrap(),
            default_ttl_seconds: -30,
            max_ttl_seconds: i64::MAX,
        };

        let policy = TokenLifetimePolicy::from(&config);
        assert_eq!(policy.max(), Duration::MAX);
        assert_eq!(policy.resolve(None), Duration::seconds(1));
        assert_eq!(policy.resolve(Some(i64::MAX)), Duration::MAX);
        assert_eq!(policy.resolve(Some(120)), Duration::seconds(120));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = Config::from_toml("[jwt]\nsecret = \"s3cr3t\"\n").unwrap();
        assert!(!format!("{:?}", config).contains("s3cr3t"));
    }

    #[test]
    fn test_policy_resolve() {
        let policy = TokenLifetimePolicy::default();

        assert_eq!(policy.resolve(None), Duration::seconds(3600));
        assert_eq!(policy.resolve(Some(60)), Duration::seconds(60));
        assert_eq!(policy.resolve(Some(3600)), Duration::seconds(3600));
        assert_eq!(policy.resolve(Some(86_400)), Duration::seconds(3600));
        assert_eq!(policy.resolve(Some(0)), Duration::seconds(3600));
        assert_eq!(policy.resolve(Some(-10)), Duration::seconds(3600));
    }

    #[test]
    fn test_policy_default_capped_at_max() {
        let policy = TokenLifetimePolicy::new(Duration::hours(2), Duration::hours(1));
        assert_eq!(policy.resolve(None), Duration::hours(1));
    }
}
