//! Authentication configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// OTP issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes until an issued code expires
    #[serde(default = "default_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Maximum issuances per phone per hour; `None` disables the limit
    #[serde(default)]
    pub max_issuances_per_hour: Option<u32>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_expiration_minutes(),
            max_issuances_per_hour: None,
        }
    }
}

impl OtpConfig {
    /// Build the configuration from `OTP_EXPIRATION_MINUTES` and
    /// `OTP_MAX_ISSUANCES_PER_HOUR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiration_minutes: env::var("OTP_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_expiration_minutes),
            max_issuances_per_hour: env::var("OTP_MAX_ISSUANCES_PER_HOUR")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,

    /// Minutes until a session token expires
    #[serde(default = "default_session_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl SessionConfig {
    /// Create a new session configuration with default lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes: default_session_ttl_minutes(),
            issuer: default_issuer(),
        }
    }

    /// Build the configuration from `SESSION_SECRET` plus optional
    /// `SESSION_TTL_MINUTES` / `SESSION_ISSUER` overrides.
    ///
    /// Returns `None` when `SESSION_SECRET` is unset; there is no safe
    /// default for a signing secret.
    pub fn from_env() -> Option<Self> {
        let secret = env::var("SESSION_SECRET").ok()?;
        let mut config = Self::new(secret);
        if let Some(ttl) = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.ttl_minutes = ttl;
        }
        if let Ok(issuer) = env::var("SESSION_ISSUER") {
            config.issuer = issuer;
        }
        Some(config)
    }
}

fn default_expiration_minutes() -> i64 {
    5
}

fn default_session_ttl_minutes() -> i64 {
    60
}

fn default_issuer() -> String {
    String::from("soulsignal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_expiration_minutes, 5);
        assert!(config.max_issuances_per_hour.is_none());
    }

    #[test]
    fn test_session_config_new() {
        let config = SessionConfig::new("top-secret");
        assert_eq!(config.secret, "top-secret");
        assert_eq!(config.ttl_minutes, 60);
        assert_eq!(config.issuer, "soulsignal");
    }
}
