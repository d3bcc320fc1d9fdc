//! OTP service configuration.

use ss_shared::config::OtpConfig;

use crate::domain::entities::otp_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration injected into the issuer at construction.
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes until an issued code expires
    pub code_expiration_minutes: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
        }
    }
}
