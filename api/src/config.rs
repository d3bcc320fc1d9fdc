//! API server configuration.
//!
//! Everything the binary needs is gathered here once at startup and handed
//! to the services; handlers never touch the environment.

use anyhow::Context;

use ss_infra::sms::TwilioConfig;
use ss_shared::config::{CorsConfig, DatabaseConfig, OtpConfig, ServerConfig, SessionConfig};

/// Complete configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub otp: OtpConfig,
    pub session: SessionConfig,
    pub twilio: TwilioConfig,
}

impl ApiConfig {
    /// Load the full configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env().context("DATABASE_URL must be set")?,
            otp: OtpConfig::from_env(),
            session: SessionConfig::from_env().context("SESSION_SECRET must be set")?,
            twilio: TwilioConfig::from_env()
                .map_err(|e| anyhow::anyhow!("Twilio configuration: {}", e))?,
        })
    }
}
