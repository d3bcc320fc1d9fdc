//! Twilio SMS gateway.
//!
//! Sends messages through the Twilio REST API: a form-encoded POST to the
//! account's Messages endpoint, authenticated with basic auth over the
//! account SID and auth token.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, error, info, warn};

use ss_core::errors::DomainError;
use ss_core::services::otp::SmsGateway;
use ss_shared::utils::phone::mask_phone_number;

/// Twilio gateway configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number, E.164)
    pub from_number: String,
    /// Maximum attempts for a single message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").map_err(|_| {
            DomainError::Internal {
                message: "TWILIO_ACCOUNT_SID not set".to_string(),
            }
        })?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").map_err(|_| {
            DomainError::Internal {
                message: "TWILIO_AUTH_TOKEN not set".to_string(),
            }
        })?;
        let from_number = std::env::var("TWILIO_PHONE_NUMBER").map_err(|_| {
            DomainError::Internal {
                message: "TWILIO_PHONE_NUMBER not set".to_string(),
            }
        })?;

        if !from_number.starts_with('+') {
            return Err(DomainError::Internal {
                message: "TWILIO_PHONE_NUMBER must be in E.164 format (starting with '+')"
                    .to_string(),
            });
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: std::env::var("TWILIO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("TWILIO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// SMS gateway backed by the Twilio REST API
pub struct TwilioSmsGateway {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsGateway {
    /// Create a new gateway from its configuration.
    pub fn new(config: TwilioConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::Internal {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS gateway initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::new(TwilioConfig::from_env()?)
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }

    fn basic_auth_header(&self) -> String {
        let credentials = BASE64.encode(format!(
            "{}:{}",
            self.config.account_sid, self.config.auth_token
        ));
        format!("Basic {}", credentials)
    }

    async fn post_message(&self, to: &str, body: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(self.messages_url())
            .header(AUTHORIZATION, self.basic_auth_header())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&[
                ("From", self.config.from_number.as_str()),
                ("To", to),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| DomainError::delivery(format!("twilio request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, detail = %detail, "Twilio rejected message");
            return Err(DomainError::delivery(format!(
                "twilio returned {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::delivery(format!("invalid twilio response: {}", e)))?;

        Ok(payload
            .get("sid")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl SmsGateway for TwilioSmsGateway {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, DomainError> {
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                to = %mask_phone_number(phone),
                attempt = attempts,
                max = self.config.max_retries,
                "Sending SMS via Twilio"
            );

            match self.post_message(phone, body).await {
                Ok(sid) => {
                    info!(
                        to = %mask_phone_number(phone),
                        sid = %sid,
                        "SMS accepted by Twilio"
                    );
                    return Ok(sid);
                }
                Err(e) if attempts < self.config.max_retries => {
                    warn!(
                        to = %mask_phone_number(phone),
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "Twilio send failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    error!(
                        to = %mask_phone_number(phone),
                        attempts,
                        error = %e,
                        "Twilio send failed, giving up"
                    );
                    return Err(e);
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TwilioConfig {
        TwilioConfig {
            account_sid: "ACtest".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550001111".to_string(),
            max_retries: 3,
            retry_delay_ms: 1,
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_messages_url_embeds_account_sid() {
        let gateway = TwilioSmsGateway::new(test_config()).unwrap();
        assert_eq!(
            gateway.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACtest/Messages.json"
        );
    }

    #[test]
    fn test_basic_auth_header_encodes_credentials() {
        let gateway = TwilioSmsGateway::new(test_config()).unwrap();
        let header = gateway.basic_auth_header();
        assert!(header.starts_with("Basic "));

        let decoded = BASE64.decode(header.trim_start_matches("Basic ")).unwrap();
        assert_eq!(decoded, b"ACtest:token");
    }

    #[test]
    fn test_config_rejects_from_number_without_plus() {
        std::env::set_var("TWILIO_ACCOUNT_SID", "ACtest");
        std::env::set_var("TWILIO_AUTH_TOKEN", "token");
        std::env::set_var("TWILIO_PHONE_NUMBER", "15550001111");

        let config = TwilioConfig::from_env();
        assert!(config.is_err());

        std::env::remove_var("TWILIO_ACCOUNT_SID");
        std::env::remove_var("TWILIO_AUTH_TOKEN");
        std::env::remove_var("TWILIO_PHONE_NUMBER");
    }
}
