//! Collaborator traits for the OTP services.

use async_trait::async_trait;

use crate::errors::DomainError;

/// External gateway that delivers a text message to a phone number.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` to `phone` (E.164 format), returning a provider message
    /// id on acceptance.
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, DomainError>;

    /// Human-readable provider name for logs.
    fn provider_name(&self) -> &str;
}
