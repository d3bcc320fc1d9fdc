//! OTP issuer service.

use std::sync::Arc;

use ss_shared::utils::phone::{is_valid_e164, mask_phone_number};

use crate::domain::entities::OtpCode;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::OtpStore;

use super::config::OtpServiceConfig;
use super::policy::IssuancePolicy;
use super::traits::SmsGateway;
use super::types::IssueResult;

/// Issues one-time codes: generate, persist, dispatch.
///
/// The store mutation always precedes the SMS send, so a delivery failure
/// leaves a valid code behind; the caller is told to request a fresh one
/// rather than being handed a retry signal.
///
/// The policy is a trait object so deployments can swap rate limiting
/// without changing the issuer's type.
pub struct OtpIssuer<O, S>
where
    O: OtpStore,
    S: SmsGateway,
{
    /// Durable code store
    store: Arc<O>,
    /// SMS gateway for dispatching codes
    sms_gateway: Arc<S>,
    /// Issuance policy hook
    policy: Arc<dyn IssuancePolicy>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O, S> OtpIssuer<O, S>
where
    O: OtpStore,
    S: SmsGateway,
{
    /// Create a new issuer with its collaborators and configuration.
    pub fn new(
        store: Arc<O>,
        sms_gateway: Arc<S>,
        policy: Arc<dyn IssuancePolicy>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            sms_gateway,
            policy,
            config,
        }
    }

    /// Issue a one-time code to a phone number.
    ///
    /// Steps:
    /// 1. Validate the phone number (present, E.164).
    /// 2. Consult the issuance policy.
    /// 3. Generate a 6-digit code and upsert it, overwriting any
    ///    outstanding code for the phone.
    /// 4. Dispatch the SMS.
    pub async fn issue(&self, phone: &str) -> DomainResult<IssueResult> {
        if phone.is_empty() {
            return Err(AuthError::MissingPhone.into());
        }
        if !is_valid_e164(phone) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(phone),
            }
            .into());
        }

        self.policy.check(phone).await?;

        let otp = OtpCode::new_with_expiration(
            phone.to_string(),
            self.config.code_expiration_minutes,
        );
        let expires_at = otp.expires_at;
        let body = otp.sms_body();

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_generated",
            expires_at = %expires_at,
            "Generated new verification code"
        );

        self.store.upsert(otp).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone_number(phone),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        let message_id = self
            .sms_gateway
            .send_sms(phone, &body)
            .await
            .map_err(|e| {
                // The stored code stays valid; the caller must ask for a new
                // one rather than retry delivery of this one.
                tracing::error!(
                    phone = %mask_phone_number(phone),
                    provider = self.sms_gateway.provider_name(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to dispatch verification SMS"
                );
                match e {
                    DomainError::Delivery { .. } => e,
                    other => DomainError::delivery(other),
                }
            })?;

        self.policy.record_issuance(phone).await?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            event = "otp_sent",
            "Verification code dispatched"
        );

        Ok(IssueResult {
            phone: phone.to_string(),
            expires_at,
            message_id,
        })
    }
}
