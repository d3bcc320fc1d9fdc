//! OTP verifier service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use ss_shared::utils::phone::mask_phone_number;

use crate::domain::entities::otp_code::CODE_LENGTH;
use crate::domain::value_objects::VerificationOutcome;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{OtpStore, ProfileRepository};
use crate::services::session::SessionTokenService;

/// Verifies submitted codes and resolves the caller's identity.
pub struct OtpVerifier<O, R>
where
    O: OtpStore,
    R: ProfileRepository,
{
    /// Durable code store
    store: Arc<O>,
    /// Profile repository for identity resolution
    profiles: Arc<R>,
    /// Session token service for the post-verification credential
    sessions: Arc<SessionTokenService>,
}

impl<O, R> OtpVerifier<O, R>
where
    O: OtpStore,
    R: ProfileRepository,
{
    /// Create a new verifier with its collaborators.
    pub fn new(store: Arc<O>, profiles: Arc<R>, sessions: Arc<SessionTokenService>) -> Self {
        Self {
            store,
            profiles,
            sessions,
        }
    }

    /// Verify a submitted code and resolve the phone's identity.
    ///
    /// Steps:
    /// 1. Validate that both fields are present.
    /// 2. Atomically consume the stored code (single conditional write, so
    ///    concurrent submissions of the same code succeed at most once).
    /// 3. Look up an existing profile by phone; mint a fresh identifier
    ///    when none exists.
    /// 4. Sign a session token for the resolved identity.
    ///
    /// Wrong, expired, reused, and never-issued codes all fail with the
    /// same `InvalidOrExpiredCode` so the response does not reveal which
    /// check failed.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerificationOutcome> {
        if phone.is_empty() || code.is_empty() {
            return Err(AuthError::MissingFields.into());
        }

        // A malformed code can never match a stored one; short-circuit
        // without touching the store but keep the undifferentiated error.
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "otp_invalid_format",
                "Rejected malformed verification code"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let consumed = self.store.consume(phone, code, Utc::now()).await?;
        if !consumed {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "otp_verification_failed",
                "Verification code rejected"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_verified",
            "Verification code consumed"
        );

        // A lookup failure here must surface as a storage error: treating
        // it as "no profile" would mint a duplicate identity for an
        // existing user.
        let existing = self.profiles.find_by_phone(phone).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone_number(phone),
                error = %e,
                event = "profile_lookup_failed",
                "Identity resolution failed after successful verification"
            );
            e
        })?;

        match existing {
            Some(profile) => {
                let token = self.sessions.issue_token(profile.id, phone)?;
                Ok(VerificationOutcome::existing(profile, token))
            }
            None => {
                let user_id = Uuid::new_v4();
                let token = self.sessions.issue_token(user_id, phone)?;
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    user_id = %user_id,
                    event = "identity_minted",
                    "No profile for phone; minted new identifier"
                );
                Ok(VerificationOutcome::new_user(
                    user_id,
                    phone.to_string(),
                    token,
                ))
            }
        }
    }
}
