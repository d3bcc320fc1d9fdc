//! Client authentication flow state machine.
//!
//! A pure, IO-free model of the mobile sign-in screens: enter phone, wait
//! for the code, verify, then branch to the existing-user session or
//! first-time onboarding. Clients drive it with events and render whatever
//! state comes back; all service calls happen outside.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ss_shared::utils::phone::{is_valid_local_mobile, to_e164};

use crate::errors::AuthError;

/// Country code prefixed to the 10-digit number entered on the phone screen.
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// States of the client authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthFlow {
    /// Entering the 10-digit mobile number
    EnterPhone,

    /// A code was requested for `phone`; waiting for the user to type it
    OtpSent { phone: String },

    /// A code was submitted; waiting for the verifier's answer
    Verifying { phone: String, code: String },

    /// Verification succeeded for a phone with an existing profile
    ExistingUser { user_id: Uuid, phone: String },

    /// Verification succeeded for a first-time phone (or identity lookup
    /// failed); the user continues to profile creation
    NewUserOnboarding {
        phone: String,
        /// Identifier minted by the verifier; `None` when the verifier call
        /// itself failed and onboarding will mint one later
        user_id: Option<Uuid>,
    },
}

/// Answer from the verify-OTP call, as seen by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code accepted; identity resolved
    Success { user_id: Uuid, exists: bool },

    /// Code rejected (wrong, expired, or already used)
    InvalidOrExpired,

    /// The verifier call failed outright (network, server error)
    CallFailed,
}

impl Default for AuthFlow {
    fn default() -> Self {
        AuthFlow::EnterPhone
    }
}

impl AuthFlow {
    /// Start a fresh flow at the phone screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the 10-digit number from the phone screen. On success the
    /// flow holds the E.164 form; the issuer call happens outside and its
    /// failure is reported with [`AuthFlow::issue_failed`].
    pub fn submit_phone(self, local_number: &str) -> Result<Self, AuthError> {
        if !is_valid_local_mobile(local_number) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: local_number.to_string(),
            });
        }
        let phone = to_e164(DEFAULT_COUNTRY_CODE, local_number)
            .ok_or_else(|| AuthError::InvalidPhoneFormat {
                phone: local_number.to_string(),
            })?;
        Ok(AuthFlow::OtpSent { phone })
    }

    /// The issuer call failed; stay on the phone screen.
    pub fn issue_failed(self) -> Self {
        AuthFlow::EnterPhone
    }

    /// Resend from the code screen: the issuer is re-invoked and the
    /// outstanding code overwritten. The state is unchanged.
    pub fn resend(self) -> Self {
        match self {
            AuthFlow::OtpSent { phone } => AuthFlow::OtpSent { phone },
            other => other,
        }
    }

    /// Submit the 6-digit code from the code screen.
    pub fn submit_code(self, code: &str) -> Result<Self, AuthError> {
        match self {
            AuthFlow::OtpSent { phone } => {
                if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
                    return Err(AuthError::InvalidOrExpiredCode);
                }
                Ok(AuthFlow::Verifying {
                    phone,
                    code: code.to_string(),
                })
            }
            other => Ok(other),
        }
    }

    /// Apply the verifier's answer.
    ///
    /// A failed verifier call falls through to onboarding rather than an
    /// error screen. That mirrors the shipped client, but it means a
    /// backend outage can walk an existing user into creating a second
    /// profile; revisit before the onboarding step writes anything.
    pub fn on_verify_outcome(self, outcome: VerifyOutcome) -> Self {
        match self {
            AuthFlow::Verifying { phone, .. } => match outcome {
                VerifyOutcome::Success {
                    user_id,
                    exists: true,
                } => AuthFlow::ExistingUser { user_id, phone },
                VerifyOutcome::Success {
                    user_id,
                    exists: false,
                } => AuthFlow::NewUserOnboarding {
                    phone,
                    user_id: Some(user_id),
                },
                // Invalid or expired: back to the code screen so the
                // message can be surfaced next to a resend action
                VerifyOutcome::InvalidOrExpired => AuthFlow::OtpSent { phone },
                VerifyOutcome::CallFailed => AuthFlow::NewUserOnboarding {
                    phone,
                    user_id: None,
                },
            },
            other => other,
        }
    }

    /// Back navigation: return to the phone screen, dropping all
    /// in-progress data.
    pub fn back(self) -> Self {
        AuthFlow::EnterPhone
    }

    /// Phone held by the current state, if any.
    pub fn phone(&self) -> Option<&str> {
        match self {
            AuthFlow::EnterPhone => None,
            AuthFlow::OtpSent { phone }
            | AuthFlow::Verifying { phone, .. }
            | AuthFlow::ExistingUser { phone, .. }
            | AuthFlow::NewUserOnboarding { phone, .. } => Some(phone),
        }
    }
}
