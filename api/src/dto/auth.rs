//! Authentication endpoint DTOs.
//!
//! Field presence is modeled with `Option` so a missing field produces the
//! endpoint's own 400 response instead of a deserializer error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ss_core::domain::entities::Profile;
use ss_core::domain::value_objects::VerificationOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Phone number in E.164 format (e.g., "+919876543210")
    #[validate(length(min = 8, max = 16))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// Phone number in E.164 format
    pub phone: Option<String>,

    /// 6-digit verification code
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedUserDto {
    pub id: Uuid,
    pub phone: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub user: VerifiedUserDto,
    pub profile: Option<Profile>,
    #[serde(rename = "sessionToken")]
    pub session_token: String,
}

impl From<VerificationOutcome> for VerifyOtpResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        Self {
            success: true,
            user: VerifiedUserDto {
                id: outcome.user.id,
                phone: outcome.user.phone,
                exists: outcome.user.exists,
            },
            profile: outcome.profile,
            session_token: outcome.session_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_response_uses_session_token_key() {
        let response = VerifyOtpResponse {
            success: true,
            user: VerifiedUserDto {
                id: Uuid::new_v4(),
                phone: "+15551234567".to_string(),
                exists: false,
            },
            profile: None,
            session_token: "tok".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionToken"], "tok");
        assert!(json["profile"].is_null());
        assert_eq!(json["user"]["exists"], false);
    }

    #[test]
    fn test_send_request_accepts_missing_phone() {
        let request: SendOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(request.phone.is_none());
    }
}
