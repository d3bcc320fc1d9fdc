//! Handler for POST /api/v1/auth/send-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use ss_core::errors::AuthError;
use ss_core::repositories::{OtpStore, ProfileRepository};
use ss_core::services::otp::SmsGateway;
use ss_shared::utils::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error_response;

/// Issue a one-time code to a phone number.
///
/// # Request Body
///
/// ```json
/// { "phone": "+919876543210" }
/// ```
///
/// # Responses
///
/// * `200` — `{ "success": true, "message": "...", "phone": "..." }`
/// * `400` — missing or malformed phone number
/// * `429` — issuance policy denied the request
/// * `500` — storage or SMS delivery failure
pub async fn send_otp<O, S, R>(
    state: web::Data<AppState<O, S, R>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    O: OtpStore + 'static,
    S: SmsGateway + 'static,
    R: ProfileRepository + 'static,
{
    let phone = match request.phone.as_deref() {
        Some(phone) if !phone.is_empty() => phone.to_string(),
        _ => return error_response(&AuthError::MissingPhone.into()),
    };

    if request.0.validate().is_err() {
        log::warn!(
            "Rejected send-otp request with malformed phone: {}",
            mask_phone_number(&phone)
        );
        return error_response(
            &AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(&phone),
            }
            .into(),
        );
    }

    log::info!("Processing send-otp for {}", mask_phone_number(&phone));

    match state.issuer.issue(&phone).await {
        Ok(result) => {
            log::info!(
                "OTP sent to {} (message id {})",
                mask_phone_number(&phone),
                result.message_id
            );
            HttpResponse::Ok().json(SendOtpResponse {
                success: true,
                message: "OTP sent successfully".to_string(),
                phone: result.phone,
            })
        }
        Err(error) => {
            log::warn!(
                "Failed to send OTP to {}: {}",
                mask_phone_number(&phone),
                error
            );
            error_response(&error)
        }
    }
}
