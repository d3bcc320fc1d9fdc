//! Handler for POST /api/v1/auth/verify-otp

use actix_web::{web, HttpResponse};

use ss_core::errors::AuthError;
use ss_core::repositories::{OtpStore, ProfileRepository};
use ss_core::services::otp::SmsGateway;
use ss_shared::utils::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error_response;

/// Verify a submitted code and resolve the phone's identity.
///
/// # Request Body
///
/// ```json
/// { "phone": "+919876543210", "code": "482913" }
/// ```
///
/// # Responses
///
/// * `200` — `{ "success": true, "user": { "id", "phone", "exists" },
///   "profile": <object|null>, "sessionToken": "..." }`
/// * `400` — missing fields, or invalid/expired/already-used code (the
///   response does not distinguish which)
/// * `500` — storage failure
pub async fn verify_otp<O, S, R>(
    state: web::Data<AppState<O, S, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    O: OtpStore + 'static,
    S: SmsGateway + 'static,
    R: ProfileRepository + 'static,
{
    let (phone, code) = match (request.phone.as_deref(), request.code.as_deref()) {
        (Some(phone), Some(code)) if !phone.is_empty() && !code.is_empty() => {
            (phone.to_string(), code.to_string())
        }
        _ => return error_response(&AuthError::MissingFields.into()),
    };

    log::info!("Processing verify-otp for {}", mask_phone_number(&phone));

    match state.verifier.verify(&phone, &code).await {
        Ok(outcome) => {
            log::info!(
                "Verified {} (exists: {})",
                mask_phone_number(&phone),
                outcome.user.exists
            );
            HttpResponse::Ok().json(VerifyOtpResponse::from(outcome))
        }
        Err(error) => {
            log::warn!(
                "Verification failed for {}: {}",
                mask_phone_number(&phone),
                error
            );
            error_response(&error)
        }
    }
}
