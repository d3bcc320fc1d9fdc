//! Application state and route wiring.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use ss_core::repositories::{OtpStore, ProfileRepository};
use ss_core::services::otp::{OtpIssuer, OtpVerifier, SmsGateway};

use crate::routes;

/// Shared services injected into the request handlers.
pub struct AppState<O, S, R>
where
    O: OtpStore,
    S: SmsGateway,
    R: ProfileRepository,
{
    pub issuer: Arc<OtpIssuer<O, S>>,
    pub verifier: Arc<OtpVerifier<O, R>>,
}

/// Register all routes on a service config.
///
/// Kept generic over the collaborator traits so integration tests can run
/// the exact production routing against in-memory implementations.
pub fn configure_routes<O, S, R>(cfg: &mut web::ServiceConfig)
where
    O: OtpStore + 'static,
    S: SmsGateway + 'static,
    R: ProfileRepository + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1/auth")
            .route("/send-otp", web::post().to(routes::auth::send_otp::<O, S, R>))
            .route(
                "/verify-otp",
                web::post().to(routes::auth::verify_otp::<O, S, R>),
            ),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "soulsignal-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
