//! Integration tests for the OTP endpoints, running the production routing
//! against in-memory collaborators.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use ss_api::app::{configure_routes, AppState};
use ss_core::domain::entities::Profile;
use ss_core::repositories::{
    InMemoryOtpStore, InMemoryProfileRepository, OtpStore, ProfileRepository,
};
use ss_core::services::otp::{OtpIssuer, OtpServiceConfig, OtpVerifier, UnlimitedIssuance};
use ss_core::services::session::SessionTokenService;
use ss_infra::sms::MockSmsGateway;
use ss_shared::config::SessionConfig;

const PHONE: &str = "+15551234567";

struct TestHarness {
    state: web::Data<AppState<InMemoryOtpStore, MockSmsGateway, InMemoryProfileRepository>>,
    store: Arc<InMemoryOtpStore>,
    sms: Arc<MockSmsGateway>,
    profiles: Arc<InMemoryProfileRepository>,
}

fn harness() -> TestHarness {
    let store = Arc::new(InMemoryOtpStore::new());
    let sms = Arc::new(MockSmsGateway::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());

    let issuer = Arc::new(OtpIssuer::new(
        store.clone(),
        sms.clone(),
        Arc::new(UnlimitedIssuance),
        OtpServiceConfig::default(),
    ));
    let sessions = Arc::new(SessionTokenService::new(SessionConfig::new("test-secret")));
    let verifier = Arc::new(OtpVerifier::new(store.clone(), profiles.clone(), sessions));

    TestHarness {
        state: web::Data::new(AppState { issuer, verifier }),
        store,
        sms,
        profiles,
    }
}

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(
            App::new().app_data($harness.state.clone()).configure(
                configure_routes::<InMemoryOtpStore, MockSmsGateway, InMemoryProfileRepository>,
            ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_send_otp_success_shape_and_side_effects() {
    let harness = harness();
    let app = init_app!(harness);

    let before = Utc::now();
    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["phone"], PHONE);
    assert!(body["message"].as_str().unwrap().contains("OTP sent"));

    // Store row: 6-digit code, unverified, expires five minutes out
    let row = harness.store.find(PHONE).await.unwrap().expect("row stored");
    assert_eq!(row.code.len(), 6);
    assert!(!row.verified);
    assert!(row.expires_at >= before + Duration::minutes(5));
    assert!(row.expires_at <= Utc::now() + Duration::minutes(5));

    // Exactly one SMS carrying the code
    let messages = harness.sms.sent_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].body.contains(&row.code));
}

#[actix_rt::test]
async fn test_send_otp_missing_phone_is_400_without_store_access() {
    let harness = harness();
    let app = init_app!(harness);

    for payload in [json!({}), json!({ "phone": "" })] {
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/send-otp")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Phone number is required");
    }

    assert!(harness.store.find(PHONE).await.unwrap().is_none());
    assert!(harness.sms.sent_messages().is_empty());
}

#[actix_rt::test]
async fn test_send_otp_delivery_failure_is_500() {
    let harness = harness();
    let app = init_app!(harness);

    harness.sms.set_failing(true);
    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Failed to send SMS");

    // The persisted code outlives the failed delivery
    assert!(harness.store.find(PHONE).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_send_otp_storage_failure_is_500_and_skips_sms() {
    let harness = harness();
    let app = init_app!(harness);

    harness.store.fail_next_operation();
    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(harness.sms.sent_messages().is_empty());
}

#[actix_rt::test]
async fn test_issue_then_verify_first_time_phone() {
    let harness = harness();
    let app = init_app!(harness);

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );

    let code = harness.store.find(PHONE).await.unwrap().unwrap().code;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["phone"], PHONE);
    assert_eq!(body["user"]["exists"], false);
    assert!(Uuid::parse_str(body["user"]["id"].as_str().unwrap()).is_ok());
    assert!(body["profile"].is_null());
    assert!(!body["sessionToken"].as_str().unwrap().is_empty());

    // Row consumed
    assert!(harness.store.find(PHONE).await.unwrap().unwrap().verified);
}

#[actix_rt::test]
async fn test_verify_existing_phone_returns_profile() {
    let harness = harness();
    let profile = Profile::new(
        Uuid::new_v4(),
        PHONE.to_string(),
        "Asha".to_string(),
        27,
        "Female".to_string(),
        "Bengaluru".to_string(),
        "Coffee and trails.".to_string(),
    );
    let profile_id = profile.id;
    harness.profiles.create(profile).await.unwrap();
    let app = init_app!(harness);

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );
    let code = harness.store.find(PHONE).await.unwrap().unwrap().code;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["user"]["exists"], true);
    assert_eq!(body["user"]["id"], profile_id.to_string());
    assert_eq!(body["profile"]["name"], "Asha");
}

#[actix_rt::test]
async fn test_verify_wrong_code_is_400_undifferentiated() {
    let harness = harness();
    let app = init_app!(harness);

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );
    let issued = harness.store.find(PHONE).await.unwrap().unwrap().code;
    let wrong = if issued == "123456" { "654321" } else { "123456" };

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": wrong }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired OTP");
}

#[actix_rt::test]
async fn test_verify_reused_code_is_400_same_error() {
    let harness = harness();
    let app = init_app!(harness);

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-otp")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );
    let code = harness.store.find(PHONE).await.unwrap().unwrap().code;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": code.clone() }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired OTP");
}

#[actix_rt::test]
async fn test_verify_missing_fields_is_400() {
    let harness = harness();
    let app = init_app!(harness);

    for payload in [
        json!({}),
        json!({ "phone": PHONE }),
        json!({ "code": "123456" }),
        json!({ "phone": "", "code": "123456" }),
    ] {
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/verify-otp")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Phone number and code are required");
    }
}

#[actix_rt::test]
async fn test_reissue_invalidates_previous_code() {
    let harness = harness();
    let app = init_app!(harness);

    for _ in 0..2 {
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/send-otp")
            .set_json(json!({ "phone": PHONE }))
            .to_request();
        assert_eq!(
            test::call_service(&app, request).await.status(),
            StatusCode::OK
        );
    }

    let messages = harness.sms.sent_messages();
    assert_eq!(messages.len(), 2);
    let first_code = messages[0]
        .body
        .split(": ")
        .nth(1)
        .unwrap()
        .chars()
        .take(6)
        .collect::<String>();
    let current = harness.store.find(PHONE).await.unwrap().unwrap().code;

    if first_code != current {
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/verify-otp")
            .set_json(json!({ "phone": PHONE, "code": first_code }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "phone": PHONE, "code": current }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let harness = harness();
    let app = init_app!(harness);

    let request = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "soulsignal-api");
}
