//! Mapping from domain errors to HTTP responses.
//!
//! User-correctable errors keep their message; infrastructure failures are
//! logged with detail server-side and surfaced to the caller as a generic
//! failure.

use actix_web::HttpResponse;

use ss_core::errors::{AuthError, DomainError};

use crate::dto::ErrorResponse;

/// Convert a domain error into the endpoint's `{error}` JSON response.
pub fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::MissingPhone
            | AuthError::MissingFields
            | AuthError::InvalidPhoneFormat { .. }
            | AuthError::InvalidOrExpiredCode => {
                HttpResponse::BadRequest().json(ErrorResponse::new(auth.to_string()))
            }
            AuthError::IssuanceLimitExceeded { .. } => {
                HttpResponse::TooManyRequests().json(ErrorResponse::new(auth.to_string()))
            }
        },
        DomainError::Delivery { message } => {
            log::error!("SMS delivery failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to send SMS"))
        }
        DomainError::Storage { message } => {
            log::error!("Storage failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
        DomainError::Token(token) => {
            log::error!("Session token failure: {}", token);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
        DomainError::Internal { message } => {
            log::error!("Internal failure: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_user_errors_map_to_400() {
        for error in [
            AuthError::MissingPhone,
            AuthError::MissingFields,
            AuthError::InvalidOrExpiredCode,
        ] {
            let response = error_response(&error.into());
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_policy_denial_maps_to_429() {
        let response = error_response(&AuthError::IssuanceLimitExceeded { seconds: 60 }.into());
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_infrastructure_errors_map_to_500() {
        let storage = DomainError::storage("db down");
        let delivery = DomainError::delivery("twilio 503");
        assert_eq!(
            error_response(&storage).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_response(&delivery).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
