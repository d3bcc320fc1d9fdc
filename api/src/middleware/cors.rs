//! CORS middleware configuration for cross-origin requests.
//!
//! The mobile web client calls the API from app-served origins, so the
//! endpoints answer preflight OPTIONS requests with the headers the client
//! sends. With no configured origins the policy is permissive; production
//! deployments list theirs in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ss_shared::config::CorsConfig;

/// Create a CORS middleware instance from the configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-client-info"),
            header::HeaderName::from_static("apikey"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("CORS: allowing any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            log::info!("CORS: allowing origin {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_permissive_cors() {
        let _cors = create_cors(&CorsConfig::default());
    }

    #[test]
    fn test_create_restricted_cors() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.soulsignal.example".to_string()],
            max_age: 600,
        };
        let _cors = create_cors(&config);
    }
}
