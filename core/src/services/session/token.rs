//! Signed session tokens issued after a successful verification.
//!
//! The token is a short-lived HS256 JWT. It replaces the reversible
//! unsigned blob a naive implementation might hand out: claims are the
//! same, but the signature makes the token tamper-evident and the `exp`
//! claim bounds its lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ss_shared::config::SessionConfig;

use crate::errors::TokenError;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user identifier
    pub sub: Uuid,

    /// Verified phone number (E.164 format)
    pub phone: String,

    /// Issued-at, seconds since epoch
    pub iat: i64,

    /// Expiry, seconds since epoch
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// Issues and validates signed session tokens.
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl SessionTokenService {
    /// Create a new token service from its configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    /// Issue a signed token for a verified identity.
    pub fn issue_token(&self, user_id: Uuid, phone: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            phone: phone.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.ttl_minutes)).timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Validate a token and return its claims.
    pub fn decode_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionTokenService {
        SessionTokenService::new(SessionConfig::new("unit-test-secret"))
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let service = service();
        let user_id = Uuid::new_v4();
        let token = service.issue_token(user_id, "+15551234567").unwrap();

        let claims = service.decode_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.phone, "+15551234567");
        assert_eq!(claims.iss, "soulsignal");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let token = service.issue_token(Uuid::new_v4(), "+15551234567").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('a') { 'b' } else { 'a' });

        assert!(matches!(
            service.decode_token(&tampered),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service().issue_token(Uuid::new_v4(), "+15551234567").unwrap();
        let other = SessionTokenService::new(SessionConfig::new("different-secret"));
        assert!(matches!(other.decode_token(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = SessionConfig::new("unit-test-secret");
        config.ttl_minutes = -5;
        let service = SessionTokenService::new(config);

        let token = service.issue_token(Uuid::new_v4(), "+15551234567").unwrap();
        assert!(matches!(
            service.decode_token(&token),
            Err(TokenError::Expired)
        ));
    }
}
