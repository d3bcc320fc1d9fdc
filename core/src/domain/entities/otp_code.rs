//! One-time code entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// One-time code issued to a phone number.
///
/// The store keeps at most one row per phone; re-issuing overwrites the
/// outstanding code. A code is acceptable for verification only while
/// `verified` is false and `expires_at` lies in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Phone number this code was sent to (E.164 format)
    pub phone: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully consumed
    pub verified: bool,
}

impl OtpCode {
    /// Creates a new code for a phone number with the default 5-minute
    /// expiration window.
    pub fn new(phone: String) -> Self {
        Self::new_with_expiration(phone, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new code with a custom expiration in minutes.
    pub fn new_with_expiration(phone: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            phone,
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            verified: false,
        }
    }

    /// Generates a uniformly random 6-digit code in 100000..=999999.
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks if the code has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the code has expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Constant-time comparison against a submitted code.
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Whether the code would be accepted by the verifier at `now`:
    /// not yet consumed, not expired, and an exact match.
    pub fn is_consumable_at(&self, submitted: &str, now: DateTime<Utc>) -> bool {
        !self.verified && !self.is_expired_at(now) && self.matches(submitted)
    }

    /// Marks the code as consumed.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Text of the SMS carrying this code.
    pub fn sms_body(&self) -> String {
        format!(
            "Your SoulSignal verification code is: {}. This code expires in 5 minutes.",
            self.code
        )
    }
}
