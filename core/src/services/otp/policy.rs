//! Pluggable issuance policies for rate limiting code requests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::errors::{AuthError, DomainError};

/// Policy hook consulted before every code issuance.
///
/// Implementations decide per phone whether another code may be sent.
#[async_trait]
pub trait IssuancePolicy: Send + Sync {
    /// Returns `Ok(())` when issuance may proceed, or
    /// `AuthError::IssuanceLimitExceeded` when the phone must wait.
    async fn check(&self, phone: &str) -> Result<(), DomainError>;

    /// Record a successful issuance for the phone.
    async fn record_issuance(&self, phone: &str) -> Result<(), DomainError>;
}

/// Policy that never limits issuance.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlimitedIssuance;

#[async_trait]
impl IssuancePolicy for UnlimitedIssuance {
    async fn check(&self, _phone: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn record_issuance(&self, _phone: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Fixed-window policy: at most `max_issuances` per phone per `window`.
pub struct FixedWindowIssuance {
    max_issuances: u32,
    window: Duration,
    issuances: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl FixedWindowIssuance {
    pub fn new(max_issuances: u32, window: Duration) -> Self {
        Self {
            max_issuances,
            window,
            issuances: Mutex::new(HashMap::new()),
        }
    }

    /// Convenience constructor for an hourly window.
    pub fn per_hour(max_issuances: u32) -> Self {
        Self::new(max_issuances, Duration::hours(1))
    }
}

#[async_trait]
impl IssuancePolicy for FixedWindowIssuance {
    async fn check(&self, phone: &str) -> Result<(), DomainError> {
        let now = Utc::now();
        let mut issuances = self.issuances.lock().expect("policy lock poisoned");
        let timestamps = issuances.entry(phone.to_string()).or_default();
        timestamps.retain(|t| now - *t < self.window);

        if timestamps.len() >= self.max_issuances as usize {
            let oldest = timestamps.iter().min().copied().unwrap_or(now);
            let reset_in = (oldest + self.window - now).num_seconds().max(1) as u64;
            return Err(AuthError::IssuanceLimitExceeded { seconds: reset_in }.into());
        }
        Ok(())
    }

    async fn record_issuance(&self, phone: &str) -> Result<(), DomainError> {
        let mut issuances = self.issuances.lock().expect("policy lock poisoned");
        issuances
            .entry(phone.to_string())
            .or_default()
            .push(Utc::now());
        Ok(())
    }
}
