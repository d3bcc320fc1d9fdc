//! In-memory code store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::OtpCode;
use crate::errors::DomainError;

use super::OtpStore;

/// In-memory implementation of [`OtpStore`] backed by a mutex-guarded map.
///
/// `consume` holds the lock across the check and the flag flip, giving the
/// same at-most-once guarantee as the SQL conditional update.
#[derive(Default)]
pub struct InMemoryOtpStore {
    codes: Mutex<HashMap<String, OtpCode>>,
    fail_next: AtomicBool,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store operation fail with a storage error.
    pub fn fail_next_operation(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::storage("simulated store failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn upsert(&self, code: OtpCode) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.lock().expect("otp store lock poisoned");
        codes.insert(code.phone.clone(), code);
        Ok(())
    }

    async fn consume(
        &self,
        phone: &str,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.lock().expect("otp store lock poisoned");
        match codes.get_mut(phone) {
            Some(row) if row.is_consumable_at(submitted, now) => {
                row.mark_verified();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find(&self, phone: &str) -> Result<Option<OtpCode>, DomainError> {
        self.check_failure()?;
        let codes = self.codes.lock().expect("otp store lock poisoned");
        Ok(codes.get(phone).cloned())
    }
}
