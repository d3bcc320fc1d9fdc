//! Test doubles for the OTP service collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::DomainError;
use crate::services::otp::traits::SmsGateway;

/// Recording SMS gateway with one-shot failure injection.
#[derive(Default)]
pub struct MockSmsGateway {
    sent: Mutex<Vec<(String, String)>>,
    fail_next: AtomicBool,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next send fail with a delivery error.
    pub fn fail_next_send(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Messages sent so far as `(phone, body)` pairs.
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("sms mock lock poisoned").clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sms mock lock poisoned").len()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::delivery("simulated gateway outage"));
        }
        let mut sent = self.sent.lock().expect("sms mock lock poisoned");
        sent.push((phone.to_string(), body.to_string()));
        Ok(format!("MOCK{:04}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
