//! Recording SMS gateway for tests and local development.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use ss_core::errors::DomainError;
use ss_core::services::otp::SmsGateway;
use ss_shared::utils::phone::mask_phone_number;

/// A delivered (or rather, recorded) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSms {
    pub to: String,
    pub body: String,
}

/// Gateway that records messages instead of sending them.
///
/// Useful for integration tests and for running the API locally without
/// Twilio credentials; the would-be message is logged at info level.
#[derive(Default)]
pub struct MockSmsGateway {
    sent: Mutex<Vec<RecordedSms>>,
    fail_all: AtomicBool,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send fail with a delivery error until cleared.
    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    /// Messages recorded so far.
    pub fn sent_messages(&self) -> Vec<RecordedSms> {
        self.sent.lock().expect("sms mock lock poisoned").clone()
    }

    /// Last message recorded for a phone, if any.
    pub fn last_message_to(&self, phone: &str) -> Option<RecordedSms> {
        self.sent
            .lock()
            .expect("sms mock lock poisoned")
            .iter()
            .rev()
            .find(|m| m.to == phone)
            .cloned()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::delivery("mock gateway set to fail"));
        }

        info!(
            to = %mask_phone_number(phone),
            body = %body,
            "Mock SMS recorded"
        );

        let mut sent = self.sent.lock().expect("sms mock lock poisoned");
        sent.push(RecordedSms {
            to: phone.to_string(),
            body: body.to_string(),
        });
        Ok(format!("MOCK{:08}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
