//! Result types for the OTP services.

use chrono::{DateTime, Utc};

/// Result of a successful code issuance.
#[derive(Debug, Clone)]
pub struct IssueResult {
    /// Phone number the code was sent to (E.164 format)
    pub phone: String,

    /// When the issued code expires
    pub expires_at: DateTime<Utc>,

    /// Provider message id returned by the SMS gateway
    pub message_id: String,
}
