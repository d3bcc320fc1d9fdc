//! Code store trait defining the interface for one-time code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::OtpCode;
use crate::errors::DomainError;

/// Durable keyed storage of issued one-time codes.
///
/// The store keeps at most one outstanding code per phone. The contract has
/// exactly two mutations: `upsert` overwrites the row for a phone, and
/// `consume` atomically checks and flips the `verified` flag. Keeping the
/// check and the flip in one operation is what guarantees at-most-one
/// successful verification per issued code under concurrent requests.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Insert or overwrite the outstanding code for `code.phone`.
    async fn upsert(&self, code: OtpCode) -> Result<(), DomainError>;

    /// Atomically consume the code for `phone` when it matches `submitted`,
    /// is not yet verified, and has not expired at `now`.
    ///
    /// Returns `true` when this call flipped the row to verified; `false`
    /// when no row qualified (wrong code, expired, already consumed, or
    /// never issued). Implementations MUST perform the check and the update
    /// as a single conditional write.
    async fn consume(
        &self,
        phone: &str,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Fetch the outstanding row for a phone, if any.
    async fn find(&self, phone: &str) -> Result<Option<OtpCode>, DomainError>;
}
