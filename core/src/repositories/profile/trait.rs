//! Profile repository trait defining the interface for profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Profile;
use crate::errors::DomainError;

/// Repository for dating profiles keyed by phone number.
///
/// The verifier only reads (`find_by_phone`); creation happens in the
/// onboarding step that follows a first-time verification.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by its phone number (E.164 format).
    ///
    /// At most one profile exists per phone.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Profile>, DomainError>;

    /// Find a profile by its unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Persist a new profile, returning the stored entity.
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError>;
}
