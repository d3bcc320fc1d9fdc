//! User profile entity for the SoulSignal dating app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dating profile tied to a verified phone number.
///
/// At most one profile exists per phone; the verifier uses that lookup to
/// decide between an existing-user login and first-time onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier, minted at verification time for new users
    pub id: Uuid,

    /// Phone number in E.164 format
    pub phone: String,

    /// Display name
    pub name: String,

    /// Contact email, collected during onboarding
    pub email: Option<String>,

    /// Age in years
    pub age: i32,

    /// Self-described gender
    pub gender: String,

    /// Home location
    pub location: String,

    /// Short bio shown on the profile card
    pub bio: String,

    /// URL of the profile photo, if uploaded
    pub photo: Option<String>,

    /// Whether onboarding finished all required fields
    pub is_profile_complete: bool,

    /// Timestamp when the profile was created
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a complete profile for a user finishing onboarding.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        phone: String,
        name: String,
        age: i32,
        gender: String,
        location: String,
        bio: String,
    ) -> Self {
        Self {
            id,
            phone,
            name,
            email: None,
            age,
            gender,
            location,
            bio,
            photo: None,
            is_profile_complete: true,
            created_at: Utc::now(),
        }
    }

    /// Builder-style email setter
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder-style photo setter
    pub fn with_photo(mut self, photo_url: impl Into<String>) -> Self {
        self.photo = Some(photo_url.into());
        self
    }
}
