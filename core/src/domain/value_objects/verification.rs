//! Verification result value objects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Profile;

/// Identity resolved by a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    /// User identifier; freshly minted when `exists` is false
    pub id: Uuid,

    /// Phone number that was verified (E.164 format)
    pub phone: String,

    /// Whether a profile already existed for this phone
    pub exists: bool,
}

/// Full result of a successful code verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Resolved identity
    pub user: VerifiedUser,

    /// Existing profile payload; `None` for first-time phones
    pub profile: Option<Profile>,

    /// Signed, short-lived session token for the client to carry forward
    pub session_token: String,
}

impl VerificationOutcome {
    /// Outcome for a phone that already has a profile.
    pub fn existing(profile: Profile, session_token: String) -> Self {
        Self {
            user: VerifiedUser {
                id: profile.id,
                phone: profile.phone.clone(),
                exists: true,
            },
            profile: Some(profile),
            session_token,
        }
    }

    /// Outcome for a first-time phone with a freshly minted identifier.
    pub fn new_user(id: Uuid, phone: String, session_token: String) -> Self {
        Self {
            user: VerifiedUser {
                id,
                phone,
                exists: false,
            },
            profile: None,
            session_token,
        }
    }
}
