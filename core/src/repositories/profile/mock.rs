//! In-memory profile repository for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Profile;
use crate::errors::DomainError;

use super::ProfileRepository;

/// In-memory implementation of [`ProfileRepository`].
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<String, Profile>>,
    fail_next: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing profile.
    pub fn with_profile(self, profile: Profile) -> Self {
        {
            let mut profiles = self.profiles.lock().expect("profile repo lock poisoned");
            profiles.insert(profile.phone.clone(), profile);
        }
        self
    }

    /// Make the next repository operation fail with a storage error.
    pub fn fail_next_operation(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::storage("simulated profile lookup failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Profile>, DomainError> {
        self.check_failure()?;
        let profiles = self.profiles.lock().expect("profile repo lock poisoned");
        Ok(profiles.get(phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        self.check_failure()?;
        let profiles = self.profiles.lock().expect("profile repo lock poisoned");
        Ok(profiles.values().find(|p| p.id == id).cloned())
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        self.check_failure()?;
        let mut profiles = self.profiles.lock().expect("profile repo lock poisoned");
        if profiles.contains_key(&profile.phone) {
            return Err(DomainError::storage(format!(
                "duplicate profile for phone {}",
                profile.phone
            )));
        }
        profiles.insert(profile.phone.clone(), profile.clone());
        Ok(profile)
    }
}
