use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewEducation, NewExperience, Profile, ProfilePatch};
use crate::errors::ServiceError;

/// Profile persistence, keyed by owning user id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ServiceError>;
    async fn list(&self) -> Result<Vec<Profile>, ServiceError>;
    /// Insert, or write only the supplied fields onto the user's existing profile, as one
    /// atomic step. Fails `Validation` when the patch cannot create a profile.
    async fn upsert(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, ServiceError>;
    /// Write only the supplied fields onto the user's existing profile. `None` when there is none.
    async fn update(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, ServiceError>;
    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, ServiceError>;

    async fn add_experience(&self, profile_id: Uuid, entry: NewExperience) -> Result<(), ServiceError>;
    async fn remove_experience(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError>;
    async fn add_education(&self, profile_id: Uuid, entry: NewEducation) -> Result<(), ServiceError>;
    async fn remove_education(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockProfileRepository {
        profiles: Mutex<Vec<Profile>>, // creation order
    }

    fn missing() -> ServiceError { ServiceError::not_found("Profile") }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ServiceError> {
            Ok(self.profiles.lock().await.iter().find(|p| p.user_id == user_id).cloned())
        }

        async fn list(&self) -> Result<Vec<Profile>, ServiceError> {
            Ok(self.profiles.lock().await.clone())
        }

        async fn upsert(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, ServiceError> {
            let mut profiles = self.profiles.lock().await;
            if let Some(p) = profiles.iter_mut().find(|p| p.user_id == user_id) {
                p.apply(patch);
                return Ok(p.clone());
            }
            if let Some(missing) = patch.missing_for_create() {
                return Err(ServiceError::Validation(missing.into()));
            }
            let mut p = Profile::blank(user_id);
            p.apply(patch);
            profiles.push(p.clone());
            Ok(p)
        }

        async fn update(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, ServiceError> {
            let mut profiles = self.profiles.lock().await;
            Ok(profiles.iter_mut().find(|p| p.user_id == user_id).map(|p| {
                p.apply(patch);
                p.clone()
            }))
        }

        async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, ServiceError> {
            let mut profiles = self.profiles.lock().await;
            let before = profiles.len();
            profiles.retain(|p| p.user_id != user_id);
            Ok(profiles.len() != before)
        }

        async fn add_experience(&self, profile_id: Uuid, entry: NewExperience) -> Result<(), ServiceError> {
            let mut profiles = self.profiles.lock().await;
            let p = profiles.iter_mut().find(|p| p.id == profile_id).ok_or_else(missing)?;
            p.experience.insert(0, entry.into_entry());
            Ok(())
        }

        async fn remove_experience(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError> {
            let mut profiles = self.profiles.lock().await;
            let p = profiles.iter_mut().find(|p| p.id == profile_id).ok_or_else(missing)?;
            let before = p.experience.len();
            p.experience.retain(|e| e.id != entry_id);
            Ok(p.experience.len() != before)
        }

        async fn add_education(&self, profile_id: Uuid, entry: NewEducation) -> Result<(), ServiceError> {
            let mut profiles = self.profiles.lock().await;
            let p = profiles.iter_mut().find(|p| p.id == profile_id).ok_or_else(missing)?;
            p.education.insert(0, entry.into_entry());
            Ok(())
        }

        async fn remove_education(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError> {
            let mut profiles = self.profiles.lock().await;
            let p = profiles.iter_mut().find(|p| p.id == profile_id).ok_or_else(missing)?;
            let before = p.education.len();
            p.education.retain(|e| e.id != entry_id);
            Ok(p.education.len() != before)
        }
    }
}
