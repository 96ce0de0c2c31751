use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{EducationInput, ExperienceInput, Profile, ProfileFields, ProfileOwner};
use super::repository::ProfileRepository;
use crate::auth::{authorize_owner, repository::UserRepository};
use crate::errors::ServiceError;

/// Profile business rules: partial-merge upsert and the career-history lists.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, users: Arc<dyn UserRepository>) -> Self { Self { profiles, users } }

    /// Fill in the owner's name and avatar.
    async fn with_owner(&self, mut profile: Profile) -> Result<Profile, ServiceError> {
        profile.user = self.users.find_by_id(profile.user_id).await?.map(ProfileOwner::from);
        Ok(profile)
    }

    /// The subject's own profile, without owner details.
    async fn own(&self, subject: Uuid) -> Result<Profile, ServiceError> {
        let profile = self
            .profiles
            .find_by_user(subject)
            .await?
            .ok_or_else(|| ServiceError::NotFound("There is no profile for this user".into()))?;
        authorize_owner(profile.user_id, subject)?;
        Ok(profile)
    }

    pub async fn me(&self, subject: Uuid) -> Result<Profile, ServiceError> {
        let profile = self.own(subject).await?;
        self.with_owner(profile).await
    }

    /// Create or partially update the subject's profile. Only supplied fields are written, and
    /// the write is a single repository step with no prior read.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::repository::mock::MockUserRepository;
    /// use service::profiles::{ProfileService, domain::ProfileFields, repository::mock::MockProfileRepository};
    /// let svc = ProfileService::new(Arc::new(MockProfileRepository::default()), Arc::new(MockUserRepository::default()));
    /// let me = uuid::Uuid::new_v4();
    /// let fields = ProfileFields { status: Some("Developer".into()), skills: Some("go, rust".into()), ..Default::default() };
    /// let profile = tokio_test::block_on(svc.upsert(me, fields)).unwrap();
    /// assert_eq!(profile.skills, vec!["go", "rust"]);
    /// ```
    #[instrument(skip(self, fields), fields(subject = %subject))]
    pub async fn upsert(&self, subject: Uuid, fields: ProfileFields) -> Result<Profile, ServiceError> {
        let patch = fields.into_patch();
        let saved = match patch.missing_for_create() {
            None => self.profiles.upsert(subject, patch).await?,
            Some(missing) => self
                .profiles
                .update(subject, patch)
                .await?
                .ok_or_else(|| ServiceError::Validation(missing.into()))?,
        };
        info!(profile_id = %saved.id, "profile_saved");
        self.with_owner(saved).await
    }

    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Profile, ServiceError> {
        let profile = self.profiles.find_by_user(user_id).await?.ok_or_else(|| ServiceError::not_found("Profile"))?;
        self.with_owner(profile).await
    }

    pub async fn list_all(&self) -> Result<Vec<Profile>, ServiceError> {
        let mut profiles = self.profiles.list().await?;
        let ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
        let mut owners: HashMap<Uuid, ProfileOwner> =
            self.users.find_many(&ids).await?.into_iter().map(|u| (u.id, ProfileOwner::from(u))).collect();
        for p in &mut profiles {
            p.user = owners.remove(&p.user_id);
        }
        Ok(profiles)
    }

    /// Remove the subject's profile and account. Their posts are left in place.
    #[instrument(skip(self), fields(subject = %subject))]
    pub async fn delete(&self, subject: Uuid) -> Result<(), ServiceError> {
        if let Some(p) = self.profiles.find_by_user(subject).await? {
            authorize_owner(p.user_id, subject)?;
            self.profiles.delete_by_user(subject).await?;
        }
        if !self.users.delete(subject).await? {
            warn!("account already gone");
        }
        info!("account_removed");
        Ok(())
    }

    #[instrument(skip(self, input), fields(subject = %subject))]
    pub async fn add_experience(&self, subject: Uuid, input: ExperienceInput) -> Result<Profile, ServiceError> {
        let entry = input.validate().map_err(ServiceError::Validation)?;
        let profile = self.own(subject).await?;
        self.profiles.add_experience(profile.id, entry).await?;
        self.me(subject).await
    }

    #[instrument(skip(self), fields(subject = %subject, entry_id = %entry_id))]
    pub async fn remove_experience(&self, subject: Uuid, entry_id: Uuid) -> Result<Profile, ServiceError> {
        let profile = self.own(subject).await?;
        if !profile.experience.iter().any(|e| e.id == entry_id)
            || !self.profiles.remove_experience(profile.id, entry_id).await?
        {
            return Err(ServiceError::not_found("Experience"));
        }
        self.me(subject).await
    }

    #[instrument(skip(self, input), fields(subject = %subject))]
    pub async fn add_education(&self, subject: Uuid, input: EducationInput) -> Result<Profile, ServiceError> {
        let entry = input.validate().map_err(ServiceError::Validation)?;
        let profile = self.own(subject).await?;
        self.profiles.add_education(profile.id, entry).await?;
        self.me(subject).await
    }

    #[instrument(skip(self), fields(subject = %subject, entry_id = %entry_id))]
    pub async fn remove_education(&self, subject: Uuid, entry_id: Uuid) -> Result<Profile, ServiceError> {
        let profile = self.own(subject).await?;
        if !profile.education.iter().any(|e| e.id == entry_id)
            || !self.profiles.remove_education(profile.id, entry_id).await?
        {
            return Err(ServiceError::not_found("Education"));
        }
        self.me(subject).await
    }
}
