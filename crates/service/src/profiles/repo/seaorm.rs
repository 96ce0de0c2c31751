use std::collections::BTreeMap;

use chrono::Utc;
use models::errors::ModelError;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::profiles::domain::{EducationEntry, ExperienceEntry, NewEducation, NewExperience, Profile, ProfilePatch};
use crate::profiles::repository::ProfileRepository;

/// The owning profile was deleted between the lookup and the insert.
fn profile_gone(e: ModelError) -> ServiceError {
    match e {
        ModelError::MissingParent(_) => ServiceError::NotFound("There is no profile for this user".into()),
        other => other.into(),
    }
}

pub struct SeaOrmProfileRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProfileRepository {
    async fn assemble(&self, m: models::profile::Model) -> Result<Profile, ServiceError> {
        let experience = models::profile_experience::list_for_profile(&self.db, m.id)
            .await?
            .into_iter()
            .map(ExperienceEntry::from)
            .collect();
        let education = models::profile_education::list_for_profile(&self.db, m.id)
            .await?
            .into_iter()
            .map(EducationEntry::from)
            .collect();
        let skills: Vec<String> = serde_json::from_value(m.skills).map_err(ServiceError::unavailable)?;
        let social: BTreeMap<String, String> = serde_json::from_value(m.social).map_err(ServiceError::unavailable)?;
        Ok(Profile {
            id: m.id,
            user_id: m.user_id,
            user: None,
            company: m.company,
            website: m.website,
            location: m.location,
            bio: m.bio,
            status: m.status,
            github_username: m.github_username,
            skills,
            social,
            experience,
            education,
            created_at: m.created_at.with_timezone(&Utc),
        })
    }
}

#[async_trait::async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ServiceError> {
        match models::profile::find_by_user(&self.db, user_id).await? {
            Some(m) => Ok(Some(self.assemble(m).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Profile>, ServiceError> {
        let rows = models::profile::list(&self.db).await?;
        let mut out = Vec::with_capacity(rows.len());
        for m in rows {
            out.push(self.assemble(m).await?);
        }
        Ok(out)
    }

    async fn upsert(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Profile, ServiceError> {
        let saved = models::profile::upsert(&self.db, user_id, patch).await?;
        self.assemble(saved).await
    }

    async fn update(&self, user_id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>, ServiceError> {
        match models::profile::update_existing(&self.db, user_id, patch).await? {
            Some(m) => Ok(Some(self.assemble(m).await?)),
            None => Ok(None),
        }
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::profile::delete_by_user(&self.db, user_id).await?)
    }

    async fn add_experience(&self, profile_id: Uuid, entry: NewExperience) -> Result<(), ServiceError> {
        let am = models::profile_experience::ActiveModel {
            profile_id: Set(profile_id),
            title: Set(entry.title),
            company: Set(entry.company),
            location: Set(entry.location),
            from_date: Set(entry.from),
            to_date: Set(entry.to),
            current: Set(entry.current),
            description: Set(entry.description),
            ..Default::default()
        };
        models::profile_experience::create(&self.db, am).await.map_err(profile_gone)?;
        Ok(())
    }

    async fn remove_experience(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::profile_experience::delete_for_profile(&self.db, profile_id, entry_id).await?)
    }

    async fn add_education(&self, profile_id: Uuid, entry: NewEducation) -> Result<(), ServiceError> {
        let am = models::profile_education::ActiveModel {
            profile_id: Set(profile_id),
            school: Set(entry.school),
            degree: Set(entry.degree),
            field_of_study: Set(entry.field_of_study),
            from_date: Set(entry.from),
            to_date: Set(entry.to),
            current: Set(entry.current),
            description: Set(entry.description),
            ..Default::default()
        };
        models::profile_education::create(&self.db, am).await.map_err(profile_gone)?;
        Ok(())
    }

    async fn remove_education(&self, profile_id: Uuid, entry_id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::profile_education::delete_for_profile(&self.db, profile_id, entry_id).await?)
    }
}
