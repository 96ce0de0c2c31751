use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::profile::ProfilePatch;

use crate::auth::domain::User;

/// One profile per user. `experience`/`education` are most recently added first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Filled in on reads; `None` once the account is gone.
    #[serde(default)]
    pub user: Option<ProfileOwner>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    /// platform -> URL
    pub social: BTreeMap<String, String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub created_at: DateTime<Utc>,
}

/// Name and avatar of the account a profile belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

impl From<User> for ProfileOwner {
    fn from(u: User) -> Self {
        Self { id: u.id, name: u.name, avatar: u.avatar }
    }
}

impl Profile {
    /// Empty profile for `user_id`, before any patch is applied.
    pub(crate) fn blank(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            user: None,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: String::new(),
            github_username: None,
            skills: Vec::new(),
            social: BTreeMap::new(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Overwrite the supplied fields and merge the supplied social links.
    pub(crate) fn apply(&mut self, patch: ProfilePatch) {
        if let Some(v) = patch.company { self.company = Some(v); }
        if let Some(v) = patch.website { self.website = Some(v); }
        if let Some(v) = patch.location { self.location = Some(v); }
        if let Some(v) = patch.bio { self.bio = Some(v); }
        if let Some(v) = patch.github_username { self.github_username = Some(v); }
        if let Some(v) = patch.status { self.status = v; }
        if let Some(v) = patch.skills { self.skills = v; }
        self.social.extend(patch.social);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Body of `POST /profile`. Every field is optional; blank strings count as absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "githubusername")]
    pub github_username: Option<String>,
    /// Comma-joined, e.g. `"go, rust"`.
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

pub const SOCIAL_PLATFORMS: [&str; 5] = ["youtube", "twitter", "facebook", "linkedin", "instagram"];

fn supplied(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Split a comma-joined skill list, trimming each entry and dropping empty ones.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

impl ProfileFields {
    /// Social inputs that were actually supplied, keyed by platform.
    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        let values = [&self.youtube, &self.twitter, &self.facebook, &self.linkedin, &self.instagram];
        SOCIAL_PLATFORMS
            .iter()
            .zip(values)
            .filter_map(|(platform, v)| supplied(v.clone()).map(|url| (*platform, url)))
            .collect()
    }

    /// The supplied fields as a column patch. Blank strings and empty skill lists count as absent.
    pub fn into_patch(self) -> ProfilePatch {
        let social = self.social_links().into_iter().map(|(platform, url)| (platform.to_string(), url)).collect();
        ProfilePatch {
            company: supplied(self.company),
            website: supplied(self.website),
            location: supplied(self.location),
            bio: supplied(self.bio),
            status: supplied(self.status),
            github_username: supplied(self.github_username),
            skills: supplied(self.skills).map(|s| parse_skills(&s)).filter(|s| !s.is_empty()),
            social,
        }
    }
}

/// Body of `PUT /profile/experience`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Body of `PUT /profile/education`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    #[serde(alias = "fieldofstudy")]
    pub field_of_study: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Validated experience entry, ready to persist
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Validated education entry, ready to persist
#[derive(Debug, Clone)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

fn required(v: Option<String>, what: &str) -> Result<String, String> {
    supplied(v).ok_or_else(|| format!("{what} is required"))
}

impl ExperienceInput {
    pub fn validate(self) -> Result<NewExperience, String> {
        Ok(NewExperience {
            title: required(self.title, "Title")?,
            company: required(self.company, "Company")?,
            from: self.from.ok_or("From date is required")?,
            location: supplied(self.location),
            to: self.to,
            current: self.current,
            description: supplied(self.description),
        })
    }
}

impl EducationInput {
    pub fn validate(self) -> Result<NewEducation, String> {
        Ok(NewEducation {
            school: required(self.school, "School")?,
            degree: required(self.degree, "Degree")?,
            field_of_study: required(self.field_of_study, "Field of study")?,
            from: self.from.ok_or("From date is required")?,
            to: self.to,
            current: self.current,
            description: supplied(self.description),
        })
    }
}

impl NewExperience {
    pub(crate) fn into_entry(self) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::new_v4(),
            title: self.title,
            company: self.company,
            location: self.location,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

impl NewEducation {
    pub(crate) fn into_entry(self) -> EducationEntry {
        EducationEntry {
            id: Uuid::new_v4(),
            school: self.school,
            degree: self.degree,
            field_of_study: self.field_of_study,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

impl From<models::profile_experience::Model> for ExperienceEntry {
    fn from(m: models::profile_experience::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            company: m.company,
            location: m.location,
            from: m.from_date,
            to: m.to_date,
            current: m.current,
            description: m.description,
        }
    }
}

impl From<models::profile_education::Model> for EducationEntry {
    fn from(m: models::profile_education::Model) -> Self {
        Self {
            id: m.id,
            school: m.school,
            degree: m.degree,
            field_of_study: m.field_of_study,
            from: m.from_date,
            to: m.to_date,
            current: m.current,
            description: m.description,
        }
    }
}
