use anyhow::Result;
use sea_orm::Set;
use serde_json::json;
use uuid::Uuid;

use crate::errors::ModelError;
use crate::profile::ProfilePatch;
use crate::{profile, profile_experience, user};
use super::setup_test_db;

fn basic(status: &str, company: Option<&str>) -> ProfilePatch {
    ProfilePatch {
        status: Some(status.to_string()),
        company: company.map(str::to_string),
        skills: Some(vec!["go".into(), "rust".into()]),
        ..Default::default()
    }
}

#[tokio::test]
async fn upsert_keeps_one_row_per_user() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    let email = format!("profile_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, "Profiled", &email, "$argon2id$fake", "https://avatar/x").await?;

    let first = profile::upsert(&db, u.id, basic("Developer", None)).await?;
    let second = profile::upsert(&db, u.id, basic("Senior Developer", Some("Acme"))).await?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.status, "Senior Developer");
    assert_eq!(second.company.as_deref(), Some("Acme"));

    // deleting the user cascades to the profile
    user::hard_delete(&db, u.id).await?;
    assert!(profile::find_by_user(&db, u.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_existing_needs_a_row() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    let email = format!("profile_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, "Profiled", &email, "$argon2id$fake", "https://avatar/x").await?;
    let bio = ProfilePatch { bio: Some("hello".into()), ..Default::default() };
    assert!(profile::update_existing(&db, u.id, bio.clone()).await?.is_none());
    assert!(matches!(profile::upsert(&db, u.id, bio.clone()).await, Err(ModelError::Validation(_))));

    profile::upsert(&db, u.id, basic("Developer", None)).await?;
    let updated = profile::update_existing(&db, u.id, bio).await?.map(|p| p.bio);
    assert_eq!(updated, Some(Some("hello".to_string())));
    user::hard_delete(&db, u.id).await?;
    Ok(())
}

#[tokio::test]
async fn concurrent_disjoint_writes_are_both_kept() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    let email = format!("profile_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, "Profiled", &email, "$argon2id$fake", "https://avatar/x").await?;
    let mut tw = basic("Developer", Some("Acme"));
    tw.social.insert("twitter".into(), "https://twitter.com/p".into());
    let mut li = basic("Developer", None);
    li.location = Some("Berlin".into());
    li.social.insert("linkedin".into(), "https://linkedin.com/in/p".into());

    let (a, b) = tokio::join!(profile::upsert(&db, u.id, tw), profile::upsert(&db, u.id, li));
    a?;
    b?;
    let stored = profile::find_by_user(&db, u.id).await?.map(|p| (p.company, p.location, p.social));
    assert_eq!(
        stored,
        Some((
            Some("Acme".to_string()),
            Some("Berlin".to_string()),
            json!({"linkedin": "https://linkedin.com/in/p", "twitter": "https://twitter.com/p"}),
        ))
    );
    user::hard_delete(&db, u.id).await?;
    Ok(())
}

#[tokio::test]
async fn experience_entries_newest_first_and_removed_by_id() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    let email = format!("career_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, "Career", &email, "$argon2id$fake", "https://avatar/x").await?;
    let p = profile::upsert(&db, u.id, basic("Developer", None)).await?;

    let entry = |title: &str| profile_experience::ActiveModel {
        profile_id: Set(p.id),
        title: Set(title.to_string()),
        company: Set("Acme".into()),
        location: Set(None),
        from_date: Set(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()),
        to_date: Set(None),
        current: Set(true),
        description: Set(None),
        ..Default::default()
    };
    let junior = profile_experience::create(&db, entry("Junior")).await?;
    profile_experience::create(&db, entry("Senior")).await?;
    assert!(profile_experience::create(&db, entry(" ")).await.is_err());

    let titles: Vec<String> = profile_experience::list_for_profile(&db, p.id).await?.into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Senior", "Junior"]);
    assert!(profile_experience::delete_for_profile(&db, p.id, junior.id).await?);
    assert!(!profile_experience::delete_for_profile(&db, p.id, junior.id).await?);

    user::hard_delete(&db, u.id).await?;
    Ok(())
}
