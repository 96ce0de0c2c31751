use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::{Expr, OnConflict}, DatabaseConnection, NotSet, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub social: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Insertion order; breaks `created_at` ties.
    pub seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?;
    Ok(found)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find().order_by_asc(Column::CreatedAt).order_by_asc(Column::Seq).all(db).await?;
    Ok(rows)
}

/// Scalar columns supplied by one profile write. `None` leaves the stored value alone and
/// `social` entries are merged into the stored object key by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: BTreeMap<String, String>,
}

impl ProfilePatch {
    /// Why this patch cannot create a profile, if it cannot.
    pub fn missing_for_create(&self) -> Option<&'static str> {
        if self.status.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Some("Status is required");
        }
        if self.skills.as_ref().map_or(true, |s| s.is_empty()) {
            return Some("Skills is required");
        }
        None
    }

    fn supplied_columns(&self) -> Vec<Column> {
        let supplied = [
            (Column::Company, self.company.is_some()),
            (Column::Website, self.website.is_some()),
            (Column::Location, self.location.is_some()),
            (Column::Bio, self.bio.is_some()),
            (Column::Status, self.status.is_some()),
            (Column::GithubUsername, self.github_username.is_some()),
            (Column::Skills, self.skills.is_some()),
        ];
        let mut cols: Vec<Column> = supplied.into_iter().filter(|(_, set)| *set).map(|(c, _)| c).collect();
        cols.push(Column::UpdatedAt);
        cols
    }
}

/// Insert the profile, or write only the supplied columns onto the existing row for the same
/// user in the same statement. `id` and `created_at` of an existing row are kept.
pub async fn upsert(db: &DatabaseConnection, user_id: Uuid, patch: ProfilePatch) -> Result<Model, errors::ModelError> {
    if let Some(missing) = patch.missing_for_create() {
        return Err(errors::ModelError::Validation(missing.into()));
    }
    let mut on_conflict = OnConflict::column(Column::UserId);
    on_conflict.update_columns(patch.supplied_columns());
    if !patch.social.is_empty() {
        on_conflict.value(Column::Social, Expr::cust(r#""profile"."social" || "excluded"."social""#));
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company: Set(patch.company),
        website: Set(patch.website),
        location: Set(patch.location),
        bio: Set(patch.bio),
        status: Set(patch.status.unwrap_or_default()),
        github_username: Set(patch.github_username),
        skills: Set(json!(patch.skills.unwrap_or_default())),
        social: Set(json!(patch.social)),
        created_at: Set(now),
        updated_at: Set(now),
        seq: NotSet,
    };
    Entity::insert(am)
        .on_conflict(on_conflict.to_owned())
        .exec_without_returning(db)
        .await?;
    find_by_user(db, user_id)
        .await?
        .ok_or_else(|| errors::ModelError::Db("profile vanished after upsert".into()))
}

/// Write the supplied columns onto the existing row for `user_id` in one statement.
/// `None` when the user has no profile.
pub async fn update_existing(db: &DatabaseConnection, user_id: Uuid, patch: ProfilePatch) -> Result<Option<Model>, errors::ModelError> {
    if patch.status.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(errors::ModelError::Validation("Status is required".into()));
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut update = Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::UserId.eq(user_id));
    let scalars = [
        (Column::Company, patch.company),
        (Column::Website, patch.website),
        (Column::Location, patch.location),
        (Column::Bio, patch.bio),
        (Column::Status, patch.status),
        (Column::GithubUsername, patch.github_username),
    ];
    for (col, value) in scalars {
        if let Some(v) = value {
            update = update.col_expr(col, Expr::value(v));
        }
    }
    if let Some(skills) = patch.skills {
        update = update.col_expr(Column::Skills, Expr::value(json!(skills)));
    }
    if !patch.social.is_empty() {
        update = update.col_expr(
            Column::Social,
            Expr::cust_with_values(r#""social" || CAST(? AS jsonb)"#, [json!(patch.social)]),
        );
    }
    if update.exec(db).await?.rows_affected == 0 {
        return Ok(None);
    }
    find_by_user(db, user_id).await
}

pub async fn delete_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many().filter(Column::UserId.eq(user_id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::IdenStatic;

    #[test]
    fn creation_needs_status_and_skills() {
        let mut patch = ProfilePatch { skills: Some(vec!["go".into()]), ..Default::default() };
        assert_eq!(patch.missing_for_create(), Some("Status is required"));
        patch.status = Some("Dev".into());
        assert_eq!(patch.missing_for_create(), None);
        patch.skills = Some(vec![]);
        assert_eq!(patch.missing_for_create(), Some("Skills is required"));
    }

    #[test]
    fn only_supplied_columns_are_overwritten() {
        let patch = ProfilePatch { location: Some("Berlin".into()), ..Default::default() };
        let cols: Vec<String> = patch.supplied_columns().into_iter().map(|c| c.as_str().to_string()).collect();
        assert_eq!(cols, vec!["location", "updated_at"]);
    }
}
