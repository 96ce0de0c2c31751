use sea_orm::{entity::prelude::*, NotSet, Set, DatabaseConnection, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTimeWithTimeZone,
    /// Insertion order; breaks `created_at` ties.
    pub seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() { return Err(errors::ModelError::Validation("Text is required".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, user_id: Uuid, text: &str, name: &str, avatar: &str) -> Result<Model, errors::ModelError> {
    validate_text(text)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        text: Set(text.to_string()),
        name: Set(name.to_string()),
        avatar: Set(avatar.to_string()),
        created_at: Set(Utc::now().into()),
        seq: NotSet,
    };
    let created = am.insert(db).await?;
    Ok(created)
}

/// All posts, newest first.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find().order_by_desc(Column::CreatedAt).order_by_desc(Column::Seq).all(db).await?;
    Ok(rows)
}

/// Likes and comments go with the post via FK cascade.
pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
