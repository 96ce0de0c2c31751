use sea_orm::{entity::prelude::*, NotSet, Set, DatabaseConnection, QueryFilter, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
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
pub enum Relation { Post }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Post => Entity::belongs_to(post::Entity).from(Column::PostId).to(post::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, post_id: Uuid, user_id: Uuid, text: &str, name: &str, avatar: &str) -> Result<Model, errors::ModelError> {
    post::validate_text(text)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        post_id: Set(post_id),
        user_id: Set(user_id),
        text: Set(text.to_string()),
        name: Set(name.to_string()),
        avatar: Set(avatar.to_string()),
        created_at: Set(Utc::now().into()),
        seq: NotSet,
    };
    // a post deleted since the caller's lookup surfaces as ModelError::MissingParent
    let created = am.insert(db).await?;
    Ok(created)
}

pub async fn find_for_post(db: &DatabaseConnection, post_id: Uuid, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::PostId.eq(post_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Delete exactly the comment `id` under `post_id`.
pub async fn delete_for_post(db: &DatabaseConnection, post_id: Uuid, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::PostId.eq(post_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Comments on one post, newest first.
pub async fn list_for_post(db: &DatabaseConnection, post_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::PostId.eq(post_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Seq)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn list_for_posts(db: &DatabaseConnection, post_ids: Vec<Uuid>) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::PostId.is_in(post_ids))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Seq)
        .all(db)
        .await?;
    Ok(rows)
}
