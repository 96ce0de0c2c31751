use sea_orm::{entity::prelude::*, sea_query::OnConflict, NotSet, Set, DatabaseConnection, QueryFilter, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
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

/// Add `user_id` to the like set of `post_id` in one statement.
/// Returns `false` when the like was already present.
pub async fn insert_if_absent(db: &DatabaseConnection, post_id: Uuid, user_id: Uuid) -> Result<bool, errors::ModelError> {
    let am = ActiveModel {
        post_id: Set(post_id),
        user_id: Set(user_id),
        created_at: Set(Utc::now().into()),
        seq: NotSet,
    };
    let inserted = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::PostId, Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(inserted > 0)
}

/// Returns `false` when there was nothing to remove.
pub async fn remove(db: &DatabaseConnection, post_id: Uuid, user_id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::PostId.eq(post_id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

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
