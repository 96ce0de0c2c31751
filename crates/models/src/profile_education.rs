use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder};
use chrono::Utc;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, profile};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile_education")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub profile_id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from_date: Date,
    pub to_date: Option<Date>,
    pub current: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    /// Insertion order; breaks `created_at` ties.
    pub seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Profile }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Profile => Entity::belongs_to(profile::Entity).from(Column::ProfileId).to(profile::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new entry; `id` and `created_at` are assigned here.
pub async fn create(db: &DatabaseConnection, mut am: ActiveModel) -> Result<Model, errors::ModelError> {
    if let sea_orm::ActiveValue::Set(v) = &am.school {
        if v.trim().is_empty() { return Err(errors::ModelError::Validation("School is required".into())); }
    }
    if let sea_orm::ActiveValue::Set(v) = &am.degree {
        if v.trim().is_empty() { return Err(errors::ModelError::Validation("Degree is required".into())); }
    }
    if let sea_orm::ActiveValue::Set(v) = &am.field_of_study {
        if v.trim().is_empty() { return Err(errors::ModelError::Validation("Field of study is required".into())); }
    }
    am.id = sea_orm::Set(Uuid::new_v4());
    am.created_at = sea_orm::Set(Utc::now().into());
    let created = am.insert(db).await?;
    Ok(created)
}

pub async fn list_for_profile(db: &DatabaseConnection, profile_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::ProfileId.eq(profile_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Seq)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn delete_for_profile(db: &DatabaseConnection, profile_id: Uuid, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::ProfileId.eq(profile_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
