use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{NewUser, User};
use crate::auth::repository::UserRepository;
use crate::errors::ServiceError;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let found = models::user::find_by_email(&self.db, email).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        let found = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::unavailable)?;
        Ok(found.map(User::from))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError> {
        let rows = models::user::find_many(&self.db, ids.to_vec()).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create(&self, new: NewUser) -> Result<User, ServiceError> {
        let created = models::user::create(&self.db, &new.name, &new.email, &new.password_hash, &new.avatar)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Duplicate(_) => ServiceError::Conflict("User already exists".into()),
                other => other.into(),
            })?;
        Ok(created.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::user::hard_delete(&self.db, id).await?)
    }
}
