use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewUser, User};
use crate::errors::ServiceError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
    /// Accounts for `ids`, in no particular order; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError>;
    /// Fails `Conflict` when the email is already registered.
    async fn create(&self, new: NewUser) -> Result<User, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<Uuid, User>>, // key: user id
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
            let email = email.trim().to_lowercase();
            let users = self.users.lock().await;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
            let users = self.users.lock().await;
            Ok(users.get(&id).cloned())
        }

        async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError> {
            let users = self.users.lock().await;
            Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
        }

        async fn create(&self, new: NewUser) -> Result<User, ServiceError> {
            let email = new.email.trim().to_lowercase();
            let mut users = self.users.lock().await;
            if users.values().any(|u| u.email == email) {
                return Err(ServiceError::Conflict("User already exists".into()));
            }
            let user = User {
                id: Uuid::new_v4(),
                name: new.name.trim().to_string(),
                email,
                password_hash: new.password_hash,
                avatar: new.avatar,
                created_at: chrono::Utc::now(),
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut users = self.users.lock().await;
            Ok(users.remove(&id).is_some())
        }
    }
}
