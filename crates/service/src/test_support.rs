#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::auth::{
    avatar::Gravatar,
    credentials::mock::PlainCredentials,
    domain::{RegisterInput, User},
    repository::{mock::MockUserRepository, UserRepository},
    AccessGuard, UserRegistry,
};
use crate::posts::{repository::mock::MockPostRepository, PostService};
use crate::profiles::{repository::mock::MockProfileRepository, ProfileService};

/// All services wired over in-memory repositories.
pub struct Services {
    pub users: UserRegistry,
    pub posts: PostService,
    pub profiles: ProfileService,
    pub guard: AccessGuard,
    pub user_repo: Arc<dyn UserRepository>,
}

pub fn services() -> Services {
    let user_repo: Arc<dyn UserRepository> = Arc::new(MockUserRepository::default());
    let credentials = Arc::new(PlainCredentials);
    Services {
        users: UserRegistry::new(user_repo.clone(), credentials.clone(), Arc::new(Gravatar::default())),
        posts: PostService::new(Arc::new(MockPostRepository::default()), user_repo.clone()),
        profiles: ProfileService::new(Arc::new(MockProfileRepository::default()), user_repo.clone()),
        guard: AccessGuard::new(credentials),
        user_repo,
    }
}

pub async fn register(s: &Services, name: &str, email: &str) -> User {
    s.users
        .register(RegisterInput { name: name.into(), email: email.into(), password: "secret1".into() })
        .await
        .unwrap()
}

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Postgres connection for repository tests; `None` unless `DATABASE_URL` is set and `SKIP_DB_TESTS` is not.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    MIGRATED
        .get_or_init(|| async {
            let db = models::db::connect().await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
        })
        .await;
    Some(models::db::connect().await.expect("connect db"))
}
