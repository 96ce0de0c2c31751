//! Postgres-backed entity tests. They run only when `DATABASE_URL` is set and
//! `SKIP_DB_TESTS` is not.

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

pub mod profile_tests;

pub(crate) async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
