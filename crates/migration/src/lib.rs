//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_profile;
mod m20240101_000003_create_profile_entries;
mod m20240101_000004_create_post;
mod m20240101_000005_create_post_like;
mod m20240101_000006_create_post_comment;
mod m20240101_000007_add_insertion_seq;
mod m20240101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_profile::Migration),
            Box::new(m20240101_000003_create_profile_entries::Migration),
            Box::new(m20240101_000004_create_post::Migration),
            Box::new(m20240101_000005_create_post_like::Migration),
            Box::new(m20240101_000006_create_post_comment::Migration),
            Box::new(m20240101_000007_add_insertion_seq::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_indexes::Migration),
        ]
    }
}
