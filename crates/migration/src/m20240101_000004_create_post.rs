//! Create `post` table.
//!
//! `name`/`avatar` are snapshots of the author taken at creation. There is deliberately
//! no FK to `user`: removing an account leaves its posts in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(uuid(Post::Id).primary_key())
                    .col(uuid(Post::UserId).not_null())
                    .col(text(Post::Text).not_null())
                    .col(string_len(Post::Name, 128).not_null())
                    .col(string_len(Post::Avatar, 512).not_null())
                    .col(timestamp_with_time_zone(Post::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Post::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Post { Table, Id, UserId, Text, Name, Avatar, CreatedAt }
