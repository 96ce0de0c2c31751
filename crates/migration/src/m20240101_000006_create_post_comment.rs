//! Create `post_comment` table with FK to `post`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostComment::Table)
                    .if_not_exists()
                    .col(uuid(PostComment::Id).primary_key())
                    .col(uuid(PostComment::PostId).not_null())
                    .col(uuid(PostComment::UserId).not_null())
                    .col(text(PostComment::Text).not_null())
                    .col(string_len(PostComment::Name, 128).not_null())
                    .col(string_len(PostComment::Avatar, 512).not_null())
                    .col(timestamp_with_time_zone(PostComment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_comment_post")
                            .from(PostComment::Table, PostComment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostComment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostComment { Table, Id, PostId, UserId, Text, Name, Avatar, CreatedAt }

#[derive(DeriveIden)]
enum Post { Table, Id }
