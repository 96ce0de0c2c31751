//! Create `post_like` table.
//!
//! The composite primary key `(post_id, user_id)` is what keeps a like set free of duplicates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostLike::Table)
                    .if_not_exists()
                    .col(uuid(PostLike::PostId).not_null())
                    .col(uuid(PostLike::UserId).not_null())
                    .col(timestamp_with_time_zone(PostLike::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_post_like")
                            .col(PostLike::PostId)
                            .col(PostLike::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_like_post")
                            .from(PostLike::Table, PostLike::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostLike::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostLike { Table, PostId, UserId, CreatedAt }

#[derive(DeriveIden)]
enum Post { Table, Id }
