use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_post_created_at")
                    .table(Post::Table)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // PostComment: loaded per post
        manager
            .create_index(
                Index::create()
                    .name("idx_post_comment_post")
                    .table(PostComment::Table)
                    .col(PostComment::PostId)
                    .to_owned(),
            )
            .await?;

        // Career entries: loaded per profile
        manager
            .create_index(
                Index::create()
                    .name("idx_experience_profile")
                    .table(ProfileExperience::Table)
                    .col(ProfileExperience::ProfileId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_education_profile")
                    .table(ProfileEducation::Table)
                    .col(ProfileEducation::ProfileId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_created_at").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_comment_post").table(PostComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_experience_profile").table(ProfileExperience::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_education_profile").table(ProfileEducation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, CreatedAt }

#[derive(DeriveIden)]
enum PostComment { Table, PostId }

#[derive(DeriveIden)]
enum ProfileExperience { Table, ProfileId }

#[derive(DeriveIden)]
enum ProfileEducation { Table, ProfileId }
