//! Create `profile` table with FK to `user`.
//!
//! At most one profile per user (unique `user_id`). Skills and social links are JSON columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(uuid(Profile::Id).primary_key())
                    .col(uuid(Profile::UserId).unique_key().not_null())
                    .col(ColumnDef::new(Profile::Company).string_len(255).null())
                    .col(ColumnDef::new(Profile::Website).string_len(512).null())
                    .col(ColumnDef::new(Profile::Location).string_len(255).null())
                    .col(ColumnDef::new(Profile::Bio).text().null())
                    .col(string_len(Profile::Status, 128).not_null())
                    .col(ColumnDef::new(Profile::GithubUsername).string_len(128).null())
                    .col(json_binary(Profile::Skills).not_null())
                    .col(json_binary(Profile::Social).not_null())
                    .col(timestamp_with_time_zone(Profile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Profile::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_user")
                            .from(Profile::Table, Profile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Profile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    UserId,
    Company,
    Website,
    Location,
    Bio,
    Status,
    GithubUsername,
    Skills,
    Social,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
