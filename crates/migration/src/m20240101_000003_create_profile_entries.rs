//! Create `profile_experience` and `profile_education` tables.
//!
//! Both hang off `profile` and vanish with it. `created_at` orders entries most-recent-first.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfileExperience::Table)
                    .if_not_exists()
                    .col(uuid(ProfileExperience::Id).primary_key())
                    .col(uuid(ProfileExperience::ProfileId).not_null())
                    .col(string_len(ProfileExperience::Title, 255).not_null())
                    .col(string_len(ProfileExperience::Company, 255).not_null())
                    .col(ColumnDef::new(ProfileExperience::Location).string_len(255).null())
                    .col(date(ProfileExperience::FromDate).not_null())
                    .col(ColumnDef::new(ProfileExperience::ToDate).date().null())
                    .col(boolean(ProfileExperience::Current).not_null())
                    .col(ColumnDef::new(ProfileExperience::Description).text().null())
                    .col(timestamp_with_time_zone(ProfileExperience::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_experience_profile")
                            .from(ProfileExperience::Table, ProfileExperience::ProfileId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileEducation::Table)
                    .if_not_exists()
                    .col(uuid(ProfileEducation::Id).primary_key())
                    .col(uuid(ProfileEducation::ProfileId).not_null())
                    .col(string_len(ProfileEducation::School, 255).not_null())
                    .col(string_len(ProfileEducation::Degree, 255).not_null())
                    .col(string_len(ProfileEducation::FieldOfStudy, 255).not_null())
                    .col(date(ProfileEducation::FromDate).not_null())
                    .col(ColumnDef::new(ProfileEducation::ToDate).date().null())
                    .col(boolean(ProfileEducation::Current).not_null())
                    .col(ColumnDef::new(ProfileEducation::Description).text().null())
                    .col(timestamp_with_time_zone(ProfileEducation::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_education_profile")
                            .from(ProfileEducation::Table, ProfileEducation::ProfileId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileEducation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfileExperience::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProfileExperience {
    Table,
    Id,
    ProfileId,
    Title,
    Company,
    Location,
    FromDate,
    ToDate,
    Current,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProfileEducation {
    Table,
    Id,
    ProfileId,
    School,
    Degree,
    FieldOfStudy,
    FromDate,
    ToDate,
    Current,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Profile { Table, Id }
