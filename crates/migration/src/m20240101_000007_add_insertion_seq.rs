//! Add a `seq` BIGSERIAL to every table listed in insertion order.
//!
//! Rows written within the same microsecond share `created_at`; `seq` breaks the tie.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Seq { Seq }

#[derive(DeriveIden)]
enum Profile { Table }

#[derive(DeriveIden)]
enum ProfileExperience { Table }

#[derive(DeriveIden)]
enum ProfileEducation { Table }

#[derive(DeriveIden)]
enum Post { Table }

#[derive(DeriveIden)]
enum PostLike { Table }

#[derive(DeriveIden)]
enum PostComment { Table }

fn tables() -> [DynIden; 6] {
    [
        Profile::Table.into_iden(),
        ProfileExperience::Table.into_iden(),
        ProfileEducation::Table.into_iden(),
        Post::Table.into_iden(),
        PostLike::Table.into_iden(),
        PostComment::Table.into_iden(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in tables() {
            manager
                .alter_table(
                    Table::alter()
                        .table(table)
                        .add_column(ColumnDef::new(Seq::Seq).big_integer().auto_increment().not_null())
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in tables() {
            manager
                .alter_table(Table::alter().table(table).drop_column(Seq::Seq).to_owned())
                .await?;
        }
        Ok(())
    }
}
