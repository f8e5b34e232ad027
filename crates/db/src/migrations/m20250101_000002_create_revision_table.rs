//! Create `revision` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Revision::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Revision::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Revision::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Revision::ObjectId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Revision::Title)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Revision::Content).text().not_null())
                    .col(ColumnDef::new(Revision::Log).string_len(255))
                    .col(
                        ColumnDef::new(Revision::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_revision_object_id")
                    .table(Revision::Table)
                    .col(Revision::ObjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Revision::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Revision {
    Table,
    Id,
    UserId,
    ObjectId,
    Title,
    Content,
    Log,
    CreatedAt,
}
