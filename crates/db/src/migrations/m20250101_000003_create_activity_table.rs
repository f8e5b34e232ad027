//! Create `activity` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activity::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activity::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Activity::ObjectId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Activity::OriginalObjectId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activity::ActivityType).integer().not_null())
                    .col(ColumnDef::new(Activity::RevisionId).string_len(32))
                    .col(
                        ColumnDef::new(Activity::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Activity::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Activity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Timeline lookup in chronological order
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_original_object_created")
                    .table(Activity::Table)
                    .col(Activity::OriginalObjectId)
                    .col(Activity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_user_id")
                    .table(Activity::Table)
                    .col(Activity::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Activity {
    Table,
    Id,
    UserId,
    ObjectId,
    OriginalObjectId,
    ActivityType,
    RevisionId,
    Cancelled,
    CancelledAt,
    CreatedAt,
}
