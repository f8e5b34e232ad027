//! Create `tag` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tag::SlugName)
                            .string_len(35)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tag::DisplayName).string_len(35).not_null())
                    .col(
                        ColumnDef::new(Tag::OriginalText)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Tag::ParsedText).text().not_null().default(""))
                    .col(ColumnDef::new(Tag::MainTagId).string_len(32))
                    .col(ColumnDef::new(Tag::MainTagSlugName).string_len(35))
                    .col(
                        ColumnDef::new(Tag::Recommend)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tag::Reserved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tag::Status).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Tag::FollowCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tag::QuestionCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tag::RevisionId)
                            .string_len(32)
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(Tag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tag::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Synonym lookups and the canonical-only page filter
        manager
            .create_index(
                Index::create()
                    .name("idx_tag_main_tag_id")
                    .table(Tag::Table)
                    .col(Tag::MainTagId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tag_status_question_count")
                    .table(Tag::Table)
                    .col(Tag::Status)
                    .col(Tag::QuestionCount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
    SlugName,
    DisplayName,
    OriginalText,
    ParsedText,
    MainTagId,
    MainTagSlugName,
    Recommend,
    Reserved,
    Status,
    FollowCount,
    QuestionCount,
    RevisionId,
    CreatedAt,
    UpdatedAt,
}
