//! Create `faq` table with optional FK to `faq_category`.
//!
//! Deleting a category clears the reference on its entries instead of
//! cascading.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Faq::Table)
                    .if_not_exists()
                    .col(uuid(Faq::Id).primary_key())
                    .col(string_len(Faq::Question, 160).not_null())
                    .col(text(Faq::AnswerHtml).not_null())
                    .col(ColumnDef::new(Faq::CategoryId).uuid().null())
                    .col(boolean(Faq::IsPublished).not_null().default(true))
                    .col(integer(Faq::Order).not_null().default(0))
                    .col(timestamp_with_time_zone(Faq::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Faq::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faq_category")
                            .from(Faq::Table, Faq::CategoryId)
                            .to(FaqCategory::Table, FaqCategory::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Faq::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Faq { Table, Id, Question, AnswerHtml, CategoryId, IsPublished, Order, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum FaqCategory { Table, Id }
