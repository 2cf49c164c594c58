//! Create `faq_category` table. Name and slug are both unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FaqCategory::Table)
                    .if_not_exists()
                    .col(uuid(FaqCategory::Id).primary_key())
                    .col(string_len(FaqCategory::Name, 80).unique_key().not_null())
                    .col(string_len(FaqCategory::Slug, 90).unique_key().not_null())
                    .col(integer(FaqCategory::Order).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FaqCategory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FaqCategory { Table, Id, Name, Slug, Order }
