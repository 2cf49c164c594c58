//! Create `book` table.
//!
//! Catalog entries edited by administrators; the public API only ever sees
//! published rows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(uuid(Book::Id).primary_key())
                    .col(string_len(Book::Title, 200).not_null())
                    .col(string_len(Book::Slug, 220).unique_key().not_null())
                    .col(string_len(Book::Summary, 300).not_null())
                    .col(text(Book::DescriptionHtml).not_null())
                    // Nullable: relative media path, absent until an image is uploaded
                    .col(ColumnDef::new(Book::Image).string_len(400).null())
                    .col(string_len(Book::ImageAlt, 200).not_null())
                    .col(string_len(Book::Keywords, 300).not_null())
                    .col(string_len(Book::DetailUrl, 400).not_null())
                    .col(boolean(Book::IsPublished).not_null().default(true))
                    .col(integer(Book::Order).not_null().default(0))
                    .col(timestamp_with_time_zone(Book::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Book::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Title, Slug, Summary, DescriptionHtml, Image, ImageAlt, Keywords, DetailUrl, IsPublished, Order, CreatedAt, UpdatedAt }
