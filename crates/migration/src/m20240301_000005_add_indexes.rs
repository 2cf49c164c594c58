use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Book: public listing scans published rows in (order, title) order
        manager
            .create_index(
                Index::create()
                    .name("idx_book_published_order")
                    .table(Book::Table)
                    .col(Book::IsPublished)
                    .col(Book::Order)
                    .to_owned(),
            )
            .await?;

        // Faq: category filter
        manager
            .create_index(
                Index::create()
                    .name("idx_faq_category")
                    .table(Faq::Table)
                    .col(Faq::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ContactMessage: admin listing is newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_created")
                    .table(ContactMessage::Table)
                    .col(ContactMessage::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_book_published_order").table(Book::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_faq_category").table(Faq::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contact_created").table(ContactMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Book { Table, IsPublished, Order }

#[derive(DeriveIden)]
enum Faq { Table, CategoryId }

#[derive(DeriveIden)]
enum ContactMessage { Table, CreatedAt }
