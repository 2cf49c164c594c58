//! Create `contact_message` table.
//!
//! Rows are written once by the public submission endpoint and read only by
//! the admin listing. Passwords are stored as one-way hashes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactMessage::Table)
                    .if_not_exists()
                    .col(uuid(ContactMessage::Id).primary_key())
                    .col(string_len(ContactMessage::Nombre, 120).not_null())
                    .col(string_len(ContactMessage::Email, 254).not_null())
                    .col(date(ContactMessage::FechaNacimiento).not_null())
                    .col(string_len(ContactMessage::Celular, 20).not_null())
                    .col(string_len(ContactMessage::Telefono, 30).not_null())
                    .col(string_len(ContactMessage::PasswordHash, 255).not_null())
                    .col(boolean(ContactMessage::ConsentTerminos).not_null().default(false))
                    .col(ColumnDef::new(ContactMessage::Ip).string_len(45).null())
                    .col(text(ContactMessage::UserAgent).not_null())
                    .col(timestamp_with_time_zone(ContactMessage::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactMessage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactMessage { Table, Id, Nombre, Email, FechaNacimiento, Celular, Telefono, PasswordHash, ConsentTerminos, Ip, UserAgent, CreatedAt }
