use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub fecha_nacimiento: Date,
    pub celular: String,
    /// Optional landline; stored as empty string when omitted.
    pub telefono: String,
    /// One-way argon2 hash, never the plaintext.
    pub password_hash: String,
    pub consent_terminos: bool,
    pub ip: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub nombre: String,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
    pub celular: String,
    pub telefono: String,
    pub password_hash: String,
    pub consent_terminos: bool,
    pub ip: Option<String>,
    pub user_agent: String,
}

pub async fn create(db: &DatabaseConnection, input: NewContactMessage) -> Result<Model, ModelError> {
    if input.password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        nombre: Set(input.nombre),
        email: Set(input.email),
        fecha_nacimiento: Set(input.fecha_nacimiento),
        celular: Set(input.celular),
        telefono: Set(input.telefono),
        password_hash: Set(input.password_hash),
        consent_terminos: Set(input.consent_terminos),
        ip: Set(input.ip),
        user_agent: Set(input.user_agent),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::map_write_err)
}

/// All submissions, newest first. Admin-only at the HTTP layer.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
