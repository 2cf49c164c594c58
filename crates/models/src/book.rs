use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::text::derive_slug;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub description_html: String,
    /// Relative media path, e.g. `books/portada.jpg`.
    pub image: Option<String>,
    pub image_alt: String,
    /// Comma-separated tags.
    pub keywords: String,
    pub detail_url: String,
    pub is_published: bool,
    pub order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when an administrator creates a book.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub slug: Option<String>,
    pub summary: String,
    pub description_html: String,
    pub image: Option<String>,
    pub image_alt: String,
    pub keywords: String,
    pub detail_url: String,
    pub is_published: bool,
    pub order: i32,
}

/// Insert a book, deriving the slug from the title when absent. The unique
/// index on `slug` makes a duplicate surface as `ModelError::Conflict`.
pub async fn create(db: &DatabaseConnection, input: NewBook) -> Result<Model, ModelError> {
    if input.title.trim().is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    let slug = derive_slug(input.slug.as_deref(), &input.title);
    if slug.is_empty() {
        return Err(ModelError::Validation("slug must not be empty after derivation".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        slug: Set(slug),
        summary: Set(input.summary),
        description_html: Set(input.description_html),
        image: Set(input.image),
        image_alt: Set(input.image_alt),
        keywords: Set(input.keywords),
        detail_url: Set(input.detail_url),
        is_published: Set(input.is_published),
        order: Set(input.order),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::map_write_err)
}
