use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::faq;
use crate::text::derive_slug;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faq_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Faq,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Faq => Entity::has_many(faq::Entity).into(),
        }
    }
}

impl Related<faq::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faq.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a category; name and derived slug are both unique.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    slug: Option<&str>,
    order: i32,
) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    let slug = derive_slug(slug, name);
    if slug.is_empty() {
        return Err(ModelError::Validation("slug must not be empty after derivation".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        slug: Set(slug),
        order: Set(order),
    };
    am.insert(db).await.map_err(errors::map_write_err)
}
