use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::faq_category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faq")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub question: String,
    /// Sanitized on write; safe to render as-is.
    #[sea_orm(column_type = "Text")]
    pub answer_html: String,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(faq_category::Entity)
                .from(Column::CategoryId)
                .to(faq_category::Column::Id)
                .into(),
        }
    }
}

impl Related<faq_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default)]
pub struct NewFaq {
    pub question: String,
    /// Caller is expected to have run this through the sanitizer already.
    pub answer_html: String,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub order: i32,
}

pub async fn create(db: &DatabaseConnection, input: NewFaq) -> Result<Model, ModelError> {
    if input.question.trim().is_empty() {
        return Err(ModelError::Validation("question required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        question: Set(input.question),
        answer_html: Set(input.answer_html),
        category_id: Set(input.category_id),
        is_published: Set(input.is_published),
        order: Set(input.order),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::map_write_err)
}
