use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{faq, faq_category};
use service::faq_service;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FaqQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FaqCategoryOut {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub order: i32,
}

#[derive(Debug, Serialize)]
pub struct FaqOut {
    pub id: Uuid,
    pub question: String,
    pub answer_html: String,
    pub category: Option<FaqCategoryOut>,
    pub order: i32,
}

fn category_out(m: faq_category::Model) -> FaqCategoryOut {
    FaqCategoryOut { id: m.id, name: m.name, slug: m.slug, order: m.order }
}

fn to_out(entry: faq::Model, category: Option<faq_category::Model>) -> FaqOut {
    FaqOut {
        id: entry.id,
        question: entry.question,
        answer_html: entry.answer_html,
        category: category.map(category_out),
        order: entry.order,
    }
}

/// GET /faq/?q=palabra&category=slug returns published entries, ordered.
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(params): Query<FaqQuery>,
) -> Result<Json<Vec<FaqOut>>, ApiError> {
    let rows =
        faq_service::list_published(&state.db, params.q.as_deref(), params.category.as_deref())
            .await?;
    Ok(Json(rows.into_iter().map(|(entry, cat)| to_out(entry, cat)).collect()))
}

/// GET /faq/categories/
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<FaqCategoryOut>>, ApiError> {
    let rows = faq_service::list_categories(&state.db).await?;
    Ok(Json(rows.into_iter().map(category_out).collect()))
}
