use models::faq::{self, NewFaq};
use models::faq_category;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;
use crate::sanitize::clean_answer_html;
use crate::search::contains_pattern;

/// Categories ordered by (order, name).
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<faq_category::Model>, ServiceError> {
    faq_category::Entity::find()
        .order_by_asc(faq_category::Column::Order)
        .order_by_asc(faq_category::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Published FAQs with their category, ordered by (category order, entry
/// order, creation time). Optional filters: category slug, and a search
/// term matched case-insensitively against question OR answer.
pub async fn list_published(
    db: &DatabaseConnection,
    query: Option<&str>,
    category_slug: Option<&str>,
) -> Result<Vec<(faq::Model, Option<faq_category::Model>)>, ServiceError> {
    let mut select = faq::Entity::find()
        .find_also_related(faq_category::Entity)
        .filter(faq::Column::IsPublished.eq(true));
    if let Some(slug) = category_slug.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(faq_category::Column::Slug.eq(slug));
    }
    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = contains_pattern(q);
        select = select.filter(
            Condition::any()
                .add(Expr::col((faq::Entity, faq::Column::Question)).ilike(pattern.as_str()))
                .add(Expr::col((faq::Entity, faq::Column::AnswerHtml)).ilike(pattern.as_str())),
        );
    }
    select
        .order_by_asc(faq_category::Column::Order)
        .order_by_asc(faq::Column::Order)
        .order_by_asc(faq::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Insert a FAQ entry, sanitizing the rich-text answer on the way in.
pub async fn create_faq(db: &DatabaseConnection, mut input: NewFaq) -> Result<faq::Model, ServiceError> {
    input.answer_html = clean_answer_html(&input.answer_html);
    Ok(faq::create(db, input).await?)
}

pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    slug: Option<&str>,
    order: i32,
) -> Result<faq_category::Model, ServiceError> {
    Ok(faq_category::create(db, name, slug, order).await?)
}
