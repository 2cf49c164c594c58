use models::book::{self, NewBook};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;
use crate::search::contains_pattern;

/// Published books ordered by (order, title). With a query term, a book is
/// included when the term appears (case-insensitively) in its title, summary
/// or description. One OR filter over a single table, so a book matching
/// several fields still appears once.
pub async fn list_published(
    db: &DatabaseConnection,
    query: Option<&str>,
) -> Result<Vec<book::Model>, ServiceError> {
    let mut select = book::Entity::find().filter(book::Column::IsPublished.eq(true));
    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = contains_pattern(q);
        select = select.filter(
            Condition::any()
                .add(Expr::col((book::Entity, book::Column::Title)).ilike(pattern.as_str()))
                .add(Expr::col((book::Entity, book::Column::Summary)).ilike(pattern.as_str()))
                .add(Expr::col((book::Entity, book::Column::DescriptionHtml)).ilike(pattern.as_str())),
        );
    }
    select
        .order_by_asc(book::Column::Order)
        .order_by_asc(book::Column::Title)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create_book(db: &DatabaseConnection, input: NewBook) -> Result<book::Model, ServiceError> {
    Ok(book::create(db, input).await?)
}
