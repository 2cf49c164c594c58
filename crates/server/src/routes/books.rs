use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::book;
use service::book_service;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    pub q: Option<String>,
}

/// Public projection: the raw image path stays internal, clients get a
/// resolved URL.
#[derive(Debug, Serialize)]
pub struct BookOut {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description_html: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub keywords: String,
    pub detail_url: String,
    pub order: i32,
}

/// Base URL of the incoming request, from Host plus the forwarded scheme.
fn request_base_url(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok())?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    Some(format!("{scheme}://{host}"))
}

/// Absolute media URL when a request base is known, relative otherwise.
fn media_url(base: Option<&str>, prefix: &str, relative: &str) -> String {
    match base {
        Some(b) => format!("{b}{prefix}{relative}"),
        None => format!("{prefix}{relative}"),
    }
}

fn to_out(m: book::Model, base: Option<&str>, prefix: &str) -> BookOut {
    let image_url = m.image.as_deref().map(|rel| media_url(base, prefix, rel));
    BookOut {
        id: m.id,
        title: m.title,
        slug: m.slug,
        summary: m.summary,
        description_html: m.description_html,
        image_url,
        image_alt: m.image_alt,
        keywords: m.keywords,
        detail_url: m.detail_url,
        order: m.order,
    }
}

/// GET /books/?q=palabra returns published books only, ordered, with optional search.
pub async fn list_books(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BookQuery>,
) -> Result<Json<Vec<BookOut>>, ApiError> {
    let rows = book_service::list_published(&state.db, params.q.as_deref()).await?;
    let base = request_base_url(&headers);
    Ok(Json(
        rows.into_iter()
            .map(|m| to_out(m, base.as_deref(), &state.media.url_prefix))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn base_url_uses_host_and_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));
        assert_eq!(request_base_url(&headers).as_deref(), Some("http://example.com"));

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(request_base_url(&headers).as_deref(), Some("https://example.com"));
    }

    #[test]
    fn media_url_is_absolute_with_base_and_relative_without() {
        assert_eq!(
            media_url(Some("https://example.com"), "/media/", "books/portada.jpg"),
            "https://example.com/media/books/portada.jpg"
        );
        assert_eq!(media_url(None, "/media/", "books/portada.jpg"), "/media/books/portada.jpg");
    }
}
