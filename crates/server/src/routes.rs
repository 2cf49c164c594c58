use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::admin;
use crate::state::AppState;

pub mod books;
pub mod contacto;
pub mod faq;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public listings, the rate-limited
/// contact submission, static media, and the admin-only listing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let media_path = {
        let trimmed = state.media.url_prefix.trim_end_matches('/');
        if trimmed.is_empty() { "/media".to_string() } else { trimmed.to_string() }
    };

    let public = Router::new()
        .route("/health", get(health))
        .route("/books/", get(books::list_books))
        .route("/faq/", get(faq::list_faqs))
        .route("/faq/categories/", get(faq::list_categories))
        .route(
            "/contacto/",
            post(contacto::submit)
                // Throttle runs before the body is even deserialized
                .route_layer(middleware::from_fn_with_state(state.clone(), contacto::throttle)),
        )
        .nest_service(media_path.as_str(), ServeDir::new(&state.media.root));

    let admin_routes = Router::new()
        .route("/contacto/list/", get(contacto::list_messages))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::require_admin_key));

    public
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
