use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::state::AppState;

/// Middleware: admin routes require the configured key in `X-API-Key`.
/// Without a configured key every admin request is rejected.
pub async fn require_admin_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = req.headers().get("x-api-key").and_then(|v| v.to_str().ok());
    match (state.admin_api_key.as_deref(), presented) {
        (Some(expected), Some(got)) if got == expected => Ok(next.run(req).await),
        (None, _) => {
            warn!(path = %req.uri().path(), "admin request rejected: admin_api_key not configured");
            Err(StatusCode::UNAUTHORIZED)
        }
        _ => {
            warn!(path = %req.uri().path(), "admin request rejected: bad or missing X-API-Key");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
