use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use models::contact_message;
use service::contact::{self, ClientMeta, ContactForm};

use crate::errors::ApiError;
use crate::state::AppState;

/// Client identity for throttling and audit: first X-Forwarded-For hop if
/// present, else the socket peer address.
fn client_ip(headers: &HeaderMap, peer: Option<&SocketAddr>) -> Option<String> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = xff.split(',').next().map(str::trim).filter(|s| !s.is_empty()) {
            return Some(first.to_string());
        }
    }
    peer.map(|a| a.ip().to_string())
}

/// Throttle for POST /contacto/, applied before the body is deserialized or
/// any validation runs.
pub async fn throttle(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = req.extensions().get::<ConnectInfo<SocketAddr>>().map(|c| c.0);
    let key = client_ip(req.headers(), peer.as_ref()).unwrap_or_else(|| "unknown".to_string());
    if !state.contact_limiter.check(&key) {
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(req).await)
}

/// POST /contacto/ is the public submission endpoint.
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let meta = ClientMeta {
        ip: client_ip(&headers, Some(&peer)),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    };
    contact::submit(&state.db, &state.captcha, form, meta).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"ok": true, "message": contact::service::SUCCESS_MESSAGE})),
    ))
}

/// Admin projection: everything except the password hash.
#[derive(Debug, Serialize)]
pub struct ContactMessageOut {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
    pub celular: String,
    pub telefono: String,
    pub consent_terminos: bool,
    pub ip: Option<String>,
    pub user_agent: String,
    pub created_at: DateTime<FixedOffset>,
}

fn to_out(m: contact_message::Model) -> ContactMessageOut {
    ContactMessageOut {
        id: m.id,
        nombre: m.nombre,
        email: m.email,
        fecha_nacimiento: m.fecha_nacimiento,
        celular: m.celular,
        telefono: m.telefono,
        consent_terminos: m.consent_terminos,
        ip: m.ip,
        user_agent: m.user_agent,
        created_at: m.created_at,
    }
}

/// GET /contacto/list/ is admin only and returns newest first.
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessageOut>>, ApiError> {
    let rows = contact::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(to_out).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        let peer: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(&peer)).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(&peer)).as_deref(), Some("127.0.0.1"));
        assert_eq!(client_ip(&headers, None), None);
    }
}
