use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use serde_json::json;
use service::errors::{FieldErrors, ServiceError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited")]
    RateLimited,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Invalid(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(what) => ApiError::NotFound(what),
            ServiceError::Model(ModelError::Conflict(msg)) => ApiError::Conflict(msg),
            ServiceError::Model(ModelError::Validation(msg)) => {
                ApiError::Validation(FieldErrors::non_field(msg))
            }
            ServiceError::Db(msg)
            | ServiceError::Hash(msg)
            | ServiceError::Model(ModelError::Db(msg)) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Field-keyed map, the shape clients key their form errors on
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({"detail": msg}))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": msg}))).into_response()
            }
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"detail": "Demasiadas solicitudes. Intenta de nuevo más tarde."})),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
