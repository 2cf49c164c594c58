use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("uniqueness conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Map an insert/update failure, surfacing unique-key violations as
/// `Conflict` so callers can answer with a 409 instead of a 500.
pub fn map_write_err(e: DbErr) -> ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
        _ => ModelError::Db(e.to_string()),
    }
}
