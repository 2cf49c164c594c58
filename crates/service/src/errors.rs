use std::collections::BTreeMap;

use models::errors::ModelError;
use serde::Serialize;
use thiserror::Error;

/// Per-field validation messages, serialized as `{"field": ["msg", ...]}`.
/// Cross-field rejections use the `non_field_errors` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single("non_field_errors", message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Invalid(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("password hash error: {0}")]
    Hash(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}
