//! Error types for the inventory API
//!
//! Provides unified error handling using thiserror.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::ErrorResponse;

// == Validation Errors ==
/// Field-level validation messages, keyed by field name.
///
/// Serializes as `{"name": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Shorthand for a single-field error set.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, empty if none.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `Ok(value)` when no message was recorded.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

// == Inventory Error Enum ==
/// Unified error type for the inventory API.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// An item with the submitted name already exists
    #[error("Item already exists.")]
    DuplicateItem,

    /// No item with the requested id
    #[error("Item not found.")]
    NotFound,

    /// Request fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Request body could not be parsed
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Missing or rejected bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cache backend failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for InventoryError {
    fn from(errors: ValidationErrors) -> Self {
        InventoryError::Validation(errors)
    }
}

impl From<JsonRejection> for InventoryError {
    fn from(rejection: JsonRejection) -> Self {
        InventoryError::MalformedBody(rejection.body_text())
    }
}

impl From<rusqlite::Error> for InventoryError {
    fn from(err: rusqlite::Error) -> Self {
        InventoryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            InventoryError::DuplicateItem
            | InventoryError::MalformedBody(_)
            | InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            InventoryError::NotFound => StatusCode::NOT_FOUND,
            InventoryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            InventoryError::Storage(_) | InventoryError::Cache(_) | InventoryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match self {
            InventoryError::Validation(errors) => (status, Json(errors)).into_response(),
            InventoryError::Unauthorized(msg) => (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer realm=\"api\"")],
                Json(ErrorResponse::new(msg)),
            )
                .into_response(),
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the inventory API.
pub type Result<T> = std::result::Result<T, InventoryError>;
