//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name -> human-readable failure detail, collected during payload
/// validation. BTreeMap so the serialized body has a stable field order.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("Resource not found")]
    MalformedId,
    #[error("Resource already exist")]
    Conflict,
    #[error("database: {0}")]
    Db(mongodb::error::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }
}

/// Duplicate-key conflicts are routed to `Conflict`; every other driver error
/// stays opaque and surfaces as a 500.
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            AppError::Conflict
        } else {
            AppError::Db(err)
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    const DUPLICATE_KEY: i32 = 11000;
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// The single classification point: every error raised during request
/// handling is mapped to a status code and a JSON body here and nowhere else.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(json!(fields))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            AppError::MalformedId => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Resource not found" })),
            )
                .into_response(),
            AppError::Conflict => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Resource already exist" })),
            )
                .into_response(),
            AppError::Db(err) => {
                tracing::error!(error = %err, "unhandled store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
