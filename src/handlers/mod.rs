//! Request handlers, one module per entity. Handlers translate HTTP
//! requests into store calls and shape responses; every failure propagates
//! via `?` to the centralized error mapping.

pub mod movie;
pub mod rating;

use crate::error::{AppError, FieldErrors};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};

/// A path identifier that cannot be parsed as a store key is a NotFound
/// condition, not a client error worth its own shape.
fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::MalformedId)
}

fn payload_object(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => {
            let mut errors = FieldErrors::new();
            errors.insert("body".into(), "body must be a JSON object".into());
            Err(AppError::Validation(errors))
        }
    }
}
