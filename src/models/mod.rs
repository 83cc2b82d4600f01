//! Entity documents and payload validation.

pub mod movie;
pub mod rating;

pub use movie::{Movie, MoviePatch};
pub use rating::{Rating, RatingPatch};

use crate::error::FieldErrors;
use serde_json::{Map, Value};

/// Required string field. Empty strings fail the required check, the way the
/// store's schema validation treats them.
fn required_string(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(key) {
        None | Some(Value::Null) => {
            errors.insert(key.into(), format!("{} is required", key));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.insert(key.into(), format!("{} is required", key));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.insert(key.into(), format!("{} must be a string", key));
            None
        }
    }
}

/// Required string field, stored trimmed. Whitespace-only fails the required
/// check.
fn required_trimmed(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = required_string(body, key, errors)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(key.into(), format!("{} is required", key));
        return None;
    }
    Some(trimmed.to_string())
}

/// Optional string field. Absent and null both mean "not supplied".
fn optional_string(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.insert(key.into(), format!("{} must be a string", key));
            None
        }
    }
}

fn optional_trimmed(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    optional_string(body, key, errors).map(|s| s.trim().to_string())
}

/// Optional ordered list of strings.
fn optional_string_list(
    body: &Map<String, Value>,
    key: &str,
    errors: &mut FieldErrors,
) -> Option<Vec<String>> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    _ => {
                        errors.insert(key.into(), format!("{} must be an array of strings", key));
                        return None;
                    }
                }
            }
            Some(out)
        }
        Some(_) => {
            errors.insert(key.into(), format!("{} must be an array of strings", key));
            None
        }
    }
}

fn optional_number(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<f64> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            errors.insert(key.into(), format!("{} must be a number", key));
            None
        }
    }
}
