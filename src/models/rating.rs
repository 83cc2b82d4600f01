//! Rating document: field definitions and validation rules.

use super::{optional_number, required_string};
use crate::error::{AppError, FieldErrors};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Review text shorter than this is rejected.
pub const MIN_TEXT_LENGTH: usize = 10;

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// Stored shape of a rating. `movie` is a foreign key into the movies
/// collection; the response layer resolves it into the full movie object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub movie: ObjectId,
    pub text: String,
    pub score: f64,
}

impl Rating {
    /// Validate a create payload. Referential existence of `movie` is checked
    /// by the handler against the store; this only covers field policy.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut errors = FieldErrors::new();
        let movie = parse_movie_ref(body, &mut errors);
        let text = parse_text(body, &mut errors);
        let score = parse_score(body, &mut errors);

        match (movie, text, score) {
            (Some(movie), Some(text), Some(score)) if errors.is_empty() => Ok(Rating {
                id: ObjectId::new(),
                movie,
                text,
                score,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Partial update mirror of [`Rating`].
#[derive(Debug, Default, Clone, Serialize)]
pub struct RatingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RatingPatch {
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut errors = FieldErrors::new();
        let patch = RatingPatch {
            movie: body
                .contains_key("movie")
                .then(|| parse_movie_ref(body, &mut errors))
                .flatten(),
            text: body
                .contains_key("text")
                .then(|| parse_text(body, &mut errors))
                .flatten(),
            score: body
                .contains_key("score")
                .then(|| parse_score(body, &mut errors))
                .flatten(),
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.movie.is_none() && self.text.is_none() && self.score.is_none()
    }

    pub fn apply(&self, rating: &mut Rating) {
        if let Some(movie) = self.movie {
            rating.movie = movie;
        }
        if let Some(text) = &self.text {
            rating.text = text.clone();
        }
        if let Some(score) = self.score {
            rating.score = score;
        }
    }
}

fn parse_movie_ref(body: &Map<String, Value>, errors: &mut FieldErrors) -> Option<ObjectId> {
    let raw = required_string(body, "movie", errors)?;
    match ObjectId::parse_str(&raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.insert("movie".into(), "movie must be a valid id".into());
            None
        }
    }
}

fn parse_text(body: &Map<String, Value>, errors: &mut FieldErrors) -> Option<String> {
    let text = required_string(body, "text", errors)?;
    if text.chars().count() < MIN_TEXT_LENGTH {
        errors.insert(
            "text".into(),
            format!("text must be at least {} characters", MIN_TEXT_LENGTH),
        );
        return None;
    }
    Some(text)
}

fn parse_score(body: &Map<String, Value>, errors: &mut FieldErrors) -> Option<f64> {
    if !body.contains_key("score") || body.get("score") == Some(&Value::Null) {
        errors.insert("score".into(), "score is required".into());
        return None;
    }
    let score = optional_number(body, "score", errors)?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        errors.insert(
            "score".into(),
            format!("score must be between {} and {}", MIN_SCORE as i64, MAX_SCORE as i64),
        );
        return None;
    }
    Some(score)
}
