//! Movie document: field definitions and validation rules.

use super::{optional_string_list, optional_trimmed, required_string, required_trimmed};
use crate::error::{AppError, FieldErrors};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored shape of a movie. The identifier lives under `_id` in the store and
/// is re-exposed as a public `id` string by the response layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub year: String,
    pub director: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
}

impl Movie {
    /// Validate a create payload. All field failures are collected so the
    /// 400 body names every offending field at once.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut errors = FieldErrors::new();
        let title = required_trimmed(body, "title", &mut errors);
        let year = required_string(body, "year", &mut errors);
        let director = required_trimmed(body, "director", &mut errors);
        let duration = optional_trimmed(body, "duration", &mut errors);
        let genre = optional_string_list(body, "genre", &mut errors);
        let rate = optional_trimmed(body, "rate", &mut errors);

        match (title, year, director) {
            (Some(title), Some(year), Some(director)) if errors.is_empty() => Ok(Movie {
                id: ObjectId::new(),
                title,
                year,
                director,
                duration,
                genre,
                rate,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Partial update: only supplied fields are touched, and only those are
/// re-validated.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
}

impl MoviePatch {
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, AppError> {
        let mut errors = FieldErrors::new();
        let patch = MoviePatch {
            title: body
                .contains_key("title")
                .then(|| required_trimmed(body, "title", &mut errors))
                .flatten(),
            year: body
                .contains_key("year")
                .then(|| required_string(body, "year", &mut errors))
                .flatten(),
            director: body
                .contains_key("director")
                .then(|| required_trimmed(body, "director", &mut errors))
                .flatten(),
            duration: optional_trimmed(body, "duration", &mut errors),
            genre: optional_string_list(body, "genre", &mut errors),
            rate: optional_trimmed(body, "rate", &mut errors),
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.director.is_none()
            && self.duration.is_none()
            && self.genre.is_none()
            && self.rate.is_none()
    }

    /// In-place application, used by the in-memory store.
    pub fn apply(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(year) = &self.year {
            movie.year = year.clone();
        }
        if let Some(director) = &self.director {
            movie.director = director.clone();
        }
        if let Some(duration) = &self.duration {
            movie.duration = Some(duration.clone());
        }
        if let Some(genre) = &self.genre {
            movie.genre = Some(genre.clone());
        }
        if let Some(rate) = &self.rate {
            movie.rate = Some(rate.clone());
        }
    }
}
