//! Rating CRUD handlers. Reads resolve the `movie` reference into the full
//! movie object; creation requires the referenced movie to exist.

use super::{parse_id, payload_object};
use crate::error::AppError;
use crate::models::{Rating, RatingPatch};
use crate::response;
use crate::state::AppState;
use crate::store::DocumentStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let ratings = state.store.list_ratings().await?;
    let movies = state.store.list_movies().await?;
    Ok(Json(response::ratings_populated(ratings, movies)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let rating = state
        .store
        .get_rating(id)
        .await?
        .ok_or_else(|| AppError::not_found("rating"))?;
    let movie = state.store.get_movie(rating.movie).await?;
    Ok(Json(response::rating_populated(rating, movie)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = payload_object(body)?;
    let rating = Rating::from_payload(&body)?;
    let movie = state
        .store
        .get_movie(rating.movie)
        .await?
        .ok_or_else(|| AppError::not_found("movie"))?;
    state.store.insert_rating(&rating).await?;
    Ok((
        StatusCode::CREATED,
        Json(response::rating_populated(rating, Some(movie))),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let body = payload_object(body)?;
    let patch = RatingPatch::from_payload(&body)?;
    if let Some(movie) = patch.movie {
        state
            .store
            .get_movie(movie)
            .await?
            .ok_or_else(|| AppError::not_found("movie"))?;
    }
    let rating = state
        .store
        .update_rating(id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("rating"))?;
    let movie = state.store.get_movie(rating.movie).await?;
    Ok(Json(response::rating_populated(rating, movie)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    if !state.store.remove_rating(id).await? {
        return Err(AppError::not_found("rating"));
    }
    Ok(StatusCode::NO_CONTENT)
}
