//! Movie CRUD handlers.

use super::{parse_id, payload_object};
use crate::error::AppError;
use crate::models::{Movie, MoviePatch};
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
    let movies = state.store.list_movies().await?;
    let ratings = state.store.list_ratings().await?;
    Ok(Json(response::movies_with_ratings(movies, ratings)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let movie = state
        .store
        .get_movie(id)
        .await?
        .ok_or_else(|| AppError::not_found("movie"))?;
    let ratings = state.store.ratings_for_movie(id).await?;
    Ok(Json(response::movie_with_ratings(movie, ratings)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = payload_object(body)?;
    let movie = Movie::from_payload(&body)?;
    state.store.insert_movie(&movie).await?;
    Ok((
        StatusCode::CREATED,
        Json(response::movie_with_ratings(movie, Vec::new())),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let body = payload_object(body)?;
    let patch = MoviePatch::from_payload(&body)?;
    let movie = state
        .store
        .update_movie(id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("movie"))?;
    let ratings = state.store.ratings_for_movie(id).await?;
    Ok(Json(response::movie_with_ratings(movie, ratings)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id)?;
    if !state.store.remove_movie(id).await? {
        return Err(AppError::not_found("movie"));
    }
    // Ratings referencing the movie go with it.
    state.store.remove_ratings_for_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
