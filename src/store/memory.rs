//! In-memory store used by the integration test suite. Insertion order is
//! the listing order, matching a fresh collection scan.

use super::DocumentStore;
use crate::error::AppError;
use crate::models::{Movie, MoviePatch, Rating, RatingPatch};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
    ratings: Mutex<Vec<Rating>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn movies(&self) -> MutexGuard<'_, Vec<Movie>> {
        self.movies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ratings(&self) -> MutexGuard<'_, Vec<Rating>> {
        self.ratings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, AppError> {
        Ok(self.movies().clone())
    }

    async fn get_movie(&self, id: ObjectId) -> Result<Option<Movie>, AppError> {
        Ok(self.movies().iter().find(|m| m.id == id).cloned())
    }

    async fn insert_movie(&self, movie: &Movie) -> Result<(), AppError> {
        self.movies().push(movie.clone());
        Ok(())
    }

    async fn update_movie(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, AppError> {
        let mut movies = self.movies();
        let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        patch.apply(movie);
        Ok(Some(movie.clone()))
    }

    async fn remove_movie(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut movies = self.movies();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>, AppError> {
        Ok(self.ratings().clone())
    }

    async fn get_rating(&self, id: ObjectId) -> Result<Option<Rating>, AppError> {
        Ok(self.ratings().iter().find(|r| r.id == id).cloned())
    }

    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError> {
        self.ratings().push(rating.clone());
        Ok(())
    }

    async fn update_rating(&self, id: ObjectId, patch: &RatingPatch) -> Result<Option<Rating>, AppError> {
        let mut ratings = self.ratings();
        let Some(rating) = ratings.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply(rating);
        Ok(Some(rating.clone()))
    }

    async fn remove_rating(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut ratings = self.ratings();
        let before = ratings.len();
        ratings.retain(|r| r.id != id);
        Ok(ratings.len() < before)
    }

    async fn ratings_for_movie(&self, movie: ObjectId) -> Result<Vec<Rating>, AppError> {
        Ok(self.ratings().iter().filter(|r| r.movie == movie).cloned().collect())
    }

    async fn remove_ratings_for_movie(&self, movie: ObjectId) -> Result<u64, AppError> {
        let mut ratings = self.ratings();
        let before = ratings.len();
        ratings.retain(|r| r.movie != movie);
        Ok((before - ratings.len()) as u64)
    }
}
