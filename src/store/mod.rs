//! Document store seam: CRUD plus the foreign-key lookups the read-time
//! joins need. Handlers are written against this trait, not the driver.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::AppError;
use crate::models::{Movie, MoviePatch, Rating, RatingPatch};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, AppError>;
    async fn get_movie(&self, id: ObjectId) -> Result<Option<Movie>, AppError>;
    async fn insert_movie(&self, movie: &Movie) -> Result<(), AppError>;
    /// Applies the touched fields and returns the updated document, or `None`
    /// when the id does not exist.
    async fn update_movie(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, AppError>;
    /// Returns whether a document was removed.
    async fn remove_movie(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn list_ratings(&self) -> Result<Vec<Rating>, AppError>;
    async fn get_rating(&self, id: ObjectId) -> Result<Option<Rating>, AppError>;
    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError>;
    async fn update_rating(&self, id: ObjectId, patch: &RatingPatch) -> Result<Option<Rating>, AppError>;
    async fn remove_rating(&self, id: ObjectId) -> Result<bool, AppError>;

    /// All ratings whose `movie` field equals the given movie id.
    async fn ratings_for_movie(&self, movie: ObjectId) -> Result<Vec<Rating>, AppError>;
    /// Cascade support: removes every rating that references the movie.
    async fn remove_ratings_for_movie(&self, movie: ObjectId) -> Result<u64, AppError>;
}
