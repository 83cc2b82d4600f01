//! CRUD execution against MongoDB via typed collections.

use super::DocumentStore;
use crate::error::AppError;
use crate::models::{Movie, MoviePatch, Rating, RatingPatch};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::Serialize;

const MOVIES: &str = "movies";
const RATINGS: &str = "ratings";

/// Database name used when the connection string has no path component.
const DEFAULT_DATABASE: &str = "movies-db";

pub struct MongoStore {
    movies: Collection<Movie>,
    ratings: Collection<Rating>,
}

impl MongoStore {
    /// Connect with a MongoDB connection string. The database name comes from
    /// the URI path, falling back to `movies-db`.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Ok(Self::with_database(&database))
    }

    pub fn with_database(database: &Database) -> Self {
        MongoStore {
            movies: database.collection(MOVIES),
            ratings: database.collection(RATINGS),
        }
    }
}

/// `$set` document for a patch. Untouched fields are skipped during
/// serialization, so only supplied fields reach the store.
fn set_document<P: Serialize>(patch: &P) -> Result<Document, AppError> {
    let fields = to_document(patch).map_err(mongodb::error::Error::from)?;
    Ok(doc! { "$set": fields })
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, AppError> {
        let cursor = self.movies.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_movie(&self, id: ObjectId) -> Result<Option<Movie>, AppError> {
        Ok(self.movies.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_movie(&self, movie: &Movie) -> Result<(), AppError> {
        self.movies.insert_one(movie).await?;
        Ok(())
    }

    async fn update_movie(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, AppError> {
        if patch.is_empty() {
            return self.get_movie(id).await;
        }
        let updated = self
            .movies
            .find_one_and_update(doc! { "_id": id }, set_document(patch)?)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn remove_movie(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.movies.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>, AppError> {
        let cursor = self.ratings.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_rating(&self, id: ObjectId) -> Result<Option<Rating>, AppError> {
        Ok(self.ratings.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError> {
        self.ratings.insert_one(rating).await?;
        Ok(())
    }

    async fn update_rating(&self, id: ObjectId, patch: &RatingPatch) -> Result<Option<Rating>, AppError> {
        if patch.is_empty() {
            return self.get_rating(id).await;
        }
        let updated = self
            .ratings
            .find_one_and_update(doc! { "_id": id }, set_document(patch)?)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn remove_rating(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.ratings.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ratings_for_movie(&self, movie: ObjectId) -> Result<Vec<Rating>, AppError> {
        let cursor = self.ratings.find(doc! { "movie": movie }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn remove_ratings_for_movie(&self, movie: ObjectId) -> Result<u64, AppError> {
        let result = self.ratings.delete_many(doc! { "movie": movie }).await?;
        Ok(result.deleted_count)
    }
}
