//! Movies API: CRUD over movies and ratings backed by MongoDB, with
//! centralized error-to-HTTP translation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{AppError, FieldErrors};
pub use models::{Movie, MoviePatch, Rating, RatingPatch};
pub use routes::app;
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, MongoStore};
