//! Environment-derived settings.

/// Port the server listens on.
pub const PORT: u16 = 3000;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/movies-db";

/// Store connection string from env `MONGODB_URI`, with a local default.
pub fn mongodb_uri() -> String {
    std::env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.into())
}
