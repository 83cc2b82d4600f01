//! Server entry point: env, tracing, store connection, serve.

use movies_api::{config, routes, AppState, MongoStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("movies_api=info".parse()?))
        .init();

    let uri = config::mongodb_uri();
    let store = MongoStore::connect(&uri).await?;
    tracing::info!(uri = %uri, "connected to MongoDB");

    let state = AppState::new(Arc::new(store));
    let app = routes::app(state);

    let listener = TcpListener::bind(("0.0.0.0", config::PORT)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
