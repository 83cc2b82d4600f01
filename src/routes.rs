//! Method + path -> handler registration.

use crate::error::AppError;
use crate::handlers::{movie, rating};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Full application router: entity routes, request tracing, and a fallback
/// that pushes unmatched routes through the same error mapping as everything
/// else.
pub fn app(state: AppState) -> Router {
    // Method routers get their own fallback so an unregistered method on a
    // known path yields the same 404 shape as an unknown path.
    Router::new()
        .route(
            "/movies",
            get(movie::list).post(movie::create).fallback(route_not_found),
        )
        .route(
            "/movies/:id",
            get(movie::detail)
                .patch(movie::update)
                .delete(movie::remove)
                .fallback(route_not_found),
        )
        .route(
            "/ratings",
            get(rating::list).post(rating::create).fallback(route_not_found),
        )
        .route(
            "/ratings/:id",
            get(rating::detail)
                .patch(rating::update)
                .delete(rating::remove)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
