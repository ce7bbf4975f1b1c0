//! Route definitions for the group matching API.

pub mod health;
pub mod matches;
pub mod teams;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let api_routes = Router::new()
        .route("/matches/stats", get(matches::stats))
        .route("/teams/summary", get(teams::summary));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
