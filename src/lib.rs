pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use db::FeatureAvailability;
use middleware::auth::UserResolver;
use services::match_store::MatchStore;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub auth: Arc<dyn UserResolver>,
    pub features: FeatureAvailability,
}
