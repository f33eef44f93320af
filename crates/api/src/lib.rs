//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Mapping of domain errors to JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use meridian_core::comparison::{BudgetComparisonStore, ComparisonService};
use meridian_shared::JwtService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Budget comparison service over the configured store.
    pub comparisons: ComparisonService,
    /// JWT service for token verification.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Creates the state from a store and a JWT service.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetComparisonStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            comparisons: ComparisonService::new(store),
            jwt_service,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
