//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod budget_comparisons;
pub mod companies;
pub mod comparison_items;
pub mod forecast;
pub mod health;

/// Creates the API router; everything but health checks requires a token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(budget_comparisons::routes())
        .merge(comparison_items::routes())
        .merge(companies::routes())
        .merge(forecast::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
