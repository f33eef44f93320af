//! Comparison item routes: add, edit, delete and price entry.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use meridian_core::comparison::{CompanyPrices, ComparisonItemChanges, NewComparisonItem};
use meridian_shared::types::{BudgetComparisonId, ComparisonItemId};
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the comparison item routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-comparisons/{id}/items", post(create_item))
        .route(
            "/budget-comparisons/{id}/items/{item_id}",
            put(update_item).delete(delete_item),
        )
        .route(
            "/budget-comparisons/{id}/items/{item_id}/prices",
            put(set_prices),
        )
}

/// Request body for replacing the prices of an item.
#[derive(Debug, Deserialize)]
pub struct SetPricesRequest {
    /// Price per company ID. Companies left out lose their price.
    pub prices: CompanyPrices,
}

/// POST /budget-comparisons/{id}/items
async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
    Json(input): Json<NewComparisonItem>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.comparisons.add_item(id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /budget-comparisons/{id}/items/{item_id}
async fn update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(BudgetComparisonId, ComparisonItemId)>,
    Json(changes): Json<ComparisonItemChanges>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.update_item(id, item_id, changes).await?))
}

/// DELETE /budget-comparisons/{id}/items/{item_id}
async fn delete_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(BudgetComparisonId, ComparisonItemId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.comparisons.delete_item(id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /budget-comparisons/{id}/items/{item_id}/prices
async fn set_prices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(BudgetComparisonId, ComparisonItemId)>,
    Json(request): Json<SetPricesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .comparisons
        .set_prices(id, item_id, request.prices)
        .await?;

    info!(
        comparison_id = %id,
        item_id = %item_id,
        companies = item.prices.len(),
        user_id = %auth.user_id(),
        "Item prices replaced"
    );
    Ok(Json(item))
}
