//! Budget comparison routes: metadata, grid and category totals.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use meridian_core::comparison::{BudgetComparisonChanges, NewBudgetComparison};
use meridian_shared::types::{BudgetComparisonId, PageRequest, PageResponse};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the budget comparison routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/budget-comparisons",
            get(list_comparisons).post(create_comparison),
        )
        .route(
            "/budget-comparisons/{id}",
            get(get_comparison)
                .put(update_comparison)
                .delete(delete_comparison),
        )
        .route("/budget-comparisons/{id}/grid", get(get_grid))
        .route(
            "/budget-comparisons/{id}/category-totals",
            get(get_category_totals),
        )
}

/// GET /budget-comparisons
async fn list_comparisons(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.normalized();
    let (data, total) = state.comparisons.list(page).await?;
    Ok(Json(PageResponse::new(data, page, total)))
}

/// POST /budget-comparisons
async fn create_comparison(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<NewBudgetComparison>,
) -> Result<impl IntoResponse, ApiError> {
    let comparison = state.comparisons.create(input).await?;

    info!(
        comparison_id = %comparison.id,
        user_id = %auth.user_id(),
        "Budget comparison created"
    );
    Ok((StatusCode::CREATED, Json(comparison)))
}

/// GET /budget-comparisons/{id}
async fn get_comparison(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.get(id).await?))
}

/// PUT /budget-comparisons/{id}
async fn update_comparison(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
    Json(changes): Json<BudgetComparisonChanges>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.update(id, changes).await?))
}

/// DELETE /budget-comparisons/{id}
async fn delete_comparison(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BudgetComparisonId>,
) -> Result<impl IntoResponse, ApiError> {
    state.comparisons.delete(id).await?;

    info!(comparison_id = %id, user_id = %auth.user_id(), "Budget comparison deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /budget-comparisons/{id}/grid
async fn get_grid(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.grid(id).await?))
}

/// GET /budget-comparisons/{id}/category-totals
async fn get_category_totals(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.category_totals(id).await?))
}
