//! Company routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use meridian_shared::types::{BudgetComparisonId, CompanyId};
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the company routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/budget-comparisons/{id}/companies",
            get(list_companies).post(create_company),
        )
        .route(
            "/budget-comparisons/{id}/companies/{company_id}",
            delete(delete_company),
        )
}

/// Request body for adding a company.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    /// Company name, unique within the comparison ignoring case.
    pub name: String,
}

/// GET /budget-comparisons/{id}/companies
async fn list_companies(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.comparisons.companies(id).await?))
}

/// POST /budget-comparisons/{id}/companies
async fn create_company(
    State(state): State<AppState>,
    Path(id): Path<BudgetComparisonId>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let company = state.comparisons.add_company(id, &request.name).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// DELETE /budget-comparisons/{id}/companies/{company_id}
async fn delete_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, company_id)): Path<(BudgetComparisonId, CompanyId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.comparisons.remove_company(id, company_id).await?;

    info!(
        comparison_id = %id,
        company_id = %company_id,
        user_id = %auth.user_id(),
        "Company removed with its prices"
    );
    Ok(StatusCode::NO_CONTENT)
}
