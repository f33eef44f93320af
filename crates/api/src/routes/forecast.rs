//! Forecast routes.

use axum::{Json, Router, response::IntoResponse, routing::post};
use meridian_core::forecast::{ForecastInput, ForecastService, YearForecast};
use meridian_shared::AppError;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Most years a single request may ask for.
const MAX_YEARS: usize = 10;

/// Creates the forecast routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/forecast/monthly", post(monthly_forecast))
}

/// Request body for a monthly forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Years to forecast.
    pub years: Vec<i32>,
    /// Projects, allocations and overheads.
    #[serde(flatten)]
    pub input: ForecastInput,
}

/// Response for a monthly forecast.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    /// One entry per requested year, in request order.
    pub years: Vec<YearForecast>,
}

/// POST /forecast/monthly
async fn monthly_forecast(
    Json(request): Json<ForecastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.years.is_empty() || request.years.len() > MAX_YEARS {
        return Err(AppError::Validation(format!(
            "Between 1 and {MAX_YEARS} years must be requested"
        ))
        .into());
    }

    let years = ForecastService::multi_year(&request.years, &request.input)?;
    Ok(Json(ForecastResponse { years }))
}
