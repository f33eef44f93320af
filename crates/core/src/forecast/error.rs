//! Forecast error types.

use chrono::NaiveDate;
use meridian_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Forecast input errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// End date before start date.
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidPeriod {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Allocation percentage outside 0-100.
    #[error("Allocation percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(Decimal),

    /// A money amount below zero.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// A money amount too large or too precise to handle.
    #[error("{0} must be below 10^15 with at most 4 decimal places")]
    AmountOutOfRange(&'static str),

    /// Year outside the supported calendar range.
    #[error("Unsupported forecast year: {0}")]
    InvalidYear(i32),
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        Self::Validation(err.to_string())
    }
}
