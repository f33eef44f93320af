//! Monthly financial forecast from projects, salary allocations and overheads.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ForecastError;
pub use service::ForecastService;
pub use types::{
    ForecastInput, ForecastProject, ForecastTotals, MonthlyForecast, Overhead, SalaryAllocation,
    YearForecast,
};
