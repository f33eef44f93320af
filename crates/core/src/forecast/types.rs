//! Forecast data types.

use chrono::NaiveDate;
use meridian_shared::types::ProjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A project contributing revenue and direct cost over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastProject {
    /// Project ID.
    pub project_id: ProjectId,
    /// First day of the project.
    pub start_date: NaiveDate,
    /// Last day of the project.
    pub end_date: NaiveDate,
    /// Total revenue over the whole project.
    pub revenue: Decimal,
    /// Total direct cost over the whole project.
    #[serde(default)]
    pub cost: Decimal,
}

/// Part of an employee's salary charged while allocated to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryAllocation {
    /// Project the employee works on. Need not be among the forecast projects.
    pub project_id: ProjectId,
    /// Full monthly salary.
    pub salary: Decimal,
    /// Share of the salary charged, 0-100.
    pub percentage: Decimal,
    /// Allocation start.
    pub start_date: NaiveDate,
    /// Allocation end; open-ended if absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Recurring monthly company cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overhead {
    /// Label, e.g. "Office rent".
    #[serde(default)]
    pub description: String,
    /// Amount charged every active month.
    pub monthly_amount: Decimal,
    /// First month charged.
    pub start_date: NaiveDate,
    /// Last month charged; open-ended if absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Everything a forecast is computed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastInput {
    /// Projects.
    #[serde(default)]
    pub projects: Vec<ForecastProject>,
    /// Salary allocations.
    #[serde(default)]
    pub allocations: Vec<SalaryAllocation>,
    /// Overheads.
    #[serde(default)]
    pub overheads: Vec<Overhead>,
}

/// One month of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// Month number, 1-12.
    pub month: u32,
    /// First day of the month.
    pub period_start: NaiveDate,
    /// Last day of the month.
    pub period_end: NaiveDate,
    /// Project revenue.
    pub revenue: Decimal,
    /// Project direct cost.
    pub cost: Decimal,
    /// Allocated salaries.
    pub salary: Decimal,
    /// Overheads.
    pub overhead: Decimal,
    /// revenue - cost - salary - overhead.
    pub profit: Decimal,
}

/// Column totals over a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastTotals {
    /// Total revenue.
    pub revenue: Decimal,
    /// Total direct cost.
    pub cost: Decimal,
    /// Total salaries.
    pub salary: Decimal,
    /// Total overheads.
    pub overhead: Decimal,
    /// Total profit.
    pub profit: Decimal,
}

impl ForecastTotals {
    /// Adds one month to the totals.
    pub fn add(&mut self, month: &MonthlyForecast) {
        self.revenue += month.revenue;
        self.cost += month.cost;
        self.salary += month.salary;
        self.overhead += month.overhead;
        self.profit += month.profit;
    }
}

/// Twelve months of forecast with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearForecast {
    /// Calendar year.
    pub year: i32,
    /// January to December.
    pub months: Vec<MonthlyForecast>,
    /// Sum of every column.
    pub totals: ForecastTotals,
}
