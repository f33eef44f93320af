//! Forecast calculations.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::error::ForecastError;
use crate::money::fits_money_column;
use super::types::{
    ForecastInput, ForecastProject, ForecastTotals, MonthlyForecast, SalaryAllocation, YearForecast,
};

/// Forecast service. Stateless; every call works on the input it is given.
pub struct ForecastService;

impl ForecastService {
    /// Checks every input record.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an end date before its start date,
    /// a percentage outside 0-100, or an amount that is negative or outside
    /// the money range.
    pub fn validate(input: &ForecastInput) -> Result<(), ForecastError> {
        for project in &input.projects {
            check_period(project.start_date, Some(project.end_date))?;
            check_amount(project.revenue, "Project revenue")?;
            check_amount(project.cost, "Project cost")?;
        }
        for allocation in &input.allocations {
            check_period(allocation.start_date, allocation.end_date)?;
            check_amount(allocation.salary, "Salary")?;
            if allocation.percentage < Decimal::ZERO
                || allocation.percentage > Decimal::ONE_HUNDRED
            {
                return Err(ForecastError::InvalidPercentage(allocation.percentage));
            }
        }
        for overhead in &input.overheads {
            check_period(overhead.start_date, overhead.end_date)?;
            check_amount(overhead.monthly_amount, "Overhead amount")?;
        }
        Ok(())
    }

    /// Month-by-month forecast for one calendar year.
    ///
    /// # Errors
    ///
    /// Fails on invalid input (see [`ForecastService::validate`]) or a year
    /// outside the supported calendar range.
    pub fn monthly_breakdown(
        year: i32,
        input: &ForecastInput,
    ) -> Result<YearForecast, ForecastError> {
        Self::validate(input)?;
        Self::compute_year(year, input)
    }

    /// Forecasts for several years, in the order given.
    ///
    /// # Errors
    ///
    /// Same as [`ForecastService::monthly_breakdown`].
    pub fn multi_year(
        years: &[i32],
        input: &ForecastInput,
    ) -> Result<Vec<YearForecast>, ForecastError> {
        Self::validate(input)?;
        years
            .iter()
            .map(|year| Self::compute_year(*year, input))
            .collect()
    }

    fn compute_year(year: i32, input: &ForecastInput) -> Result<YearForecast, ForecastError> {
        let mut months = Vec::with_capacity(12);
        let mut totals = ForecastTotals::default();

        for month in 1..=12 {
            let (period_start, period_end) = month_bounds(year, month)?;
            let index = month_index(period_start);

            let revenue: Decimal = input
                .projects
                .iter()
                .map(|p| project_share(p, p.revenue, index))
                .sum();
            let cost: Decimal = input
                .projects
                .iter()
                .map(|p| project_share(p, p.cost, index))
                .sum();
            let salary: Decimal = input
                .allocations
                .iter()
                .filter(|a| active(a.start_date, a.end_date, index))
                .map(allocated_salary)
                .sum();
            let overhead: Decimal = input
                .overheads
                .iter()
                .filter(|o| active(o.start_date, o.end_date, index))
                .map(|o| o.monthly_amount)
                .sum();

            let forecast = MonthlyForecast {
                month,
                period_start,
                period_end,
                revenue,
                cost,
                salary,
                overhead,
                profit: revenue - cost - salary - overhead,
            };
            totals.add(&forecast);
            months.push(forecast);
        }

        Ok(YearForecast {
            year,
            months,
            totals,
        })
    }
}

/// Months since year 0, so month ranges compare as integers.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ForecastError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ForecastError::InvalidYear(year))?;
    let next = if month == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next
        .and_then(|d| d.pred_opt())
        .ok_or(ForecastError::InvalidYear(year))?;
    Ok((start, end))
}

fn active(start: NaiveDate, end: Option<NaiveDate>, index: i64) -> bool {
    month_index(start) <= index && end.is_none_or(|end| index <= month_index(end))
}

/// Even monthly share of a project total; the last month absorbs rounding.
fn project_share(project: &ForecastProject, total: Decimal, index: i64) -> Decimal {
    let first = month_index(project.start_date);
    let last = month_index(project.end_date);
    if index < first || index > last {
        return Decimal::ZERO;
    }

    let months = last - first + 1;
    let per_month = (total / Decimal::from(months)).round_dp(2);
    if index == last {
        total - per_month * Decimal::from(months - 1)
    } else {
        per_month
    }
}

fn allocated_salary(allocation: &SalaryAllocation) -> Decimal {
    (allocation.salary * allocation.percentage / Decimal::ONE_HUNDRED).round_dp(2)
}

fn check_period(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ForecastError> {
    match end {
        Some(end) if end < start => Err(ForecastError::InvalidPeriod { start, end }),
        _ => Ok(()),
    }
}

fn check_amount(amount: Decimal, what: &'static str) -> Result<(), ForecastError> {
    if amount < Decimal::ZERO {
        return Err(ForecastError::NegativeAmount(what));
    }
    if !fits_money_column(amount) {
        return Err(ForecastError::AmountOutOfRange(what));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::Overhead;
    use meridian_shared::types::ProjectId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(start: NaiveDate, end: NaiveDate, revenue: Decimal, cost: Decimal) -> ForecastProject {
        ForecastProject {
            project_id: ProjectId::new(),
            start_date: start,
            end_date: end,
            revenue,
            cost,
        }
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2024, 2).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(2025, 12).unwrap(), (date(2025, 12, 1), date(2025, 12, 31)));
    }

    #[test]
    fn test_revenue_spread_evenly() {
        let input = ForecastInput {
            projects: vec![project(date(2025, 1, 15), date(2025, 4, 10), dec!(1200), dec!(400))],
            ..ForecastInput::default()
        };

        let year = ForecastService::monthly_breakdown(2025, &input).unwrap();

        for month in &year.months[..4] {
            assert_eq!(month.revenue, dec!(300));
            assert_eq!(month.cost, dec!(100));
            assert_eq!(month.profit, dec!(200));
        }
        assert_eq!(year.months[4].revenue, Decimal::ZERO);
        assert_eq!(year.totals.revenue, dec!(1200));
        assert_eq!(year.totals.profit, dec!(800));
    }

    #[test]
    fn test_remainder_goes_to_last_month() {
        let input = ForecastInput {
            projects: vec![project(date(2025, 1, 1), date(2025, 3, 31), dec!(100), dec!(0))],
            ..ForecastInput::default()
        };

        let year = ForecastService::monthly_breakdown(2025, &input).unwrap();

        assert_eq!(year.months[0].revenue, dec!(33.33));
        assert_eq!(year.months[1].revenue, dec!(33.33));
        assert_eq!(year.months[2].revenue, dec!(33.34));
        assert_eq!(year.totals.revenue, dec!(100));
    }

    #[test]
    fn test_project_spanning_years() {
        let input = ForecastInput {
            projects: vec![project(date(2025, 11, 1), date(2026, 2, 28), dec!(4000), dec!(0))],
            ..ForecastInput::default()
        };

        let years = ForecastService::multi_year(&[2025, 2026], &input).unwrap();

        assert_eq!(years[0].totals.revenue, dec!(2000));
        assert_eq!(years[1].totals.revenue, dec!(2000));
        assert_eq!(years[1].months[1].revenue, dec!(1000));
        assert_eq!(years[1].months[2].revenue, Decimal::ZERO);
    }

    #[test]
    fn test_salary_allocation() {
        let input = ForecastInput {
            allocations: vec![
                SalaryAllocation {
                    project_id: ProjectId::new(),
                    salary: dec!(5000),
                    percentage: dec!(40),
                    start_date: date(2025, 3, 10),
                    end_date: Some(date(2025, 5, 1)),
                },
                SalaryAllocation {
                    project_id: ProjectId::new(),
                    salary: dec!(3000),
                    percentage: dec!(100),
                    start_date: date(2024, 6, 1),
                    end_date: None,
                },
            ],
            ..ForecastInput::default()
        };

        let year = ForecastService::monthly_breakdown(2025, &input).unwrap();

        assert_eq!(year.months[0].salary, dec!(3000));
        assert_eq!(year.months[2].salary, dec!(5000));
        assert_eq!(year.months[4].salary, dec!(5000));
        assert_eq!(year.months[5].salary, dec!(3000));
        assert_eq!(year.totals.salary, dec!(42000));
        assert_eq!(year.months[2].profit, dec!(-5000));
    }

    #[test]
    fn test_overheads() {
        let input = ForecastInput {
            overheads: vec![Overhead {
                description: "Office rent".into(),
                monthly_amount: dec!(1500),
                start_date: date(2025, 7, 1),
                end_date: None,
            }],
            ..ForecastInput::default()
        };

        let year = ForecastService::monthly_breakdown(2025, &input).unwrap();

        assert_eq!(year.months[5].overhead, Decimal::ZERO);
        assert_eq!(year.months[6].overhead, dec!(1500));
        assert_eq!(year.totals.overhead, dec!(9000));
        assert_eq!(year.totals.profit, dec!(-9000));
    }

    #[test]
    fn test_empty_input() {
        let year = ForecastService::monthly_breakdown(2025, &ForecastInput::default()).unwrap();
        assert_eq!(year.months.len(), 12);
        assert_eq!(year.totals, ForecastTotals::default());
    }

    #[test]
    fn test_invalid_percentage() {
        let input = ForecastInput {
            allocations: vec![SalaryAllocation {
                project_id: ProjectId::new(),
                salary: dec!(1000),
                percentage: dec!(120),
                start_date: date(2025, 1, 1),
                end_date: None,
            }],
            ..ForecastInput::default()
        };

        assert!(matches!(
            ForecastService::monthly_breakdown(2025, &input),
            Err(ForecastError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn test_end_before_start() {
        let input = ForecastInput {
            projects: vec![project(date(2025, 5, 1), date(2025, 4, 1), dec!(1), dec!(0))],
            ..ForecastInput::default()
        };

        assert!(matches!(
            ForecastService::monthly_breakdown(2025, &input),
            Err(ForecastError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_negative_amount() {
        let input = ForecastInput {
            overheads: vec![Overhead {
                description: String::new(),
                monthly_amount: dec!(-1),
                start_date: date(2025, 1, 1),
                end_date: None,
            }],
            ..ForecastInput::default()
        };

        assert!(matches!(
            ForecastService::monthly_breakdown(2025, &input),
            Err(ForecastError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_amount_out_of_range() {
        let input = ForecastInput {
            overheads: vec![
                Overhead {
                    description: String::new(),
                    monthly_amount: Decimal::MAX,
                    start_date: date(2025, 1, 1),
                    end_date: None,
                },
                Overhead {
                    description: String::new(),
                    monthly_amount: Decimal::MAX,
                    start_date: date(2025, 1, 1),
                    end_date: None,
                },
            ],
            ..ForecastInput::default()
        };

        assert!(matches!(
            ForecastService::monthly_breakdown(2025, &input),
            Err(ForecastError::AmountOutOfRange("Overhead amount"))
        ));
    }
}
