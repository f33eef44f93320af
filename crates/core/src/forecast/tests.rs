//! Property-based tests for the forecast.

use chrono::{Months, NaiveDate};
use meridian_shared::types::ProjectId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ForecastService;
use super::types::{ForecastInput, ForecastProject, SalaryAllocation};

fn start_date(offset_months: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.checked_add_months(Months::new(offset_months)))
        .unwrap()
}

proptest! {
    /// Spreading never loses or creates money: the covered years add up to the total.
    #[test]
    fn test_project_totals_preserved(
        cents in 0i64..100_000_000,
        start in 0u32..12,
        length in 1u32..36,
    ) {
        let revenue = Decimal::new(cents, 2);
        let start_date = start_date(start);
        let end_date = start_date.checked_add_months(Months::new(length - 1)).unwrap();
        let input = ForecastInput {
            projects: vec![ForecastProject {
                project_id: ProjectId::new(),
                start_date,
                end_date,
                revenue,
                cost: Decimal::ZERO,
            }],
            ..ForecastInput::default()
        };

        let years = ForecastService::multi_year(&[2024, 2025, 2026, 2027], &input).unwrap();
        let total: Decimal = years.iter().map(|y| y.totals.revenue).sum();

        prop_assert_eq!(total, revenue);
    }

    /// Every month satisfies profit = revenue - cost - salary - overhead.
    #[test]
    fn test_profit_identity(
        revenue in 0i64..10_000_000,
        cost in 0i64..10_000_000,
        salary in 0i64..1_000_000,
        percentage in 0u32..=100,
    ) {
        let input = ForecastInput {
            projects: vec![ForecastProject {
                project_id: ProjectId::new(),
                start_date: start_date(0),
                end_date: start_date(6),
                revenue: Decimal::new(revenue, 2),
                cost: Decimal::new(cost, 2),
            }],
            allocations: vec![SalaryAllocation {
                project_id: ProjectId::new(),
                salary: Decimal::new(salary, 2),
                percentage: Decimal::from(percentage),
                start_date: start_date(3),
                end_date: None,
            }],
            overheads: vec![],
        };

        let year = ForecastService::monthly_breakdown(2024, &input).unwrap();
        for month in &year.months {
            prop_assert_eq!(
                month.profit,
                month.revenue - month.cost - month.salary - month.overhead
            );
        }
        prop_assert_eq!(
            year.totals.profit,
            year.totals.revenue - year.totals.cost - year.totals.salary - year.totals.overhead
        );
    }
}
