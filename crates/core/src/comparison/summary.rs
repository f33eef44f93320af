//! Lowest / middle / average price of an item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::CompanyPrices;

/// Summary statistics over the prices of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Lowest price.
    pub lowest: Option<Decimal>,
    /// Median price; mean of the two central prices for an even count.
    pub middle: Option<Decimal>,
    /// Mean price, rounded to 2 decimal places.
    pub average: Option<Decimal>,
}

impl PriceSummary {
    /// Summarizes a price map. An empty map yields all `None`.
    #[must_use]
    pub fn from_prices(prices: &CompanyPrices) -> Self {
        let mut values: Vec<Decimal> = prices.values().copied().collect();
        if values.is_empty() {
            return Self::default();
        }
        values.sort_unstable();

        let count = values.len();
        let mid = count / 2;
        let middle = if count % 2 == 0 {
            (values[mid - 1] + values[mid]) / Decimal::TWO
        } else {
            values[mid]
        };

        let sum: Decimal = values.iter().sum();
        let average = (sum / Decimal::from(count)).round_dp(2);

        Self {
            lowest: Some(values[0]),
            middle: Some(middle),
            average: Some(average),
        }
    }
}
