//! Per-item, per-company price grid of one comparison.

use std::collections::{BTreeMap, BTreeSet};

use meridian_shared::types::{CompanyId, ComparisonItemId};
use rust_decimal::Decimal;

use super::error::ComparisonError;
use crate::money::fits_money_column;
use super::types::{BudgetComparisonItem, Company, CompanyPrices};

/// Editable price grid built from a snapshot of items and companies.
///
/// Enforces the pricing rules: only leaves carry prices, only companies of
/// the comparison can be priced, and prices are never negative nor beyond
/// the stored money range.
#[derive(Debug, Clone, Default)]
pub struct PriceMatrix {
    companies: BTreeSet<CompanyId>,
    categories: BTreeSet<ComparisonItemId>,
    rows: BTreeMap<ComparisonItemId, CompanyPrices>,
}

impl PriceMatrix {
    /// Builds the matrix from stored items and companies.
    #[must_use]
    pub fn new(companies: &[Company], items: &[BudgetComparisonItem]) -> Self {
        let mut matrix = Self {
            companies: companies.iter().map(|c| c.id).collect(),
            ..Self::default()
        };

        for item in items {
            if item.is_category {
                matrix.categories.insert(item.id);
            } else {
                matrix.rows.insert(item.id, item.prices.clone());
            }
        }

        matrix
    }

    /// Price of one cell.
    #[must_use]
    pub fn price(&self, item_id: ComparisonItemId, company_id: CompanyId) -> Option<Decimal> {
        self.rows.get(&item_id)?.get(&company_id).copied()
    }

    /// Prices of one leaf.
    #[must_use]
    pub fn row(&self, item_id: ComparisonItemId) -> Option<&CompanyPrices> {
        self.rows.get(&item_id)
    }

    /// Companies with a price on the item.
    #[must_use]
    pub fn companies_priced(&self, item_id: ComparisonItemId) -> Vec<CompanyId> {
        self.rows
            .get(&item_id)
            .map(|row| row.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Sets one cell.
    ///
    /// # Errors
    ///
    /// Fails for categories, unknown items or companies, and prices that are
    /// negative or out of the money range.
    pub fn set_price(
        &mut self,
        item_id: ComparisonItemId,
        company_id: CompanyId,
        price: Decimal,
    ) -> Result<(), ComparisonError> {
        self.check_cell(item_id, company_id, price)?;
        self.rows
            .entry(item_id)
            .or_default()
            .insert(company_id, price);
        Ok(())
    }

    /// Replaces all prices of a leaf. Nothing changes if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Same as [`PriceMatrix::set_price`], for the first invalid entry.
    pub fn replace_row(
        &mut self,
        item_id: ComparisonItemId,
        prices: CompanyPrices,
    ) -> Result<(), ComparisonError> {
        if prices.is_empty() {
            self.check_item(item_id)?;
        }
        for (company_id, price) in &prices {
            self.check_cell(item_id, *company_id, *price)?;
        }
        self.rows.insert(item_id, prices);
        Ok(())
    }

    /// Clears one cell, returning the old price.
    pub fn clear_price(
        &mut self,
        item_id: ComparisonItemId,
        company_id: CompanyId,
    ) -> Option<Decimal> {
        self.rows.get_mut(&item_id)?.remove(&company_id)
    }

    /// Drops a company from the grid and returns the items that lost a price.
    pub fn remove_company(&mut self, company_id: CompanyId) -> Vec<ComparisonItemId> {
        self.companies.remove(&company_id);
        self.rows
            .iter_mut()
            .filter_map(|(item_id, row)| row.remove(&company_id).map(|_| *item_id))
            .collect()
    }

    fn check_item(&self, item_id: ComparisonItemId) -> Result<(), ComparisonError> {
        if self.categories.contains(&item_id) {
            return Err(ComparisonError::CategoryPrice(item_id));
        }
        if !self.rows.contains_key(&item_id) {
            return Err(ComparisonError::ItemNotFound(item_id));
        }
        Ok(())
    }

    fn check_cell(
        &self,
        item_id: ComparisonItemId,
        company_id: CompanyId,
        price: Decimal,
    ) -> Result<(), ComparisonError> {
        self.check_item(item_id)?;
        if !self.companies.contains(&company_id) {
            return Err(ComparisonError::UnknownCompany(company_id));
        }
        if price < Decimal::ZERO {
            return Err(ComparisonError::NegativePrice(company_id));
        }
        if !fits_money_column(price) {
            return Err(ComparisonError::PriceOutOfRange(company_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_shared::types::BudgetComparisonId;
    use rust_decimal_macros::dec;

    struct Fixture {
        matrix: PriceMatrix,
        acme: CompanyId,
        globex: CompanyId,
        category: ComparisonItemId,
        cement: ComparisonItemId,
        steel: ComparisonItemId,
    }

    fn fixture() -> Fixture {
        let comparison_id = BudgetComparisonId::new();
        let acme = Company {
            id: CompanyId::new(),
            comparison_id,
            name: "Acme".into(),
        };
        let globex = Company {
            id: CompanyId::new(),
            comparison_id,
            name: "Globex".into(),
        };
        let category = BudgetComparisonItem::new(comparison_id, "1", "Structure", true);
        let cement = BudgetComparisonItem::new(comparison_id, "1.1", "Cement", false)
            .with_prices([(acme.id, dec!(100)), (globex.id, dec!(90))]);
        let steel = BudgetComparisonItem::new(comparison_id, "1.2", "Steel", false)
            .with_prices([(acme.id, dec!(300))]);

        Fixture {
            matrix: PriceMatrix::new(
                &[acme.clone(), globex.clone()],
                &[category.clone(), cement.clone(), steel.clone()],
            ),
            acme: acme.id,
            globex: globex.id,
            category: category.id,
            cement: cement.id,
            steel: steel.id,
        }
    }

    #[test]
    fn test_price_lookup() {
        let f = fixture();
        assert_eq!(f.matrix.price(f.cement, f.globex), Some(dec!(90)));
        assert_eq!(f.matrix.price(f.steel, f.globex), None);
        assert_eq!(f.matrix.companies_priced(f.steel), vec![f.acme]);
    }

    #[test]
    fn test_set_and_clear_price() {
        let mut f = fixture();
        f.matrix.set_price(f.steel, f.globex, dec!(280)).unwrap();
        assert_eq!(f.matrix.price(f.steel, f.globex), Some(dec!(280)));

        assert_eq!(f.matrix.clear_price(f.steel, f.globex), Some(dec!(280)));
        assert_eq!(f.matrix.price(f.steel, f.globex), None);
    }

    #[test]
    fn test_category_cannot_be_priced() {
        let mut f = fixture();
        let result = f.matrix.set_price(f.category, f.acme, dec!(1));
        assert!(matches!(result, Err(ComparisonError::CategoryPrice(id)) if id == f.category));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut f = fixture();
        let result = f.matrix.set_price(f.cement, f.acme, dec!(-1));
        assert!(matches!(result, Err(ComparisonError::NegativePrice(_))));
        assert!(f.matrix.set_price(f.cement, f.acme, dec!(0)).is_ok());
    }

    #[test]
    fn test_price_out_of_range_rejected() {
        let mut f = fixture();
        for price in [Decimal::MAX, dec!(1000000000000000), dec!(1.00001)] {
            let result = f.matrix.set_price(f.cement, f.acme, price);
            assert!(matches!(result, Err(ComparisonError::PriceOutOfRange(id)) if id == f.acme));
        }
        assert_eq!(f.matrix.price(f.cement, f.acme), Some(dec!(100)));

        f.matrix
            .set_price(f.cement, f.acme, dec!(999999999999999.9999))
            .unwrap();
    }

    #[test]
    fn test_unknown_company_rejected() {
        let mut f = fixture();
        let stranger = CompanyId::new();
        let result = f.matrix.set_price(f.cement, stranger, dec!(1));
        assert!(matches!(result, Err(ComparisonError::UnknownCompany(id)) if id == stranger));
    }

    #[test]
    fn test_replace_row_is_all_or_nothing() {
        let mut f = fixture();
        let prices: CompanyPrices = [(f.acme, dec!(5)), (f.globex, dec!(-5))].into_iter().collect();

        assert!(f.matrix.replace_row(f.cement, prices).is_err());
        assert_eq!(f.matrix.price(f.cement, f.acme), Some(dec!(100)));

        f.matrix.replace_row(f.cement, CompanyPrices::new()).unwrap();
        assert!(f.matrix.row(f.cement).is_some_and(CompanyPrices::is_empty));
    }

    #[test]
    fn test_remove_company() {
        let mut f = fixture();
        let affected = f.matrix.remove_company(f.globex);

        assert_eq!(affected, vec![f.cement]);
        assert_eq!(f.matrix.price(f.cement, f.globex), None);
        assert_eq!(f.matrix.price(f.cement, f.acme), Some(dec!(100)));
        assert!(matches!(
            f.matrix.set_price(f.cement, f.globex, dec!(1)),
            Err(ComparisonError::UnknownCompany(_))
        ));
    }
}
