//! Category roll-up totals.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use meridian_shared::types::ComparisonItemId;
use rust_decimal::Decimal;

use super::code::parent_code;
use super::types::{BudgetComparisonItem, CategoryTotals, CompanyPrices};

/// Computes category totals from an item list.
pub struct CategoryAggregator;

impl CategoryAggregator {
    /// Sums, for every category, the prices of its direct children per company.
    ///
    /// Every category in `items` gets an entry, empty if nothing rolls up into
    /// it. Leaves whose parent code matches no category are skipped silently.
    /// One pass over the items, grouped by parent code; equivalent to checking
    /// `is_direct_child_of` for every (leaf, category) pair.
    #[must_use]
    pub fn category_totals(items: &[BudgetComparisonItem]) -> CategoryTotals {
        let mut totals: BTreeMap<ComparisonItemId, CompanyPrices> = BTreeMap::new();
        let mut categories_by_code: HashMap<&str, Vec<ComparisonItemId>> = HashMap::new();

        for category in items.iter().filter(|item| item.is_category) {
            if let Entry::Vacant(slot) = totals.entry(category.id) {
                slot.insert(CompanyPrices::new());
                categories_by_code
                    .entry(category.code.as_str())
                    .or_default()
                    .push(category.id);
            }
        }

        for leaf in items.iter().filter(|item| !item.is_category) {
            let Some(category_ids) = parent_code(&leaf.code).and_then(|p| categories_by_code.get(p))
            else {
                continue;
            };

            for category_id in category_ids {
                let accumulator = totals.entry(*category_id).or_default();
                for (company_id, price) in &leaf.prices {
                    *accumulator.entry(*company_id).or_insert(Decimal::ZERO) += *price;
                }
            }
        }

        CategoryTotals::from_map(totals)
    }
}
