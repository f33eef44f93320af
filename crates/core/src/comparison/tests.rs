//! Property-based tests for budget comparisons.

use std::cmp::Ordering;

use meridian_shared::types::{BudgetComparisonId, CompanyId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::CategoryAggregator;
use super::code::{compare_codes, is_direct_child_of, sort_items};
use super::summary::PriceSummary;
use super::types::{BudgetComparisonItem, CategoryTotals, CompanyPrices};

fn companies() -> [CompanyId; 3] {
    [
        CompanyId::from_uuid(uuid::Uuid::from_u128(1)),
        CompanyId::from_uuid(uuid::Uuid::from_u128(2)),
        CompanyId::from_uuid(uuid::Uuid::from_u128(3)),
    ]
}

fn code_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(1u8..5, 1..4).prop_map(|segments| {
        segments
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

fn item_strategy() -> impl Strategy<Value = BudgetComparisonItem> {
    (
        code_strategy(),
        any::<bool>(),
        prop::collection::vec(prop::option::of(0i64..1_000_000), 3),
    )
        .prop_map(|(code, is_category, cents)| {
            let comparison_id = BudgetComparisonId::from_uuid(uuid::Uuid::nil());
            let item = BudgetComparisonItem::new(comparison_id, code, "item", is_category);
            if is_category {
                return item;
            }
            item.with_prices(
                companies()
                    .into_iter()
                    .zip(cents)
                    .filter_map(|(company, cents)| cents.map(|c| (company, Decimal::new(c, 2)))),
            )
        })
}

/// Quadratic reference: every (leaf, category) pair checked directly.
fn naive_totals(items: &[BudgetComparisonItem]) -> CategoryTotals {
    let totals = items
        .iter()
        .filter(|item| item.is_category)
        .map(|category| {
            let mut sum = CompanyPrices::new();
            for child in items.iter().filter(|c| is_direct_child_of(c, category)) {
                for (company, price) in &child.prices {
                    *sum.entry(*company).or_insert(Decimal::ZERO) += *price;
                }
            }
            (category.id, sum)
        })
        .collect();
    CategoryTotals::from_map(totals)
}

proptest! {
    /// Single-pass totals match the pairwise definition.
    #[test]
    fn test_totals_match_pairwise_definition(
        items in prop::collection::vec(item_strategy(), 0..25),
    ) {
        prop_assert_eq!(CategoryAggregator::category_totals(&items), naive_totals(&items));
    }

    /// Input order does not change the totals.
    #[test]
    fn test_totals_independent_of_order(
        (items, shuffled) in prop::collection::vec(item_strategy(), 0..25)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle())),
    ) {
        let forward = CategoryAggregator::category_totals(&items);
        prop_assert_eq!(&forward, &CategoryAggregator::category_totals(&shuffled));

        let mut reversed = items.clone();
        reversed.reverse();
        let mut sorted = items;
        sort_items(&mut sorted);

        prop_assert_eq!(&forward, &CategoryAggregator::category_totals(&reversed));
        prop_assert_eq!(&forward, &CategoryAggregator::category_totals(&sorted));
    }

    /// Recomputing gives the same answer and covers exactly the categories.
    #[test]
    fn test_totals_deterministic_and_complete(
        items in prop::collection::vec(item_strategy(), 0..25),
    ) {
        let first = CategoryAggregator::category_totals(&items);
        let second = CategoryAggregator::category_totals(&items);
        prop_assert_eq!(&first, &second);

        let categories = items.iter().filter(|i| i.is_category).count();
        prop_assert_eq!(first.len(), categories);
        for item in items.iter().filter(|i| i.is_category) {
            prop_assert!(first.get(item.id).is_some());
        }
    }

    /// Sorted output never places an item before one that compares lower.
    #[test]
    fn test_sort_is_natural(
        items in prop::collection::vec(item_strategy(), 0..25),
    ) {
        let mut items = items;
        sort_items(&mut items);
        for pair in items.windows(2) {
            prop_assert_ne!(compare_codes(&pair[0].code, &pair[1].code), Ordering::Greater);
        }
    }

    /// lowest <= middle and lowest <= average, all within the price range.
    #[test]
    fn test_summary_bounds(
        cents in prop::collection::vec(0i64..1_000_000, 1..10),
    ) {
        let prices: CompanyPrices = cents
            .iter()
            .enumerate()
            .map(|(n, c)| (CompanyId::from_uuid(uuid::Uuid::from_u128(n as u128)), Decimal::new(*c, 2)))
            .collect();
        let highest = prices.values().copied().max().unwrap_or_default();

        let summary = PriceSummary::from_prices(&prices);
        let lowest = summary.lowest.unwrap();
        let middle = summary.middle.unwrap();
        let average = summary.average.unwrap();

        prop_assert!(lowest <= middle && middle <= highest);
        prop_assert!(lowest <= average && average <= highest);
    }
}
