//! `SeaORM` entities for the budget comparison tables.

pub mod budget_comparison_companies;
pub mod budget_comparison_items;
pub mod budget_comparison_prices;
pub mod budget_comparisons;
