//! Budget comparisons: line items and categories priced by competing companies.

pub mod aggregator;
pub mod code;
pub mod error;
pub mod matrix;
pub mod memory;
pub mod service;
pub mod store;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregator::CategoryAggregator;
pub use code::{compare_codes, is_direct_child_of, normalize_code, parent_code, sort_items};
pub use error::ComparisonError;
pub use matrix::PriceMatrix;
pub use memory::InMemoryComparisonStore;
pub use service::ComparisonService;
pub use store::BudgetComparisonStore;
pub use summary::PriceSummary;
pub use types::{
    BudgetComparison, BudgetComparisonChanges, BudgetComparisonItem, CategoryTotals, Company,
    CompanyPrices, ComparisonGrid, ComparisonItemChanges, GridRow, NewBudgetComparison,
    NewComparisonItem,
};
