//! Persistence boundary for budget comparisons.

use async_trait::async_trait;
use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId, PageRequest};

use super::error::ComparisonError;
use super::types::{
    BudgetComparison, BudgetComparisonChanges, BudgetComparisonItem, Company,
    NewBudgetComparison,
};

/// Storage for comparisons, their items (with prices) and companies.
///
/// Implementations report missing records with the matching `*NotFound`
/// variant and backend failures with `ComparisonError::Storage`.
#[async_trait]
pub trait BudgetComparisonStore: Send + Sync {
    /// Lists comparisons newest first, with the total count.
    async fn list_comparisons(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<BudgetComparison>, u64), ComparisonError>;

    /// Gets one comparison.
    async fn get_comparison(
        &self,
        id: BudgetComparisonId,
    ) -> Result<BudgetComparison, ComparisonError>;

    /// Creates a comparison from already validated input.
    async fn create_comparison(
        &self,
        input: NewBudgetComparison,
    ) -> Result<BudgetComparison, ComparisonError>;

    /// Applies already validated changes.
    async fn update_comparison(
        &self,
        id: BudgetComparisonId,
        changes: BudgetComparisonChanges,
    ) -> Result<BudgetComparison, ComparisonError>;

    /// Deletes a comparison with its items, companies and prices.
    async fn delete_comparison(&self, id: BudgetComparisonId) -> Result<(), ComparisonError>;

    /// Loads every item of a comparison, prices included, in no particular order.
    async fn load_items(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<BudgetComparisonItem>, ComparisonError>;

    /// Inserts or updates an item, replacing its stored prices.
    async fn save_item(&self, item: &BudgetComparisonItem) -> Result<(), ComparisonError>;

    /// Deletes an item and its prices.
    async fn delete_item(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
    ) -> Result<(), ComparisonError>;

    /// Lists the companies of a comparison.
    async fn list_companies(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<Company>, ComparisonError>;

    /// Inserts or renames a company.
    async fn save_company(&self, company: &Company) -> Result<(), ComparisonError>;

    /// Deletes a company and every price recorded for it.
    async fn delete_company(
        &self,
        comparison_id: BudgetComparisonId,
        company_id: CompanyId,
    ) -> Result<(), ComparisonError>;
}
