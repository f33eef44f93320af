//! Budget comparison service: validation and orchestration over a store.

use std::sync::Arc;

use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId, PageRequest};

use super::aggregator::CategoryAggregator;
use super::code::{normalize_code, sort_items};
use super::error::ComparisonError;
use super::matrix::PriceMatrix;
use super::store::BudgetComparisonStore;
use super::summary::PriceSummary;
use super::types::{
    BudgetComparison, BudgetComparisonChanges, BudgetComparisonItem, CategoryTotals, Company,
    CompanyPrices, ComparisonGrid, ComparisonItemChanges, GridRow, NewBudgetComparison,
    NewComparisonItem,
};

/// Budget comparison service for business logic.
#[derive(Clone)]
pub struct ComparisonService {
    store: Arc<dyn BudgetComparisonStore>,
}

impl std::fmt::Debug for ComparisonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonService").finish_non_exhaustive()
    }
}

impl ComparisonService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetComparisonStore>) -> Self {
        Self { store }
    }

    /// Trims a description and rejects blank ones.
    ///
    /// # Errors
    ///
    /// Returns `ComparisonError::EmptyDescription` if nothing is left after trimming.
    pub fn validate_description(description: &str) -> Result<String, ComparisonError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ComparisonError::EmptyDescription);
        }
        Ok(description.to_string())
    }

    /// Trims a company name and rejects blank ones.
    ///
    /// # Errors
    ///
    /// Returns `ComparisonError::EmptyCompanyName` if nothing is left after trimming.
    pub fn validate_company_name(name: &str) -> Result<String, ComparisonError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ComparisonError::EmptyCompanyName);
        }
        Ok(name.to_string())
    }

    // ========================================================================
    // Comparisons
    // ========================================================================

    /// Lists comparisons newest first.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<BudgetComparison>, u64), ComparisonError> {
        self.store.list_comparisons(page.normalized()).await
    }

    /// Gets a comparison.
    pub async fn get(&self, id: BudgetComparisonId) -> Result<BudgetComparison, ComparisonError> {
        self.store.get_comparison(id).await
    }

    /// Creates a comparison.
    pub async fn create(
        &self,
        input: NewBudgetComparison,
    ) -> Result<BudgetComparison, ComparisonError> {
        let input = NewBudgetComparison {
            description: Self::validate_description(&input.description)?,
            project_id: input.project_id,
        };
        self.store.create_comparison(input).await
    }

    /// Updates description and/or project link.
    pub async fn update(
        &self,
        id: BudgetComparisonId,
        changes: BudgetComparisonChanges,
    ) -> Result<BudgetComparison, ComparisonError> {
        let changes = BudgetComparisonChanges {
            description: changes
                .description
                .as_deref()
                .map(Self::validate_description)
                .transpose()?,
            project_id: changes.project_id,
        };
        self.store.update_comparison(id, changes).await
    }

    /// Deletes a comparison and everything in it.
    pub async fn delete(&self, id: BudgetComparisonId) -> Result<(), ComparisonError> {
        self.store.delete_comparison(id).await
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Items of a comparison in natural code order.
    pub async fn items(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<BudgetComparisonItem>, ComparisonError> {
        let mut items = self.store.load_items(comparison_id).await?;
        sort_items(&mut items);
        Ok(items)
    }

    /// Adds an item after checking its code is well formed and unused.
    pub async fn add_item(
        &self,
        comparison_id: BudgetComparisonId,
        input: NewComparisonItem,
    ) -> Result<BudgetComparisonItem, ComparisonError> {
        let code = normalize_code(&input.code)?;
        let description = Self::validate_description(&input.description)?;

        let existing = self.store.load_items(comparison_id).await?;
        ensure_code_free(&existing, &code, None)?;

        let mut item = BudgetComparisonItem::new(comparison_id, code, description, input.is_category);
        item.observations = input.observations.filter(|o| !o.trim().is_empty());

        self.store.save_item(&item).await?;
        Ok(item)
    }

    /// Edits an item. Turning a leaf into a category drops its prices.
    pub async fn update_item(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
        changes: ComparisonItemChanges,
    ) -> Result<BudgetComparisonItem, ComparisonError> {
        let items = self.store.load_items(comparison_id).await?;
        let mut item = find_item(&items, item_id)?.clone();

        if let Some(code) = changes.code {
            let code = normalize_code(&code)?;
            ensure_code_free(&items, &code, Some(item_id))?;
            item.code = code;
        }
        if let Some(description) = changes.description {
            item.description = Self::validate_description(&description)?;
        }
        if let Some(observations) = changes.observations {
            item.observations = observations.filter(|o| !o.trim().is_empty());
        }
        if let Some(is_category) = changes.is_category {
            item.is_category = is_category;
            if is_category {
                item.prices.clear();
            }
            item.refresh_summary();
        }

        self.store.save_item(&item).await?;
        Ok(item)
    }

    /// Deletes an item.
    pub async fn delete_item(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
    ) -> Result<(), ComparisonError> {
        self.store.delete_item(comparison_id, item_id).await
    }

    /// Replaces the prices of a leaf and refreshes its summary.
    pub async fn set_prices(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
        prices: CompanyPrices,
    ) -> Result<BudgetComparisonItem, ComparisonError> {
        let items = self.store.load_items(comparison_id).await?;
        let companies = self.store.list_companies(comparison_id).await?;
        let mut item = find_item(&items, item_id)?.clone();

        let mut matrix = PriceMatrix::new(&companies, &items);
        matrix.replace_row(item_id, prices)?;

        item.prices = matrix.row(item_id).cloned().unwrap_or_default();
        item.refresh_summary();

        self.store.save_item(&item).await?;
        Ok(item)
    }

    // ========================================================================
    // Companies
    // ========================================================================

    /// Companies of a comparison, by name.
    pub async fn companies(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<Company>, ComparisonError> {
        let mut companies = self.store.list_companies(comparison_id).await?;
        sort_companies(&mut companies);
        Ok(companies)
    }

    /// Adds a company; names are unique per comparison, ignoring case.
    pub async fn add_company(
        &self,
        comparison_id: BudgetComparisonId,
        name: &str,
    ) -> Result<Company, ComparisonError> {
        let name = Self::validate_company_name(name)?;

        let existing = self.store.list_companies(comparison_id).await?;
        if existing.iter().any(|c| c.name.to_lowercase() == name.to_lowercase()) {
            return Err(ComparisonError::DuplicateCompany(name));
        }

        let company = Company {
            id: CompanyId::new(),
            comparison_id,
            name,
        };
        self.store.save_company(&company).await?;
        Ok(company)
    }

    /// Removes a company, its prices, and refreshes the summaries it affected.
    ///
    /// Affected items are saved without the company's price before the
    /// company itself goes, so a failure partway never leaves a summary that
    /// disagrees with its stored prices.
    pub async fn remove_company(
        &self,
        comparison_id: BudgetComparisonId,
        company_id: CompanyId,
    ) -> Result<(), ComparisonError> {
        let companies = self.store.list_companies(comparison_id).await?;
        if !companies.iter().any(|c| c.id == company_id) {
            return Err(ComparisonError::CompanyNotFound(company_id));
        }
        let items = self.store.load_items(comparison_id).await?;

        let mut matrix = PriceMatrix::new(&companies, &items);
        let affected = matrix.remove_company(company_id);

        for mut item in items.into_iter().filter(|i| affected.contains(&i.id)) {
            item.prices = matrix.row(item.id).cloned().unwrap_or_default();
            item.refresh_summary();
            self.store.save_item(&item).await?;
        }

        self.store.delete_company(comparison_id, company_id).await
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Category roll-up totals of a comparison.
    pub async fn category_totals(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<CategoryTotals, ComparisonError> {
        let items = self.store.load_items(comparison_id).await?;
        Ok(CategoryAggregator::category_totals(&items))
    }

    /// Builds the full grid: sorted rows, category totals and summaries.
    pub async fn grid(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<ComparisonGrid, ComparisonError> {
        let comparison = self.store.get_comparison(comparison_id).await?;
        let companies = self.companies(comparison_id).await?;
        let items = self.items(comparison_id).await?;

        Ok(Self::build_grid(comparison, companies, items))
    }

    /// Assembles a grid from snapshots; `items` must already be sorted.
    #[must_use]
    pub fn build_grid(
        comparison: BudgetComparison,
        companies: Vec<Company>,
        items: Vec<BudgetComparisonItem>,
    ) -> ComparisonGrid {
        let category_totals = CategoryAggregator::category_totals(&items);

        let rows = items
            .into_iter()
            .map(|item| {
                let depth = item.depth();
                let prices = if item.is_category {
                    category_totals.get(item.id).cloned().unwrap_or_default()
                } else {
                    item.prices
                };
                GridRow {
                    item_id: item.id,
                    depth,
                    code: item.code,
                    description: item.description,
                    is_category: item.is_category,
                    observations: item.observations,
                    summary: PriceSummary::from_prices(&prices),
                    prices,
                }
            })
            .collect();

        ComparisonGrid {
            comparison,
            companies,
            rows,
            category_totals,
        }
    }
}

fn find_item(
    items: &[BudgetComparisonItem],
    item_id: ComparisonItemId,
) -> Result<&BudgetComparisonItem, ComparisonError> {
    items
        .iter()
        .find(|i| i.id == item_id)
        .ok_or(ComparisonError::ItemNotFound(item_id))
}

fn ensure_code_free(
    items: &[BudgetComparisonItem],
    code: &str,
    except: Option<ComparisonItemId>,
) -> Result<(), ComparisonError> {
    let taken = items
        .iter()
        .any(|i| i.code == code && Some(i.id) != except);
    if taken {
        return Err(ComparisonError::DuplicateCode(code.to_string()));
    }
    Ok(())
}

fn sort_companies(companies: &mut [Company]) {
    companies.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
