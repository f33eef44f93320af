//! In-memory `BudgetComparisonStore`, for tests and database-less runs.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId, PageRequest};

use super::error::ComparisonError;
use super::store::BudgetComparisonStore;
use super::types::{
    BudgetComparison, BudgetComparisonChanges, BudgetComparisonItem, Company,
    NewBudgetComparison,
};

/// Store keeping everything in concurrent maps. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryComparisonStore {
    comparisons: DashMap<BudgetComparisonId, BudgetComparison>,
    items: DashMap<ComparisonItemId, BudgetComparisonItem>,
    companies: DashMap<CompanyId, Company>,
}

impl InMemoryComparisonStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_comparison(&self, id: BudgetComparisonId) -> Result<(), ComparisonError> {
        if self.comparisons.contains_key(&id) {
            Ok(())
        } else {
            Err(ComparisonError::ComparisonNotFound(id))
        }
    }
}

#[async_trait]
impl BudgetComparisonStore for InMemoryComparisonStore {
    async fn list_comparisons(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<BudgetComparison>, u64), ComparisonError> {
        let mut all: Vec<BudgetComparison> =
            self.comparisons.iter().map(|c| c.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = all.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let data = all.into_iter().skip(offset).take(limit).collect();

        Ok((data, total))
    }

    async fn get_comparison(
        &self,
        id: BudgetComparisonId,
    ) -> Result<BudgetComparison, ComparisonError> {
        self.comparisons
            .get(&id)
            .map(|c| c.value().clone())
            .ok_or(ComparisonError::ComparisonNotFound(id))
    }

    async fn create_comparison(
        &self,
        input: NewBudgetComparison,
    ) -> Result<BudgetComparison, ComparisonError> {
        let comparison = BudgetComparison {
            id: BudgetComparisonId::new(),
            description: input.description,
            project_id: input.project_id,
            created_at: Utc::now(),
        };
        self.comparisons.insert(comparison.id, comparison.clone());
        Ok(comparison)
    }

    async fn update_comparison(
        &self,
        id: BudgetComparisonId,
        changes: BudgetComparisonChanges,
    ) -> Result<BudgetComparison, ComparisonError> {
        let mut entry = self
            .comparisons
            .get_mut(&id)
            .ok_or(ComparisonError::ComparisonNotFound(id))?;

        if let Some(description) = changes.description {
            entry.description = description;
        }
        if let Some(project_id) = changes.project_id {
            entry.project_id = project_id;
        }
        Ok(entry.value().clone())
    }

    async fn delete_comparison(&self, id: BudgetComparisonId) -> Result<(), ComparisonError> {
        self.comparisons
            .remove(&id)
            .ok_or(ComparisonError::ComparisonNotFound(id))?;
        self.items.retain(|_, item| item.comparison_id != id);
        self.companies.retain(|_, company| company.comparison_id != id);
        Ok(())
    }

    async fn load_items(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<BudgetComparisonItem>, ComparisonError> {
        self.ensure_comparison(comparison_id)?;
        Ok(self
            .items
            .iter()
            .filter(|item| item.comparison_id == comparison_id)
            .map(|item| item.value().clone())
            .collect())
    }

    async fn save_item(&self, item: &BudgetComparisonItem) -> Result<(), ComparisonError> {
        self.ensure_comparison(item.comparison_id)?;
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_item(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
    ) -> Result<(), ComparisonError> {
        self.items
            .remove_if(&item_id, |_, item| item.comparison_id == comparison_id)
            .map(|_| ())
            .ok_or(ComparisonError::ItemNotFound(item_id))
    }

    async fn list_companies(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<Company>, ComparisonError> {
        self.ensure_comparison(comparison_id)?;
        Ok(self
            .companies
            .iter()
            .filter(|company| company.comparison_id == comparison_id)
            .map(|company| company.value().clone())
            .collect())
    }

    async fn save_company(&self, company: &Company) -> Result<(), ComparisonError> {
        self.ensure_comparison(company.comparison_id)?;
        self.companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn delete_company(
        &self,
        comparison_id: BudgetComparisonId,
        company_id: CompanyId,
    ) -> Result<(), ComparisonError> {
        self.companies
            .remove_if(&company_id, |_, company| company.comparison_id == comparison_id)
            .ok_or(ComparisonError::CompanyNotFound(company_id))?;

        for mut item in self.items.iter_mut() {
            if item.comparison_id == comparison_id {
                item.prices.remove(&company_id);
            }
        }
        Ok(())
    }
}
