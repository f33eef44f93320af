//! Budget comparison repository: Postgres-backed `BudgetComparisonStore`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use meridian_core::comparison::{
    BudgetComparison, BudgetComparisonChanges, BudgetComparisonItem, BudgetComparisonStore,
    Company, CompanyPrices, ComparisonError, NewBudgetComparison,
};
use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    budget_comparison_companies, budget_comparison_items, budget_comparison_prices,
    budget_comparisons,
};

/// Budget comparison repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetComparisonRepository {
    db: DatabaseConnection,
}

impl BudgetComparisonRepository {
    /// Creates a new budget comparison repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_comparison<C: ConnectionTrait>(
        conn: &C,
        id: BudgetComparisonId,
    ) -> Result<budget_comparisons::Model, ComparisonError> {
        budget_comparisons::Entity::find_by_id(id.into_inner())
            .one(conn)
            .await
            .map_err(storage)?
            .ok_or(ComparisonError::ComparisonNotFound(id))
    }
}

#[async_trait]
impl BudgetComparisonStore for BudgetComparisonRepository {
    async fn list_comparisons(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<BudgetComparison>, u64), ComparisonError> {
        let total = budget_comparisons::Entity::find()
            .count(&self.db)
            .await
            .map_err(storage)?;

        let rows = budget_comparisons::Entity::find()
            .order_by_desc(budget_comparisons::Column::CreatedAt)
            .order_by_desc(budget_comparisons::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok((rows.into_iter().map(comparison_from_model).collect(), total))
    }

    async fn get_comparison(
        &self,
        id: BudgetComparisonId,
    ) -> Result<BudgetComparison, ComparisonError> {
        Self::find_comparison(&self.db, id)
            .await
            .map(comparison_from_model)
    }

    async fn create_comparison(
        &self,
        input: NewBudgetComparison,
    ) -> Result<BudgetComparison, ComparisonError> {
        let now = Utc::now().into();

        let model = budget_comparisons::ActiveModel {
            id: Set(BudgetComparisonId::new().into_inner()),
            description: Set(input.description),
            project_id: Set(input.project_id.map(Into::into)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(storage)?;

        Ok(comparison_from_model(model))
    }

    async fn update_comparison(
        &self,
        id: BudgetComparisonId,
        changes: BudgetComparisonChanges,
    ) -> Result<BudgetComparison, ComparisonError> {
        let mut model = Self::find_comparison(&self.db, id)
            .await?
            .into_active_model();

        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(project_id) = changes.project_id {
            model.project_id = Set(project_id.map(Into::into));
        }
        model.updated_at = Set(Utc::now().into());

        let model = model.update(&self.db).await.map_err(storage)?;
        Ok(comparison_from_model(model))
    }

    async fn delete_comparison(&self, id: BudgetComparisonId) -> Result<(), ComparisonError> {
        // Items, companies and prices go with it through ON DELETE CASCADE
        let result = budget_comparisons::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(ComparisonError::ComparisonNotFound(id));
        }
        debug!(comparison_id = %id, "Deleted budget comparison");
        Ok(())
    }

    async fn load_items(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<BudgetComparisonItem>, ComparisonError> {
        Self::find_comparison(&self.db, comparison_id).await?;

        let items = budget_comparison_items::Entity::find()
            .filter(budget_comparison_items::Column::ComparisonId.eq(comparison_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(storage)?;

        let prices = budget_comparison_prices::Entity::find()
            .inner_join(budget_comparison_items::Entity)
            .filter(budget_comparison_items::Column::ComparisonId.eq(comparison_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(storage)?;

        let mut prices_by_item: HashMap<Uuid, CompanyPrices> = HashMap::new();
        for price in prices {
            prices_by_item
                .entry(price.item_id)
                .or_default()
                .insert(CompanyId::from_uuid(price.company_id), price.price);
        }

        Ok(items
            .into_iter()
            .map(|model| {
                let prices = prices_by_item.remove(&model.id).unwrap_or_default();
                item_from_model(model, prices)
            })
            .collect())
    }

    async fn save_item(&self, item: &BudgetComparisonItem) -> Result<(), ComparisonError> {
        let txn = self.db.begin().await.map_err(storage)?;

        Self::find_comparison(&txn, item.comparison_id).await?;

        let existing = budget_comparison_items::Entity::find_by_id(item.id.into_inner())
            .one(&txn)
            .await
            .map_err(storage)?;

        let now = Utc::now().into();
        let mut model = budget_comparison_items::ActiveModel {
            id: Set(item.id.into_inner()),
            comparison_id: Set(item.comparison_id.into_inner()),
            code: Set(item.code.clone()),
            description: Set(item.description.clone()),
            is_category: Set(item.is_category),
            observations: Set(item.observations.clone()),
            lowest_price: Set(item.lowest_price),
            middle_price: Set(item.middle_price),
            average_price: Set(item.average_price),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = match existing {
            Some(row) if row.comparison_id != item.comparison_id.into_inner() => {
                return Err(ComparisonError::ItemNotFound(item.id));
            }
            Some(_) => model.update(&txn).await,
            None => {
                model.created_at = Set(now);
                model.insert(&txn).await
            }
        };
        saved.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ComparisonError::DuplicateCode(item.code.clone())
            }
            _ => storage(e),
        })?;

        budget_comparison_prices::Entity::delete_many()
            .filter(budget_comparison_prices::Column::ItemId.eq(item.id.into_inner()))
            .exec(&txn)
            .await
            .map_err(storage)?;

        if !item.prices.is_empty() {
            let rows = item
                .prices
                .iter()
                .map(|(company_id, price)| budget_comparison_prices::ActiveModel {
                    item_id: Set(item.id.into_inner()),
                    company_id: Set(company_id.into_inner()),
                    price: Set(*price),
                });
            budget_comparison_prices::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(storage)?;
        }

        txn.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn delete_item(
        &self,
        comparison_id: BudgetComparisonId,
        item_id: ComparisonItemId,
    ) -> Result<(), ComparisonError> {
        let result = budget_comparison_items::Entity::delete_many()
            .filter(budget_comparison_items::Column::Id.eq(item_id.into_inner()))
            .filter(budget_comparison_items::Column::ComparisonId.eq(comparison_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(ComparisonError::ItemNotFound(item_id));
        }
        Ok(())
    }

    async fn list_companies(
        &self,
        comparison_id: BudgetComparisonId,
    ) -> Result<Vec<Company>, ComparisonError> {
        Self::find_comparison(&self.db, comparison_id).await?;

        let rows = budget_comparison_companies::Entity::find()
            .filter(budget_comparison_companies::Column::ComparisonId.eq(comparison_id.into_inner()))
            .order_by_asc(budget_comparison_companies::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(rows.into_iter().map(company_from_model).collect())
    }

    async fn save_company(&self, company: &Company) -> Result<(), ComparisonError> {
        Self::find_comparison(&self.db, company.comparison_id).await?;

        let existing = budget_comparison_companies::Entity::find_by_id(company.id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage)?;

        let mut model = budget_comparison_companies::ActiveModel {
            id: Set(company.id.into_inner()),
            comparison_id: Set(company.comparison_id.into_inner()),
            name: Set(company.name.clone()),
            ..Default::default()
        };

        let saved = match existing {
            Some(row) if row.comparison_id != company.comparison_id.into_inner() => {
                return Err(ComparisonError::CompanyNotFound(company.id));
            }
            Some(_) => model.update(&self.db).await,
            None => {
                model.created_at = Set(Utc::now().into());
                model.insert(&self.db).await
            }
        };
        saved.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ComparisonError::DuplicateCompany(company.name.clone())
            }
            _ => storage(e),
        })?;
        Ok(())
    }

    async fn delete_company(
        &self,
        comparison_id: BudgetComparisonId,
        company_id: CompanyId,
    ) -> Result<(), ComparisonError> {
        // Prices for the company cascade
        let result = budget_comparison_companies::Entity::delete_many()
            .filter(budget_comparison_companies::Column::Id.eq(company_id.into_inner()))
            .filter(
                budget_comparison_companies::Column::ComparisonId.eq(comparison_id.into_inner()),
            )
            .exec(&self.db)
            .await
            .map_err(storage)?;

        if result.rows_affected == 0 {
            return Err(ComparisonError::CompanyNotFound(company_id));
        }
        Ok(())
    }
}

#[allow(clippy::needless_pass_by_value)]
fn storage(err: DbErr) -> ComparisonError {
    ComparisonError::Storage(err.to_string())
}

fn comparison_from_model(model: budget_comparisons::Model) -> BudgetComparison {
    BudgetComparison {
        id: BudgetComparisonId::from_uuid(model.id),
        description: model.description,
        project_id: model.project_id.map(Into::into),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn item_from_model(
    model: budget_comparison_items::Model,
    prices: CompanyPrices,
) -> BudgetComparisonItem {
    BudgetComparisonItem {
        id: ComparisonItemId::from_uuid(model.id),
        comparison_id: BudgetComparisonId::from_uuid(model.comparison_id),
        code: model.code,
        description: model.description,
        is_category: model.is_category,
        prices,
        observations: model.observations,
        lowest_price: model.lowest_price,
        middle_price: model.middle_price,
        average_price: model.average_price,
    }
}

fn company_from_model(model: budget_comparison_companies::Model) -> Company {
    Company {
        id: CompanyId::from_uuid(model.id),
        comparison_id: BudgetComparisonId::from_uuid(model.comparison_id),
        name: model.name,
    }
}
