//! Budget comparison tables.
//!
//! Items, companies and prices all cascade from their comparison, and prices
//! cascade from both their item and their company.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(BUDGET_COMPARISONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS budget_comparison_prices CASCADE;
DROP TABLE IF EXISTS budget_comparison_companies CASCADE;
DROP TABLE IF EXISTS budget_comparison_items CASCADE;
DROP TABLE IF EXISTS budget_comparisons CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const BUDGET_COMPARISONS_SQL: &str = r"
CREATE TABLE budget_comparisons (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    description TEXT NOT NULL,
    project_id UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_comparison_description CHECK (length(trim(description)) > 0)
);

CREATE INDEX idx_budget_comparisons_created ON budget_comparisons(created_at DESC, id DESC);
CREATE INDEX idx_budget_comparisons_project ON budget_comparisons(project_id) WHERE project_id IS NOT NULL;

CREATE TABLE budget_comparison_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    comparison_id UUID NOT NULL REFERENCES budget_comparisons(id) ON DELETE CASCADE,
    code VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    is_category BOOLEAN NOT NULL DEFAULT false,
    observations TEXT,
    lowest_price NUMERIC(19, 4),
    middle_price NUMERIC(19, 4),
    average_price NUMERIC(19, 4),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_comparison_item_code UNIQUE (comparison_id, code)
);

CREATE INDEX idx_budget_comparison_items_comparison ON budget_comparison_items(comparison_id);

CREATE TABLE budget_comparison_companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    comparison_id UUID NOT NULL REFERENCES budget_comparisons(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX uq_comparison_company_name
    ON budget_comparison_companies(comparison_id, lower(name));

CREATE TABLE budget_comparison_prices (
    item_id UUID NOT NULL REFERENCES budget_comparison_items(id) ON DELETE CASCADE,
    company_id UUID NOT NULL REFERENCES budget_comparison_companies(id) ON DELETE CASCADE,
    price NUMERIC(19, 4) NOT NULL,
    PRIMARY KEY (item_id, company_id),
    CONSTRAINT chk_price_non_negative CHECK (price >= 0)
);

CREATE INDEX idx_budget_comparison_prices_company ON budget_comparison_prices(company_id);
";
