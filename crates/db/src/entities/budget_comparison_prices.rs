//! `SeaORM` Entity for budget_comparison_prices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_comparison_prices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub company_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_comparison_items::Entity",
        from = "Column::ItemId",
        to = "super::budget_comparison_items::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BudgetComparisonItems,
    #[sea_orm(
        belongs_to = "super::budget_comparison_companies::Entity",
        from = "Column::CompanyId",
        to = "super::budget_comparison_companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BudgetComparisonCompanies,
}

impl Related<super::budget_comparison_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetComparisonItems.def()
    }
}

impl Related<super::budget_comparison_companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetComparisonCompanies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
