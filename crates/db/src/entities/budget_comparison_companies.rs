//! `SeaORM` Entity for budget_comparison_companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_comparison_companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub comparison_id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_comparisons::Entity",
        from = "Column::ComparisonId",
        to = "super::budget_comparisons::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BudgetComparisons,
    #[sea_orm(has_many = "super::budget_comparison_prices::Entity")]
    BudgetComparisonPrices,
}

impl Related<super::budget_comparisons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetComparisons.def()
    }
}

impl Related<super::budget_comparison_prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetComparisonPrices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
