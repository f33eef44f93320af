//! `SeaORM` Entity for budget_comparison_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_comparison_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub comparison_id: Uuid,
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_category: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub observations: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub lowest_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub middle_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub average_price: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
