//! `SeaORM` Entity for budget_comparisons table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_comparisons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub project_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_comparison_items::Entity")]
    BudgetComparisonItems,
    #[sea_orm(has_many = "super::budget_comparison_companies::Entity")]
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
