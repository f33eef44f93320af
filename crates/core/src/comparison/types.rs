//! Budget comparison data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId, ProjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::summary::PriceSummary;

/// Price per company for one item.
pub type CompanyPrices = BTreeMap<CompanyId, Decimal>;

/// A saved budget comparison.
///
/// Holds no items or prices; those are loaded per comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// Comparison ID.
    pub id: BudgetComparisonId,
    /// Free text description.
    pub description: String,
    /// Project the comparison was made for.
    pub project_id: Option<ProjectId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a budget comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetComparison {
    /// Description.
    pub description: String,
    /// Optional linked project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

/// Changes to a budget comparison. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetComparisonChanges {
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New project link; `Some(None)` unlinks.
    #[serde(default, with = "double_option")]
    pub project_id: Option<Option<ProjectId>>,
}

/// A line item or category of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetComparisonItem {
    /// Item ID.
    pub id: ComparisonItemId,
    /// Owning comparison.
    pub comparison_id: BudgetComparisonId,
    /// Dotted hierarchical code, e.g. `2.1`.
    pub code: String,
    /// Label.
    pub description: String,
    /// Grouping node whose prices are computed from its children.
    pub is_category: bool,
    /// Entered prices. Always empty for categories.
    #[serde(default)]
    pub prices: CompanyPrices,
    /// Free text notes.
    pub observations: Option<String>,
    /// Lowest entered price.
    pub lowest_price: Option<Decimal>,
    /// Median entered price.
    pub middle_price: Option<Decimal>,
    /// Mean entered price.
    pub average_price: Option<Decimal>,
}

impl BudgetComparisonItem {
    /// Creates an item without prices.
    #[must_use]
    pub fn new(
        comparison_id: BudgetComparisonId,
        code: impl Into<String>,
        description: impl Into<String>,
        is_category: bool,
    ) -> Self {
        Self {
            id: ComparisonItemId::new(),
            comparison_id,
            code: code.into(),
            description: description.into(),
            is_category,
            prices: CompanyPrices::new(),
            observations: None,
            lowest_price: None,
            middle_price: None,
            average_price: None,
        }
    }

    /// Returns the item with the given prices.
    #[must_use]
    pub fn with_prices<I>(mut self, prices: I) -> Self
    where
        I: IntoIterator<Item = (CompanyId, Decimal)>,
    {
        self.prices = prices.into_iter().collect();
        self
    }

    /// Recomputes the stored price summary from `prices`.
    pub fn refresh_summary(&mut self) {
        let summary = PriceSummary::from_prices(&self.prices);
        self.lowest_price = summary.lowest;
        self.middle_price = summary.middle;
        self.average_price = summary.average;
    }

    /// Nesting depth derived from the code (`2` is 0, `2.1` is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.code.matches('.').count()
    }
}

/// Input for adding an item to a comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComparisonItem {
    /// Dotted code.
    pub code: String,
    /// Label.
    pub description: String,
    /// Whether the item is a category.
    #[serde(default)]
    pub is_category: bool,
    /// Notes.
    #[serde(default)]
    pub observations: Option<String>,
}

/// Changes to an item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonItemChanges {
    /// New code.
    #[serde(default)]
    pub code: Option<String>,
    /// New label.
    #[serde(default)]
    pub description: Option<String>,
    /// Turn into (or out of) a category. Becoming a category drops prices.
    #[serde(default)]
    pub is_category: Option<bool>,
    /// New notes; `Some(None)` clears them.
    #[serde(default, with = "double_option")]
    pub observations: Option<Option<String>>,
}

/// A company bidding in a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Owning comparison.
    pub comparison_id: BudgetComparisonId,
    /// Display name.
    pub name: String,
}

/// Summed price per company for every category, keyed by category item ID.
///
/// Derived on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<ComparisonItemId, CompanyPrices>);

impl CategoryTotals {
    /// Wraps an already computed map.
    #[must_use]
    pub const fn from_map(totals: BTreeMap<ComparisonItemId, CompanyPrices>) -> Self {
        Self(totals)
    }

    /// Totals for one category, `None` if the ID is not a category.
    #[must_use]
    pub fn get(&self, category_id: ComparisonItemId) -> Option<&CompanyPrices> {
        self.0.get(&category_id)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates categories in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ComparisonItemId, &CompanyPrices)> {
        self.0.iter()
    }

    /// Unwraps the inner map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<ComparisonItemId, CompanyPrices> {
        self.0
    }
}

/// One row of the comparison grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    /// Item ID.
    pub item_id: ComparisonItemId,
    /// Dotted code.
    pub code: String,
    /// Label.
    pub description: String,
    /// Whether the row is a category.
    pub is_category: bool,
    /// Nesting depth from the code.
    pub depth: usize,
    /// Notes.
    pub observations: Option<String>,
    /// Entered prices for leaves, roll-up totals for categories.
    pub prices: CompanyPrices,
    /// Summary over `prices`.
    pub summary: PriceSummary,
}

/// Everything needed to render a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonGrid {
    /// The comparison.
    pub comparison: BudgetComparison,
    /// Companies, by name.
    pub companies: Vec<Company>,
    /// Items in natural code order.
    pub rows: Vec<GridRow>,
    /// Roll-up totals per category.
    pub category_totals: CategoryTotals,
}

/// Distinguishes an absent field from an explicit `null` in change sets.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
