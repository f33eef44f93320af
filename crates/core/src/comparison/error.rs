//! Budget comparison error types.

use meridian_shared::AppError;
use meridian_shared::types::{BudgetComparisonId, CompanyId, ComparisonItemId};
use thiserror::Error;

/// Budget comparison errors.
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// Comparison not found.
    #[error("Budget comparison not found: {0}")]
    ComparisonNotFound(BudgetComparisonId),

    /// Item not found in the comparison.
    #[error("Comparison item not found: {0}")]
    ItemNotFound(ComparisonItemId),

    /// Company not found in the comparison.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    /// Description is blank.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// Code is blank or has empty segments.
    #[error("Invalid item code: {0:?}")]
    InvalidCode(String),

    /// Another item of the comparison already uses the code.
    #[error("Item code already exists in this comparison: {0}")]
    DuplicateCode(String),

    /// Company name is blank.
    #[error("Company name cannot be empty")]
    EmptyCompanyName,

    /// Another company of the comparison already has the name.
    #[error("Company already exists in this comparison: {0}")]
    DuplicateCompany(String),

    /// Categories take their prices from their children.
    #[error("Prices cannot be entered on category {0}")]
    CategoryPrice(ComparisonItemId),

    /// Price below zero.
    #[error("Price for company {0} cannot be negative")]
    NegativePrice(CompanyId),

    /// Price too large or too precise to store.
    #[error("Price for company {0} must be below 10^15 with at most 4 decimal places")]
    PriceOutOfRange(CompanyId),

    /// Price for a company outside the comparison.
    #[error("Company {0} does not belong to this comparison")]
    UnknownCompany(CompanyId),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ComparisonError> for AppError {
    fn from(err: ComparisonError) -> Self {
        let message = err.to_string();
        match err {
            ComparisonError::ComparisonNotFound(_)
            | ComparisonError::ItemNotFound(_)
            | ComparisonError::CompanyNotFound(_) => Self::NotFound(message),
            ComparisonError::EmptyDescription
            | ComparisonError::InvalidCode(_)
            | ComparisonError::EmptyCompanyName
            | ComparisonError::NegativePrice(_)
            | ComparisonError::PriceOutOfRange(_)
            | ComparisonError::UnknownCompany(_) => Self::Validation(message),
            ComparisonError::DuplicateCode(_) | ComparisonError::DuplicateCompany(_) => {
                Self::Conflict(message)
            }
            ComparisonError::CategoryPrice(_) => Self::BusinessRule(message),
            ComparisonError::Storage(_) => Self::Database(message),
        }
    }
}
