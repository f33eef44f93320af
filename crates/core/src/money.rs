//! Range of money amounts the system accepts.
//!
//! Amounts are stored as `NUMERIC(19, 4)`: at most 15 integer digits and
//! 4 decimal places. Keeping inputs inside that range also keeps every sum
//! the services compute far below `Decimal::MAX`.

use rust_decimal::Decimal;

/// Decimal places kept for a money amount.
pub const MONEY_SCALE: u32 = 4;

/// Integer digits allowed in a money amount.
pub const MONEY_INTEGER_DIGITS: u32 = 15;

/// Exclusive upper bound of a money amount's magnitude (10^15).
#[must_use]
pub fn money_limit() -> Decimal {
    Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS))
}

/// Whether `amount` fits the stored money column.
///
/// Trailing zeros do not count against the scale, so `10.500000` fits.
#[must_use]
pub fn fits_money_column(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE && amount.abs() < money_limit()
}
