//! Core business logic - framework-agnostic ledger operations.
//!
//! Every operation takes the shared [`Store`](crate::store::Store) and returns
//! plain entities or report structs; the HTTP layer only translates.

/// Daily KPI roll-ups
pub mod dashboard;
/// Employee roster management
pub mod employee;
/// Expense logging
pub mod expense;
/// Product catalogue
pub mod product;
/// Sales register and per-mode summaries
pub mod sales;
/// Daily stock records, inventory carry-forward and dues
pub mod stock;

use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};

/// Largest cylinder count accepted in a single field.
pub const MAX_COUNT: i64 = 1_000_000;

/// Current calendar date in UTC, the default for date-scoped reports.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Generates a prefixed random identifier such as `emp_3f2a...`.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Rejects money amounts that are negative or not finite.
pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Sums counts without overflowing.
pub(crate) fn saturating_sum(counts: impl IntoIterator<Item = i64>) -> i64 {
    counts.into_iter().fold(0, i64::saturating_add)
}

/// Rejects cylinder counts outside `0..=MAX_COUNT`.
pub(crate) fn validate_count(field: &str, count: i64) -> Result<()> {
    if !(0..=MAX_COUNT).contains(&count) {
        return Err(Error::validation(format!(
            "{field} must be between 0 and {MAX_COUNT}, got {count}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_count_bounds() {
        assert!(validate_count("due", 0).is_ok());
        assert!(validate_count("due", MAX_COUNT).is_ok());
        assert!(matches!(validate_count("due", -1), Err(Error::Validation { .. })));
        assert!(matches!(validate_count("due", MAX_COUNT + 1), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([i64::MAX, 1]), i64::MAX);
    }
}
