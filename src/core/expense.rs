//! Expense business logic - miscellaneous day-to-day spending.

use crate::{
    entities::{Expense, ExpensePatch, NewExpense},
    errors::{Error, Result},
    store::{Database, Store},
};
use chrono::NaiveDate;
use tracing::info;

/// Expense categories offered by the expense form.
pub const EXPENSE_TYPES: [&str; 16] = [
    "Tea",
    "Load",
    "Loader",
    "Diesel/Petrol",
    "Office Expenses",
    "Water",
    "Stationary",
    "Bills",
    "Porter",
    "Computer Maintenance",
    "Celebration",
    "Vehicle Maintenance",
    "Salary",
    "Cleaning",
    "Reimbursement",
    "Transportation",
];

/// The fixed list of expense categories.
#[must_use]
pub fn expense_types() -> Vec<&'static str> {
    EXPENSE_TYPES.to_vec()
}

/// Retrieves every expense in stored order.
pub async fn list_expenses(store: &Store) -> Result<Vec<Expense>> {
    Ok(store.read(|db| db.expenses.clone()).await)
}

/// Retrieves the expenses logged for `date`.
pub async fn expenses_by_date(store: &Store, date: NaiveDate) -> Result<Vec<Expense>> {
    Ok(store.read(|db| expenses_on(db, date).cloned().collect()).await)
}

/// Total amount spent on `date`.
#[must_use]
pub fn expense_total_in(db: &Database, date: NaiveDate) -> f64 {
    expenses_on(db, date).map(|e| e.amount).sum()
}

fn expenses_on(db: &Database, date: NaiveDate) -> impl Iterator<Item = &Expense> {
    db.expenses.iter().filter(move |e| e.date == date)
}

fn validate_fields(kind: &str, entered_by: &str, amount: f64) -> Result<()> {
    if kind.trim().is_empty() {
        return Err(Error::validation("Expense type cannot be empty"));
    }
    if entered_by.trim().is_empty() {
        return Err(Error::validation("Expense must record who entered it"));
    }
    super::validate_amount(amount)
}

/// Logs a new expense, generating an id when none is supplied.
///
/// # Errors
/// Returns an error if:
/// - The type or `enteredBy` is empty
/// - The amount is negative or not finite
/// - An expense with the supplied id already exists
pub async fn add_expense(store: &Store, new: NewExpense) -> Result<Expense> {
    validate_fields(&new.kind, &new.entered_by, new.amount)?;

    let expense = Expense {
        id: new
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| super::generate_id("exp")),
        date: new.date,
        kind: new.kind.trim().to_string(),
        description: new.description,
        amount: new.amount,
        entered_by: new.entered_by.trim().to_string(),
    };

    let saved = store
        .write(|db| {
            if db.expenses.iter().any(|e| e.id == expense.id) {
                return Err(Error::DuplicateId {
                    kind: "expense",
                    id: expense.id.clone(),
                });
            }
            db.expenses.push(expense.clone());
            Ok(expense)
        })
        .await?;
    info!(expense = %saved.id, amount = saved.amount, "Added expense");
    Ok(saved)
}

/// Shallow-merges `patch` into the expense with the given id.
///
/// # Errors
/// Returns an error if the expense does not exist or the merged record is invalid.
pub async fn update_expense(store: &Store, id: &str, patch: ExpensePatch) -> Result<Expense> {
    let updated = store
        .write(|db| {
            let expense = db
                .expenses
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| Error::ExpenseNotFound { id: id.to_string() })?;
            expense.apply(patch);
            validate_fields(&expense.kind, &expense.entered_by, expense.amount)?;
            Ok(expense.clone())
        })
        .await?;
    info!(expense = %id, "Updated expense");
    Ok(updated)
}

/// Removes an expense.
///
/// # Errors
/// Returns an error if the expense does not exist.
pub async fn delete_expense(store: &Store, id: &str) -> Result<Expense> {
    let removed = store
        .write(|db| {
            let index = db
                .expenses
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| Error::ExpenseNotFound { id: id.to_string() })?;
            Ok(db.expenses.remove(index))
        })
        .await?;
    info!(expense = %id, "Deleted expense");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_expense_generates_id() -> Result<()> {
        let store = setup_test_store();
        let expense = add_expense(&store, new_expense(day(2024, 6, 1), "Tea", 100.0)).await?;
        assert!(expense.id.starts_with("exp_"));
        assert_eq!(list_expenses(&store).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_expenses_by_date_filters() -> Result<()> {
        let store = setup_test_store();
        add_expense(&store, new_expense(day(2024, 6, 1), "Tea", 100.0)).await?;
        add_expense(&store, new_expense(day(2024, 6, 1), "Bills", 4500.0)).await?;
        add_expense(&store, new_expense(day(2024, 5, 31), "Load", 500.0)).await?;

        let on_first = expenses_by_date(&store, day(2024, 6, 1)).await?;
        assert_eq!(on_first.len(), 2);
        let total = store.read(|db| expense_total_in(db, day(2024, 6, 1))).await;
        assert_eq!(total, 4600.0);
        assert!(expenses_by_date(&store, day(2024, 6, 2)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_expense_validation() -> Result<()> {
        let store = setup_test_store();

        let result = add_expense(&store, new_expense(day(2024, 6, 1), " ", 1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let mut nobody = new_expense(day(2024, 6, 1), "Tea", 1.0);
        nobody.entered_by = String::new();
        let result = add_expense(&store, nobody).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_expense(&store, new_expense(day(2024, 6, 1), "Tea", -3.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -3.0 }
        ));

        let result = add_expense(&store, new_expense(day(2024, 6, 1), "Tea", f64::INFINITY)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_expense_id_rejected() -> Result<()> {
        let store = setup_test_store();
        let mut first = new_expense(day(2024, 6, 1), "Tea", 1.0);
        first.id = Some("exp_1".to_string());
        add_expense(&store, first.clone()).await?;

        let result = add_expense(&store, first).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateId { kind: "expense", .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_integration() -> Result<()> {
        let store = setup_test_store();
        let expense = add_expense(&store, new_expense(day(2024, 6, 1), "Tea", 100.0)).await?;

        let patch = ExpensePatch {
            amount: Some(150.0),
            description: Some("For loaders".to_string()),
            ..ExpensePatch::default()
        };
        let updated = update_expense(&store, &expense.id, patch).await?;
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.kind, "Tea");

        // An invalid merge is rejected and nothing changes
        let bad = ExpensePatch {
            amount: Some(-1.0),
            ..ExpensePatch::default()
        };
        assert!(update_expense(&store, &expense.id, bad).await.is_err());
        let stored = expenses_by_date(&store, day(2024, 6, 1)).await?;
        assert_eq!(stored[0].amount, 150.0);

        let result = update_expense(&store, "exp_missing", ExpensePatch::default()).await;
        assert!(matches!(result.unwrap_err(), Error::ExpenseNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_integration() -> Result<()> {
        let store = setup_test_store();
        let expense = add_expense(&store, new_expense(day(2024, 6, 1), "Water", 40.0)).await?;

        delete_expense(&store, &expense.id).await?;
        assert!(list_expenses(&store).await?.is_empty());

        let result = delete_expense(&store, &expense.id).await;
        assert!(matches!(result.unwrap_err(), Error::ExpenseNotFound { .. }));
        Ok(())
    }

    #[test]
    fn test_expense_types_list() {
        let types = expense_types();
        assert_eq!(types.len(), 16);
        assert_eq!(types[0], "Tea");
        assert!(types.contains(&"Diesel/Petrol"));
    }
}
