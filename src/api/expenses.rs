use super::{ApiError, AppState, DateQuery, IdBody, UpdateBody, error::ResultExt};
use crate::{
    core::expense,
    entities::{Expense, ExpensePatch, NewExpense},
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde_json::{Value, json};

/// All expenses, or only those on `?date=`.
pub async fn list_expenses(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let Query(query) = query?;
    let expenses = match query.date {
        Some(date) => expense::expenses_by_date(&state.store, date).await,
        None => expense::list_expenses(&state.store).await,
    }
    .or_fail("Failed to fetch expenses")?;
    Ok(Json(expenses))
}

/// The fixed expense categories.
pub async fn expense_types() -> Json<Vec<&'static str>> {
    Json(expense::expense_types())
}

/// Logs an expense.
pub async fn add_expense(
    State(state): State<AppState>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<Json<Expense>, ApiError> {
    let Json(body) = payload?;
    let saved = expense::add_expense(&state.store, body)
        .await
        .or_fail("Failed to add expense")?;
    Ok(Json(saved))
}

/// Merges the body's fields into the expense named by `id`.
pub async fn update_expense(
    State(state): State<AppState>,
    payload: Result<Json<UpdateBody<ExpensePatch>>, JsonRejection>,
) -> Result<Json<Expense>, ApiError> {
    let Json(body) = payload?;
    let updated = expense::update_expense(&state.store, &body.id, body.patch)
        .await
        .or_fail("Failed to update expense")?;
    Ok(Json(updated))
}

/// Removes the expense named by `id`.
pub async fn delete_expense(
    State(state): State<AppState>,
    payload: Result<Json<IdBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    expense::delete_expense(&state.store, &body.id)
        .await
        .or_fail("Failed to delete expense")?;
    Ok(Json(json!({ "success": true })))
}
