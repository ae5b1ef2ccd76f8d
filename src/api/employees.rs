use super::{ApiError, AppState, IdBody, UpdateBody, error::ResultExt};
use crate::{
    core::employee,
    entities::{Employee, EmployeePatch, NewEmployee},
    errors::Error,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Value, json};

/// Lists the whole roster.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = employee::list_employees(&state.store)
        .await
        .or_fail("Failed to fetch employees")?;
    Ok(Json(employees))
}

/// Fetches one employee, 404 when the id is unknown.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    employee::get_employee(&state.store, &id)
        .await
        .and_then(|found| found.ok_or_else(|| Error::EmployeeNotFound { id: id.clone() }))
        .map(Json)
        .or_fail("Failed to fetch employee")
}

/// Creates an employee, generating the id when absent.
pub async fn add_employee(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(body) = payload?;
    let saved = employee::add_employee(&state.store, body)
        .await
        .or_fail("Failed to add employee")?;
    Ok(Json(saved))
}

/// Merges the body's fields into the employee named by `id`.
pub async fn update_employee(
    State(state): State<AppState>,
    payload: Result<Json<UpdateBody<EmployeePatch>>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(body) = payload?;
    let updated = employee::update_employee(&state.store, &body.id, body.patch)
        .await
        .or_fail("Failed to update employee")?;
    Ok(Json(updated))
}

/// Removes the employee named by `id`.
pub async fn delete_employee(
    State(state): State<AppState>,
    payload: Result<Json<IdBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    employee::delete_employee(&state.store, &body.id)
        .await
        .or_fail("Failed to delete employee")?;
    Ok(Json(json!({ "success": true })))
}
