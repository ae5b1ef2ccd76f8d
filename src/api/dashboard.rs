use super::{ApiError, AppState, DateQuery, error::ResultExt};
use crate::core::{
    dashboard::{self, Dashboard},
    stock::{self, EmployeeDue},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::{Value, json};

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// KPI roll-up for `?date=` (default today).
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Dashboard>, ApiError> {
    let Query(query) = query?;
    let board = dashboard::dashboard(&state.store, query.or_today())
        .await
        .or_fail("Failed to build dashboard")?;
    Ok(Json(board))
}

/// Outstanding dues per employee up to `?date=` (default today).
pub async fn get_dues(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<EmployeeDue>>, ApiError> {
    let Query(query) = query?;
    let dues = stock::employee_dues(&state.store, query.or_today())
        .await
        .or_fail("Failed to fetch dues")?;
    Ok(Json(dues))
}
