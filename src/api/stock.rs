use super::{ApiError, AppState, DateQuery, error::ResultExt};
use crate::{
    core::stock::{self, InventorySheet},
    entities::DailyRecord,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

/// All records, or the record for `?date=` (null when none is stored).
pub async fn get_stock(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let response = match query.date {
        Some(date) => Json(
            stock::get_daily_record(&state.store, date)
                .await
                .or_fail("Failed to fetch stock records")?,
        )
        .into_response(),
        None => Json(
            stock::list_daily_records(&state.store)
                .await
                .or_fail("Failed to fetch stock records")?,
        )
        .into_response(),
    };
    Ok(response)
}

/// Upserts the daily record for its date.
pub async fn save_stock(
    State(state): State<AppState>,
    payload: Result<Json<DailyRecord>, JsonRejection>,
) -> Result<Json<DailyRecord>, ApiError> {
    let Json(record) = payload?;
    let saved = stock::save_daily_record(&state.store, record)
        .await
        .or_fail("Failed to save stock record")?;
    Ok(Json(saved))
}

/// Inventory sheet for `?date=` (default today) with carried-forward openings.
pub async fn get_inventory(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<InventorySheet>, ApiError> {
    let Query(query) = query?;
    let sheet = stock::resolve_inventory(&state.store, query.or_today())
        .await
        .or_fail("Failed to build inventory sheet")?;
    Ok(Json(sheet))
}
