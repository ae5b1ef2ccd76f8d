use super::{ApiError, AppState, DateQuery, error::ResultExt};
use crate::{
    core::sales::{self, SalesSummary},
    entities::SalesRecord,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

/// All registers, or the register for `?date=` (null when none is stored).
pub async fn get_sales(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let response = match query.date {
        Some(date) => Json(
            sales::get_sales_record(&state.store, date)
                .await
                .or_fail("Failed to fetch sales records")?,
        )
        .into_response(),
        None => Json(
            sales::list_sales_records(&state.store)
                .await
                .or_fail("Failed to fetch sales records")?,
        )
        .into_response(),
    };
    Ok(response)
}

/// Upserts the register for its date.
pub async fn save_sales(
    State(state): State<AppState>,
    payload: Result<Json<SalesRecord>, JsonRejection>,
) -> Result<Json<SalesRecord>, ApiError> {
    let Json(record) = payload?;
    let saved = sales::save_sales_record(&state.store, record)
        .await
        .or_fail("Failed to save sales record")?;
    Ok(Json(saved))
}

/// Per-product and per-mode totals for `?date=` (default today).
pub async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<SalesSummary>, ApiError> {
    let Query(query) = query?;
    let summary = sales::sales_summary(&state.store, query.or_today())
        .await
        .or_fail("Failed to summarise sales")?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use crate::api::test_client::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_sales_routes() {
        let app = app();
        let register = json!({
            "date": "2024-06-01",
            "sales": [{
                "employeeId": "emp_01",
                "products": {
                    "prod_14kg": {
                        "cash": {"nos": 2, "amount": 1711.0},
                        "digital": {"nos": 1, "amount": 855.5},
                        "prepaid": {"nos": 0, "amount": 0}
                    }
                }
            }]
        });

        let (status, _) = send(&app, "POST", "/api/sales", Some(register)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, record) = send(&app, "GET", "/api/sales?date=2024-06-01", None).await;
        assert_eq!(record["sales"][0]["employeeId"], "emp_01");

        let (status, summary) = send(&app, "GET", "/api/sales/summary?date=2024-06-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["total"]["nos"], 3);
        assert_eq!(summary["total"]["amount"], 2566.5);
        assert_eq!(summary["byMode"]["cash"]["nos"], 2);
    }
}
