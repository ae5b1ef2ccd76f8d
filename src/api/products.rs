use super::{ApiError, AppState, error::ResultExt};
use crate::{core::product, entities::Product, errors::Error};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

/// Lists the product catalogue.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = product::list_products(&state.store)
        .await
        .or_fail("Failed to fetch products")?;
    Ok(Json(products))
}

/// Fetches one product, 404 when the id is unknown.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    product::get_product(&state.store, &id)
        .await
        .and_then(|found| found.ok_or_else(|| Error::ProductNotFound { id: id.clone() }))
        .map(Json)
        .or_fail("Failed to fetch product")
}

/// Adds a product to the catalogue.
pub async fn add_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(body) = payload?;
    let saved = product::add_product(&state.store, body)
        .await
        .or_fail("Failed to add product")?;
    Ok(Json(saved))
}

#[cfg(test)]
mod tests {
    use crate::api::test_client::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_products_routes() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(5));

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({"id": "prod_2kg", "name": "2kg", "unitCost": 250.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "prod_2kg");

        let (status, _) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({"id": "prod_2kg", "name": "2kg", "unitCost": 250.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, "GET", "/api/products/prod_2kg", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unitCost"], 250.0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let (status, body) = send(&app(), "GET", "/api/products/prod_99kg", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found: prod_99kg");
    }
}
