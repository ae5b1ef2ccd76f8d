//! HTTP interface - JSON REST routes over the ledger.
//!
//! Handlers only extract input, call into [`crate::core`] and wrap the result;
//! all rules live in the business logic.

/// Dashboard, dues and health routes
pub mod dashboard;
/// Employee roster routes
pub mod employees;
/// Error responses
pub mod error;
/// Expense routes
pub mod expenses;
/// Product catalogue routes
pub mod products;
/// Sales register routes
pub mod sales;
/// Daily stock and inventory routes
pub mod stock;

use crate::store::Store;
use axum::{
    Router,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The ledger document
    pub store: Arc<Store>,
}

impl AppState {
    /// Wraps a store for sharing across handlers.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Optional `?date=YYYY-MM-DD` filter.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    /// The requested date, or today.
    #[must_use]
    pub fn or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(crate::core::today)
    }
}

/// Body of DELETE requests.
#[derive(Debug, Deserialize)]
pub struct IdBody {
    /// Id of the record to remove
    pub id: String,
}

/// Body of PUT requests: the id plus the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateBody<P> {
    /// Id of the record to change
    pub id: String,
    /// Remaining keys of the body
    #[serde(flatten)]
    pub patch: P,
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(dashboard::health))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/dues", get(dashboard::get_dues))
        .route(
            "/api/products",
            get(products::list_products).post(products::add_product),
        )
        .route(
            "/api/employees",
            get(employees::list_employees)
                .post(employees::add_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/api/products/:id", get(products::get_product))
        .route("/api/employees/:id", get(employees::get_employee))
        .route(
            "/api/expenses",
            get(expenses::list_expenses)
                .post(expenses::add_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        .route("/api/expenses/types", get(expenses::expense_types))
        .route(
            "/api/sales",
            get(sales::get_sales).post(sales::save_sales),
        )
        .route("/api/sales/summary", get(sales::get_summary))
        .route(
            "/api/stock",
            get(stock::get_stock).post(stock::save_stock),
        )
        .route("/api/stock/inventory", get(stock::get_inventory))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
