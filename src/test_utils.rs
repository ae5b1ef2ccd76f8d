//! Shared test utilities for the ledger.
//!
//! This module provides common helper functions for setting up test stores
//! and building records with sensible defaults.

use crate::{
    config::{SeedConfig, seed::EmployeeSeed},
    core::expense,
    entities::{
        DailyRecord, DailyStockEntry, EmptyInventory, Expense, FullInventory, Inventory,
        NewEmployee, NewExpense, PaymentEntry, SalesEntry, StockEntry,
    },
    errors::Result,
    store::{Database, Store},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Shorthand for a calendar date; panics on an invalid date.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    #[allow(clippy::expect_used)]
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Seed with the built-in catalogue and a small roster.
///
/// # Defaults
/// * `emp_01` John Doe, `emp_02` Jane Smith, `emp_04` Mary Johnson: active
/// * `emp_03` Peter Jones: inactive
pub fn test_seed() -> SeedConfig {
    let roster = [
        ("emp_01", "John Doe", false, day(2022, 1, 15)),
        ("emp_02", "Jane Smith", false, day(2022, 3, 22)),
        ("emp_03", "Peter Jones", true, day(2021, 11, 30)),
        ("emp_04", "Mary Johnson", false, day(2023, 2, 10)),
    ];
    SeedConfig {
        employees: roster
            .into_iter()
            .map(|(id, name, inactive, join_date)| EmployeeSeed {
                id: id.to_string(),
                name: name.to_string(),
                phone: "9876543210".to_string(),
                inactive,
                join_date,
                birthday: None,
            })
            .collect(),
        ..SeedConfig::default()
    }
}

/// Creates an in-memory store holding the test seed.
/// This is the standard setup for all business logic tests.
pub fn setup_test_store() -> Store {
    Store::in_memory(Database::seeded(&test_seed()))
}

/// A new employee payload with only the name set.
pub fn new_employee(name: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        ..NewEmployee::default()
    }
}

/// A new expense payload entered by "Admin".
pub fn new_expense(date: NaiveDate, kind: &str, amount: f64) -> NewExpense {
    NewExpense {
        id: None,
        date,
        kind: kind.to_string(),
        description: String::new(),
        amount,
        entered_by: "Admin".to_string(),
    }
}

/// A stored expense record.
pub fn sample_expense(id: &str, date: NaiveDate, amount: f64) -> Expense {
    Expense {
        id: id.to_string(),
        date,
        kind: "Tea".to_string(),
        description: "For workers".to_string(),
        amount,
        entered_by: "Manager".to_string(),
    }
}

/// Logs a "Tea" expense through the business logic.
pub async fn add_test_expense(store: &Store, date: NaiveDate, amount: f64) -> Result<Expense> {
    expense::add_expense(store, new_expense(date, "Tea", amount)).await
}

/// One delivery line: full given, empty collected, new connections, due.
pub const fn stock_entry(full_given: i64, empty_collected: i64, new_connection: i64, due: i64) -> StockEntry {
    StockEntry {
        full_given,
        empty_collected,
        new_connection,
        due,
    }
}

/// One employee's deliveries for a day.
pub fn delivery(employee_id: &str, lines: &[(&str, StockEntry)]) -> DailyStockEntry {
    DailyStockEntry {
        employee_id: employee_id.to_string(),
        products: lines
            .iter()
            .map(|(product_id, entry)| ((*product_id).to_string(), *entry))
            .collect(),
        notes: None,
    }
}

/// A daily record with both inventory sides stored for one product.
///
/// The full side opens at `full_opening` and receives `full_received`; the
/// empty side opens at `empty_opening`. All other counts are zero.
pub fn stocked_record(
    date: NaiveDate,
    product_id: &str,
    full_opening: i64,
    full_received: i64,
    empty_opening: i64,
) -> DailyRecord {
    DailyRecord {
        date,
        deliveries: Vec::new(),
        inventory: Some(Inventory {
            full: Some(BTreeMap::from([(
                product_id.to_string(),
                FullInventory {
                    opening_stock: full_opening,
                    received: full_received,
                    ..FullInventory::default()
                },
            )])),
            empty: Some(BTreeMap::from([(
                product_id.to_string(),
                EmptyInventory {
                    opening_stock: empty_opening,
                    ..EmptyInventory::default()
                },
            )])),
        }),
    }
}

/// Sales of one product as `(nos, amount)` per mode: cash, digital, prepaid.
pub const fn sales_entry(cash: (i64, f64), digital: (i64, f64), prepaid: (i64, f64)) -> SalesEntry {
    SalesEntry {
        cash: PaymentEntry {
            nos: cash.0,
            amount: cash.1,
        },
        digital: PaymentEntry {
            nos: digital.0,
            amount: digital.1,
        },
        prepaid: PaymentEntry {
            nos: prepaid.0,
            amount: prepaid.1,
        },
    }
}
