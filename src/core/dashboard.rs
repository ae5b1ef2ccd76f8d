//! Dashboard business logic - the KPI roll-up for a single day.
//!
//! All figures are computed from stored data in one pass over a read
//! snapshot: closing stock from the resolved inventory sheet, sales and
//! returns from the day's deliveries, dues from every record up to the day.

use crate::{
    core::{expense, sales, saturating_sum, stock},
    errors::Result,
    store::{Database, Store},
};
use chrono::NaiveDate;
use serde::Serialize;

/// How many employees the leader boards show.
pub const TOP_EMPLOYEES: usize = 5;

/// Cylinders sold of one product on the day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: String,
    pub refill: i64,
    pub new_connections: i64,
    pub total: i64,
}

/// An employee on a leader board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEmployee {
    pub employee_id: String,
    pub employee_name: String,
    pub employee_avatar: String,
    pub metric: i64,
}

/// Every KPI shown on the dashboard for one date.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub date: NaiveDate,
    /// Sum of all full closing balances
    pub total_full: i64,
    /// Sum of all empty closing balances
    pub total_empty: i64,
    /// Cylinders pending return, accumulated up to the date
    pub total_due: i64,
    /// Refills plus new connections delivered on the date
    pub total_sales: i64,
    pub new_connections: i64,
    /// Empties sent back to the bottling plant
    pub plant_dispatch: i64,
    /// Empties collected from customers by employees
    pub customer_returns: i64,
    pub sales_by_type: Vec<ProductSales>,
    /// Top employees by full cylinders delivered on the date
    pub top_by_sales: Vec<RankedEmployee>,
    /// Top employees by outstanding dues
    pub top_by_dues: Vec<RankedEmployee>,
    pub expense_total: f64,
    pub sales_amount: f64,
}

/// Builds the dashboard for `date`.
pub async fn dashboard(store: &Store, date: NaiveDate) -> Result<Dashboard> {
    Ok(store.read(|db| dashboard_in(db, date)).await)
}

/// Builds the dashboard for `date` against an already-borrowed document.
#[must_use]
pub fn dashboard_in(db: &Database, date: NaiveDate) -> Dashboard {
    let sheet = stock::resolve_inventory_in(db, date);
    let deliveries = db
        .daily_records
        .iter()
        .find(|r| r.date == date)
        .map(|r| stock::delivery_totals(&r.deliveries))
        .unwrap_or_default();

    let sales_by_type: Vec<ProductSales> = sheet
        .lines
        .iter()
        .map(|line| {
            let t = deliveries.get(&line.product_id).copied().unwrap_or_default();
            ProductSales {
                product_id: line.product_id.clone(),
                product_name: line.product_name.clone(),
                refill: t.refill,
                new_connections: t.new_connection,
                total: t.sold(),
            }
        })
        .collect();

    let mut top_by_sales: Vec<RankedEmployee> = stock::employee_deliveries_in(db, date)
        .into_iter()
        .map(|d| RankedEmployee {
            employee_id: d.employee_id,
            employee_name: d.employee_name,
            employee_avatar: d.employee_avatar,
            metric: d.totals.full_given,
        })
        .collect();
    rank(&mut top_by_sales);

    let dues = stock::employee_dues_in(db, date);
    let total_due = saturating_sum(dues.iter().map(|d| d.total));
    let mut top_by_dues: Vec<RankedEmployee> = dues
        .into_iter()
        .map(|d| RankedEmployee {
            employee_id: d.employee_id,
            employee_name: d.employee_name,
            employee_avatar: d.employee_avatar,
            metric: d.total,
        })
        .collect();
    rank(&mut top_by_dues);

    Dashboard {
        date,
        total_full: sheet.total_full,
        total_empty: sheet.total_empty,
        total_due,
        total_sales: saturating_sum(deliveries.values().map(stock::DeliveryTotals::sold)),
        new_connections: saturating_sum(deliveries.values().map(|t| t.new_connection)),
        plant_dispatch: saturating_sum(sheet.lines.iter().map(|l| l.empty.plant_dispatch)),
        customer_returns: saturating_sum(deliveries.values().map(|t| t.empty_collected)),
        sales_by_type,
        top_by_sales,
        top_by_dues,
        expense_total: expense::expense_total_in(db, date),
        sales_amount: sales::sales_summary_in(db, date).total.amount,
    }
}

/// Sorts by metric descending (ties by id) and keeps the leaders.
fn rank(employees: &mut Vec<RankedEmployee>) {
    employees.retain(|e| e.metric > 0);
    employees.sort_by(|a, b| {
        b.metric
            .cmp(&a.metric)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    employees.truncate(TOP_EMPLOYEES);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::stock::save_daily_record;
    use crate::entities::{DailyRecord, EmptyInventory, Inventory};
    use crate::test_utils::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_empty_dashboard() -> Result<()> {
        let store = setup_test_store();
        let board = dashboard(&store, day(2024, 6, 1)).await?;
        assert_eq!(board.total_full, 0);
        assert_eq!(board.total_sales, 0);
        assert!(board.top_by_sales.is_empty());
        assert_eq!(board.sales_by_type.len(), 5);
        assert_eq!(board.expense_total, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_rolls_up_day() -> Result<()> {
        let store = setup_test_store();
        save_daily_record(&store, stocked_record(day(2024, 6, 1), "prod_5kg", 100, 0, 40)).await?;

        let mut today = DailyRecord::new(day(2024, 6, 2));
        today.deliveries = vec![
            delivery("emp_01", &[("prod_5kg", stock_entry(10, 8, 1, 1))]),
            delivery("emp_02", &[("prod_5kg", stock_entry(8, 8, 0, 0)), ("prod_14kg", stock_entry(6, 4, 0, 2))]),
            delivery("emp_04", &[("prod_19kg", stock_entry(12, 12, 0, 0))]),
        ];
        today.inventory = Some(Inventory {
            full: None,
            empty: Some(BTreeMap::from([(
                "prod_5kg".to_string(),
                EmptyInventory {
                    opening_stock: 40,
                    received: 16,
                    plant_dispatch: 30,
                    ..EmptyInventory::default()
                },
            )])),
        });
        save_daily_record(&store, today).await?;
        add_test_expense(&store, day(2024, 6, 2), 250.0).await?;

        let board = dashboard(&store, day(2024, 6, 2)).await?;

        // 5kg full: 100 carried - (9 + 1) - 8 = 82; 14kg: 0 - 6; 19kg: 0 - 12
        assert_eq!(board.total_full, 82 - 6 - 12);
        // 5kg empty: 40 + 16 - 30 = 26
        assert_eq!(board.total_empty, 26);
        assert_eq!(board.total_sales, 36);
        assert_eq!(board.new_connections, 1);
        assert_eq!(board.plant_dispatch, 30);
        assert_eq!(board.customer_returns, 32);
        assert_eq!(board.total_due, 3);
        assert_eq!(board.expense_total, 250.0);

        let five = board.sales_by_type.iter().find(|s| s.product_id == "prod_5kg").unwrap();
        assert_eq!(five.refill, 17);
        assert_eq!(five.total, 18);

        let leaders: Vec<&str> = board.top_by_sales.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(leaders, ["emp_02", "emp_04", "emp_01"]);
        assert_eq!(board.top_by_sales[0].metric, 14);
        assert_eq!(board.top_by_dues[0].employee_id, "emp_02");
        Ok(())
    }

    #[test]
    fn test_rank_truncates_and_drops_zero() {
        let mut employees: Vec<RankedEmployee> = (0..8)
            .map(|i| RankedEmployee {
                employee_id: format!("emp_{i}"),
                employee_name: String::new(),
                employee_avatar: String::new(),
                metric: i,
            })
            .collect();
        rank(&mut employees);
        assert_eq!(employees.len(), TOP_EMPLOYEES);
        assert_eq!(employees[0].metric, 7);
        assert!(employees.iter().all(|e| e.metric > 0));
    }
}
