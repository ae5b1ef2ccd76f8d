//! Daily stock record - deliveries per employee plus the day's inventory sheet.
//!
//! One record exists per calendar date. `deliveries` holds what each employee
//! took out and brought back; `inventory` holds the warehouse view split into
//! full and empty cylinders, keyed by product id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cylinder movement for one employee and one product on one day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockEntry {
    /// Full cylinders handed to the employee
    pub full_given: i64,
    /// Empty cylinders the employee brought back
    pub empty_collected: i64,
    /// Full cylinders that went out as new connections
    pub new_connection: i64,
    /// Empties still owed by customers
    pub due: i64,
}

/// All products moved by one employee on one day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStockEntry {
    pub employee_id: String,
    #[serde(default)]
    pub products: BTreeMap<String, StockEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Full-cylinder inventory line for one product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullInventory {
    pub opening_stock: i64,
    pub received: i64,
    pub refill: i64,
    pub nc: i64,
    pub surrender: i64,
}

impl FullInventory {
    /// Cylinders sold: refills plus new connections.
    #[must_use]
    pub const fn total_sales(&self) -> i64 {
        self.refill.saturating_add(self.nc)
    }

    /// `opening + received - (refill + nc)`
    #[must_use]
    pub const fn closing_balance(&self) -> i64 {
        self.opening_stock
            .saturating_add(self.received)
            .saturating_sub(self.total_sales())
    }

    /// A fresh line whose opening stock is the given balance.
    #[must_use]
    pub fn carried_from(closing: i64) -> Self {
        Self {
            opening_stock: closing,
            ..Self::default()
        }
    }
}

/// Empty-cylinder inventory line for one product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmptyInventory {
    pub opening_stock: i64,
    pub received: i64,
    pub transfer_out: i64,
    pub defective: i64,
    pub plant_dispatch: i64,
    pub surrender: i64,
}

impl EmptyInventory {
    /// `opening + received - transferOut - defective - plantDispatch`
    #[must_use]
    pub const fn closing_balance(&self) -> i64 {
        self.opening_stock
            .saturating_add(self.received)
            .saturating_sub(self.transfer_out)
            .saturating_sub(self.defective)
            .saturating_sub(self.plant_dispatch)
    }

    /// A fresh line whose opening stock is the given balance.
    #[must_use]
    pub fn carried_from(closing: i64) -> Self {
        Self {
            opening_stock: closing,
            ..Self::default()
        }
    }
}

/// Warehouse inventory for a day, either side may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<BTreeMap<String, FullInventory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<BTreeMap<String, EmptyInventory>>,
}

/// Stock record for a single date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub deliveries: Vec<DailyStockEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
}

impl DailyRecord {
    /// An empty record for `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            deliveries: Vec::new(),
            inventory: None,
        }
    }

    /// Stored full inventory, if any.
    #[must_use]
    pub fn full_inventory(&self) -> Option<&BTreeMap<String, FullInventory>> {
        self.inventory.as_ref().and_then(|inv| inv.full.as_ref())
    }

    /// Stored empty inventory, if any.
    #[must_use]
    pub fn empty_inventory(&self) -> Option<&BTreeMap<String, EmptyInventory>> {
        self.inventory.as_ref().and_then(|inv| inv.empty.as_ref())
    }
}
