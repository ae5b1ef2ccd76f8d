//! Stock business logic - daily delivery records and the inventory sheet.
//!
//! A daily record holds what each employee took out and brought back, plus an
//! optional warehouse inventory split into full and empty cylinders. The
//! inventory follows one recurrence per product:
//!
//! - full closing = opening + received - (refill + nc)
//! - empty closing = opening + received - transfer out - defective - plant dispatch
//!
//! and every day's opening stock is the previous day's closing balance. Days
//! without a stored sheet are filled in by walking the records forward from
//! the earliest one, so gaps carry the last balance unchanged.

use crate::{
    entities::{DailyRecord, DailyStockEntry, EmptyInventory, FullInventory},
    errors::{Error, Result},
    store::{Database, Store},
};
use super::{MAX_COUNT, saturating_sum, validate_count};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Delivery totals for one product (or one employee) on one day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTotals {
    /// Full cylinders handed out
    pub full_given: i64,
    /// Empties brought back
    pub empty_collected: i64,
    /// Full cylinders sold as new connections
    pub new_connection: i64,
    /// Empties still owed by customers
    pub due: i64,
    /// Full cylinders sold as refills, `max(fullGiven - newConnection, 0)` per line
    pub refill: i64,
}

impl DeliveryTotals {
    fn add_line(&mut self, line: &crate::entities::StockEntry) {
        self.full_given = self.full_given.saturating_add(line.full_given);
        self.empty_collected = self.empty_collected.saturating_add(line.empty_collected);
        self.new_connection = self.new_connection.saturating_add(line.new_connection);
        self.due = self.due.saturating_add(line.due);
        let refill = line.full_given.saturating_sub(line.new_connection).max(0);
        self.refill = self.refill.saturating_add(refill);
    }

    /// Refills plus new connections.
    #[must_use]
    pub const fn sold(&self) -> i64 {
        self.refill.saturating_add(self.new_connection)
    }
}

/// Where a side of the inventory sheet came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum InventorySource {
    /// Saved for this date
    Stored,
    /// Opening stock carried from the closing balance of an earlier record
    CarriedForward {
        /// Date of the record the balance came from
        from: NaiveDate,
    },
    /// No earlier data, everything starts at zero
    Blank,
}

/// Inventory for one product on the sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLine {
    pub product_id: String,
    pub product_name: String,
    pub full: FullInventory,
    pub full_closing: i64,
    pub empty: EmptyInventory,
    pub empty_closing: i64,
}

/// The resolved inventory sheet for a date.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySheet {
    pub date: NaiveDate,
    pub full_source: InventorySource,
    pub empty_source: InventorySource,
    pub lines: Vec<InventoryLine>,
    /// Sum of full closing balances over all products
    pub total_full: i64,
    /// Sum of empty closing balances over all products
    pub total_empty: i64,
}

/// Outstanding cylinders owed through one employee.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDue {
    pub employee_id: String,
    pub employee_name: String,
    pub employee_avatar: String,
    /// Due count per product id
    pub dues: BTreeMap<String, i64>,
    pub total: i64,
}

/// One employee's delivery totals for a day.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDelivery {
    pub employee_id: String,
    pub employee_name: String,
    pub employee_avatar: String,
    #[serde(flatten)]
    pub totals: DeliveryTotals,
}

/// Retrieves every daily record ordered by date.
pub async fn list_daily_records(store: &Store) -> Result<Vec<DailyRecord>> {
    Ok(store
        .read(|db| {
            let mut records = db.daily_records.clone();
            records.sort_by_key(|r| r.date);
            records
        })
        .await)
}

/// Finds the record stored for `date`, if any.
pub async fn get_daily_record(store: &Store, date: NaiveDate) -> Result<Option<DailyRecord>> {
    Ok(store
        .read(|db| db.daily_records.iter().find(|r| r.date == date).cloned())
        .await)
}

/// Saves the record for its date, replacing any existing one.
///
/// If the record carries a full inventory, the refill and new connection
/// counts of every delivered product are recomputed from the deliveries so
/// the stored sheet always agrees with them.
///
/// # Errors
/// Returns [`Error::Validation`] if any
/// count is out of range.
pub async fn save_daily_record(store: &Store, mut record: DailyRecord) -> Result<DailyRecord> {
    validate_record(&record)?;
    apply_delivery_totals(&mut record);

    let saved = store
        .write(|db| {
            match db.daily_records.iter_mut().find(|r| r.date == record.date) {
                Some(existing) => *existing = record.clone(),
                None => db.daily_records.push(record.clone()),
            }
            Ok(record)
        })
        .await?;
    info!(date = %saved.date, deliveries = saved.deliveries.len(), "Saved daily record");
    Ok(saved)
}

/// Checks every count in a record before it is stored.
///
/// Opening stock may be negative, since it carries a closing balance that can
/// go below zero. Every other count must lie in `0..=MAX_COUNT`.
pub fn validate_record(record: &DailyRecord) -> Result<()> {
    for entry in &record.deliveries {
        for line in entry.products.values() {
            validate_count("fullGiven", line.full_given)?;
            validate_count("emptyCollected", line.empty_collected)?;
            validate_count("newConnection", line.new_connection)?;
            validate_count("due", line.due)?;
        }
    }
    for line in record.full_inventory().into_iter().flat_map(BTreeMap::values) {
        validate_opening(line.opening_stock)?;
        validate_count("received", line.received)?;
        validate_count("refill", line.refill)?;
        validate_count("nc", line.nc)?;
        validate_count("surrender", line.surrender)?;
    }
    for line in record.empty_inventory().into_iter().flat_map(BTreeMap::values) {
        validate_opening(line.opening_stock)?;
        validate_count("received", line.received)?;
        validate_count("transferOut", line.transfer_out)?;
        validate_count("defective", line.defective)?;
        validate_count("plantDispatch", line.plant_dispatch)?;
        validate_count("surrender", line.surrender)?;
    }
    Ok(())
}

fn validate_opening(opening_stock: i64) -> Result<()> {
    if opening_stock.unsigned_abs() > MAX_COUNT.unsigned_abs() {
        return Err(Error::validation(format!(
            "openingStock must be within {MAX_COUNT} of zero, got {opening_stock}"
        )));
    }
    Ok(())
}

/// Resolves the inventory sheet for `date`, carrying balances forward.
pub async fn resolve_inventory(store: &Store, date: NaiveDate) -> Result<InventorySheet> {
    Ok(store.read(|db| resolve_inventory_in(db, date)).await)
}

/// Outstanding dues per employee over all records up to and including `up_to`.
pub async fn employee_dues(store: &Store, up_to: NaiveDate) -> Result<Vec<EmployeeDue>> {
    Ok(store.read(|db| employee_dues_in(db, up_to)).await)
}

/// Sums the deliveries per product id.
#[must_use]
pub fn delivery_totals(deliveries: &[DailyStockEntry]) -> BTreeMap<String, DeliveryTotals> {
    let mut totals: BTreeMap<String, DeliveryTotals> = BTreeMap::new();
    for entry in deliveries {
        for (product_id, line) in &entry.products {
            totals.entry(product_id.clone()).or_default().add_line(line);
        }
    }
    totals
}

/// Overwrites `refill` and `nc` in the stored full inventory for every product
/// that appears in the record's deliveries.
pub fn apply_delivery_totals(record: &mut DailyRecord) {
    let totals = delivery_totals(&record.deliveries);
    let Some(full) = record.inventory.as_mut().and_then(|inv| inv.full.as_mut()) else {
        return;
    };
    for (product_id, t) in totals {
        let line = full.entry(product_id).or_default();
        line.refill = t.refill;
        line.nc = t.new_connection;
    }
}

/// Resolves the sheet for `date` against an already-borrowed document.
#[must_use]
pub fn resolve_inventory_in(db: &Database, date: NaiveDate) -> InventorySheet {
    let mut records: Vec<&DailyRecord> = db.daily_records.iter().filter(|r| r.date <= date).collect();
    records.sort_by_key(|r| r.date);

    let mut product_ids: Vec<String> = db.products.iter().map(|p| p.id.clone()).collect();
    let mut full_running: BTreeMap<String, i64> = BTreeMap::new();
    let mut empty_running: BTreeMap<String, i64> = BTreeMap::new();
    let mut last_full_date: Option<NaiveDate> = None;
    let mut last_empty_date: Option<NaiveDate> = None;

    let mut full_today: BTreeMap<String, FullInventory> = BTreeMap::new();
    let mut empty_today: BTreeMap<String, EmptyInventory> = BTreeMap::new();
    let mut full_source = InventorySource::Blank;
    let mut empty_source = InventorySource::Blank;

    for record in records {
        let stored_full = record.full_inventory();
        let stored_empty = record.empty_inventory();
        let deliveries = delivery_totals(&record.deliveries);

        for id in stored_full
            .into_iter()
            .flat_map(BTreeMap::keys)
            .chain(stored_empty.into_iter().flat_map(BTreeMap::keys))
            .chain(deliveries.keys())
        {
            if !product_ids.contains(id) {
                product_ids.push(id.clone());
            }
        }

        let mut full_lines = BTreeMap::new();
        let mut empty_lines = BTreeMap::new();
        for id in &product_ids {
            let mut full = stored_full
                .and_then(|m| m.get(id).copied())
                .unwrap_or_else(|| {
                    FullInventory::carried_from(full_running.get(id).copied().unwrap_or_default())
                });
            if let Some(t) = deliveries.get(id) {
                full.refill = t.refill;
                full.nc = t.new_connection;
            }
            let empty = stored_empty
                .and_then(|m| m.get(id).copied())
                .unwrap_or_else(|| {
                    EmptyInventory::carried_from(empty_running.get(id).copied().unwrap_or_default())
                });
            full_lines.insert(id.clone(), full);
            empty_lines.insert(id.clone(), empty);
        }

        if record.date == date {
            full_source = source_for(stored_full.is_some(), last_full_date);
            empty_source = source_for(stored_empty.is_some(), last_empty_date);
            full_today = full_lines;
            empty_today = empty_lines;
        } else {
            for (id, line) in &full_lines {
                full_running.insert(id.clone(), line.closing_balance());
            }
            for (id, line) in &empty_lines {
                empty_running.insert(id.clone(), line.closing_balance());
            }
            last_full_date = Some(record.date);
            last_empty_date = Some(record.date);
        }
    }

    // No record for the date itself: open every product on the carried balance
    if full_today.is_empty() && empty_today.is_empty() {
        full_source = source_for(false, last_full_date);
        empty_source = source_for(false, last_empty_date);
    }

    let names: HashMap<&str, &str> = db
        .products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let lines: Vec<InventoryLine> = product_ids
        .iter()
        .map(|id| {
            let full = full_today.get(id).copied().unwrap_or_else(|| {
                FullInventory::carried_from(full_running.get(id).copied().unwrap_or_default())
            });
            let empty = empty_today.get(id).copied().unwrap_or_else(|| {
                EmptyInventory::carried_from(empty_running.get(id).copied().unwrap_or_default())
            });
            InventoryLine {
                product_id: id.clone(),
                product_name: names.get(id.as_str()).map_or_else(|| id.clone(), ToString::to_string),
                full,
                full_closing: full.closing_balance(),
                empty,
                empty_closing: empty.closing_balance(),
            }
        })
        .collect();

    debug!(%date, products = lines.len(), ?full_source, ?empty_source, "Resolved inventory sheet");

    InventorySheet {
        date,
        full_source,
        empty_source,
        total_full: saturating_sum(lines.iter().map(|l| l.full_closing)),
        total_empty: saturating_sum(lines.iter().map(|l| l.empty_closing)),
        lines,
    }
}

const fn source_for(stored: bool, last: Option<NaiveDate>) -> InventorySource {
    match (stored, last) {
        (true, _) => InventorySource::Stored,
        (false, Some(from)) => InventorySource::CarriedForward { from },
        (false, None) => InventorySource::Blank,
    }
}

/// Computes dues per employee against an already-borrowed document.
#[must_use]
pub fn employee_dues_in(db: &Database, up_to: NaiveDate) -> Vec<EmployeeDue> {
    let mut dues: BTreeMap<&str, BTreeMap<String, i64>> = BTreeMap::new();
    for record in db.daily_records.iter().filter(|r| r.date <= up_to) {
        for entry in &record.deliveries {
            let per_product = dues.entry(entry.employee_id.as_str()).or_default();
            for (product_id, line) in &entry.products {
                let due = per_product.entry(product_id.clone()).or_default();
                *due = due.saturating_add(line.due);
            }
        }
    }

    let mut out: Vec<EmployeeDue> = dues
        .into_iter()
        .map(|(employee_id, dues)| {
            let (employee_name, employee_avatar) = employee_label(db, employee_id);
            EmployeeDue {
                employee_id: employee_id.to_string(),
                employee_name,
                employee_avatar,
                total: saturating_sum(dues.values().copied()),
                dues,
            }
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.employee_id.cmp(&b.employee_id)));
    out
}

/// Per-employee delivery totals for `date` against an already-borrowed document.
#[must_use]
pub fn employee_deliveries_in(db: &Database, date: NaiveDate) -> Vec<EmployeeDelivery> {
    let Some(record) = db.daily_records.iter().find(|r| r.date == date) else {
        return Vec::new();
    };

    let mut totals: BTreeMap<&str, DeliveryTotals> = BTreeMap::new();
    for entry in &record.deliveries {
        let t = totals.entry(entry.employee_id.as_str()).or_default();
        for line in entry.products.values() {
            t.add_line(line);
        }
    }

    totals
        .into_iter()
        .map(|(employee_id, totals)| {
            let (employee_name, employee_avatar) = employee_label(db, employee_id);
            EmployeeDelivery {
                employee_id: employee_id.to_string(),
                employee_name,
                employee_avatar,
                totals,
            }
        })
        .collect()
}

/// Display name and avatar, falling back to the id for removed employees.
fn employee_label(db: &Database, employee_id: &str) -> (String, String) {
    db.employees.iter().find(|e| e.id == employee_id).map_or_else(
        || {
            (
                employee_id.to_string(),
                super::employee::placeholder_avatar(employee_id),
            )
        },
        |e| (e.name.clone(), e.avatar_url.clone()),
    )
}
