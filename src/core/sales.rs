//! Sales business logic - the daily sales register.
//!
//! One register exists per date, listing for every employee and product how
//! many cylinders were paid for in cash, digitally or against prepaid orders.

use crate::{
    entities::{PaymentEntry, SalesEntry, SalesRecord},
    errors::Result,
    store::{Database, Store},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Totals of a sales register by product and payment mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub date: NaiveDate,
    /// Per-product totals split by payment mode
    pub by_product: BTreeMap<String, SalesEntry>,
    /// All products, split by payment mode
    pub by_mode: SalesEntry,
    /// Grand total over every product and mode
    pub total: PaymentEntry,
}

/// Retrieves every sales register ordered by date.
pub async fn list_sales_records(store: &Store) -> Result<Vec<SalesRecord>> {
    Ok(store
        .read(|db| {
            let mut records = db.sales_records.clone();
            records.sort_by_key(|r| r.date);
            records
        })
        .await)
}

/// Finds the sales register stored for `date`.
pub async fn get_sales_record(store: &Store, date: NaiveDate) -> Result<Option<SalesRecord>> {
    Ok(store
        .read(|db| db.sales_records.iter().find(|r| r.date == date).cloned())
        .await)
}

/// Saves the register for its date, replacing any existing one.
///
/// # Errors
/// Returns an error if any amount is negative or not finite, or any count is out of range.
pub async fn save_sales_record(store: &Store, record: SalesRecord) -> Result<SalesRecord> {
    for entry in record.sales.iter().flat_map(|s| s.products.values()) {
        for payment in [entry.cash, entry.digital, entry.prepaid] {
            super::validate_count("nos", payment.nos)?;
            super::validate_amount(payment.amount)?;
        }
    }

    let saved = store
        .write(|db| {
            match db.sales_records.iter_mut().find(|r| r.date == record.date) {
                Some(existing) => *existing = record.clone(),
                None => db.sales_records.push(record.clone()),
            }
            Ok(record)
        })
        .await?;
    info!(date = %saved.date, employees = saved.sales.len(), "Saved sales record");
    Ok(saved)
}

/// Summarises the register for `date`; an absent register sums to zero.
pub async fn sales_summary(store: &Store, date: NaiveDate) -> Result<SalesSummary> {
    Ok(store.read(|db| sales_summary_in(db, date)).await)
}

/// Summarises the register for `date` against an already-borrowed document.
#[must_use]
pub fn sales_summary_in(db: &Database, date: NaiveDate) -> SalesSummary {
    let mut summary = SalesSummary {
        date,
        ..SalesSummary::default()
    };
    let Some(record) = db.sales_records.iter().find(|r| r.date == date) else {
        return summary;
    };

    for (product_id, entry) in record.sales.iter().flat_map(|s| &s.products) {
        let slot = summary.by_product.entry(product_id.clone()).or_default();
        slot.cash.accumulate(&entry.cash);
        slot.digital.accumulate(&entry.digital);
        slot.prepaid.accumulate(&entry.prepaid);

        summary.by_mode.cash.accumulate(&entry.cash);
        summary.by_mode.digital.accumulate(&entry.digital);
        summary.by_mode.prepaid.accumulate(&entry.prepaid);
    }
    summary.total = summary.by_mode.total();
    summary
}
