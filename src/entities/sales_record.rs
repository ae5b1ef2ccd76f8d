//! Sales record - cylinders sold per employee, product and payment mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count and money taken for one payment mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentEntry {
    /// Number of cylinders
    pub nos: i64,
    pub amount: f64,
}

impl PaymentEntry {
    /// Adds another entry into this one.
    pub fn accumulate(&mut self, other: &Self) {
        self.nos += other.nos;
        self.amount += other.amount;
    }
}

/// Sales of one product split by payment mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesEntry {
    pub cash: PaymentEntry,
    pub digital: PaymentEntry,
    pub prepaid: PaymentEntry,
}

impl SalesEntry {
    /// Sum over all payment modes.
    #[must_use]
    pub fn total(&self) -> PaymentEntry {
        let mut total = self.cash;
        total.accumulate(&self.digital);
        total.accumulate(&self.prepaid);
        total
    }
}

/// One employee's sales on a day
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSales {
    pub employee_id: String,
    #[serde(default)]
    pub products: BTreeMap<String, SalesEntry>,
}

/// Sales register for a single date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub sales: Vec<EmployeeSales>,
}
