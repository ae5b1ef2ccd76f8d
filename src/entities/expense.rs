//! Expense entity - Miscellaneous spending logged against a date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single expense line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    /// Category, one of [`crate::core::expense::EXPENSE_TYPES`] in practice
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    /// Who logged the expense
    pub entered_by: String,
}

/// Payload for creating an expense; the id is generated when missing.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(default)]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub entered_by: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub entered_by: Option<String>,
}

impl Expense {
    /// Shallow-merges the provided fields into this record.
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(entered_by) = patch.entered_by {
            self.entered_by = entered_by;
        }
    }
}
