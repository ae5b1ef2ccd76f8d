//! Legacy layout migration.
//!
//! Older data files stored a daily record as
//! `{ date, entries, inventoryFull, inventoryEmpty }`. The current layout is
//! `{ date, deliveries, inventory: { full, empty } }`. Migration works on the
//! raw JSON so that old files never have to match the typed records.

use serde_json::{Map, Value};

const LEGACY_KEYS: [&str; 3] = ["entries", "inventoryFull", "inventoryEmpty"];

/// Whether a raw daily record still uses the legacy layout.
#[must_use]
pub fn is_legacy_record(record: &Value) -> bool {
    record
        .as_object()
        .is_some_and(|obj| LEGACY_KEYS.iter().any(|k| obj.contains_key(*k)))
}

/// Rewrites every legacy daily record in `doc`, returning how many changed.
pub fn migrate_document(doc: &mut Value) -> usize {
    let Some(records) = doc.get_mut("dailyRecords").and_then(Value::as_array_mut) else {
        return 0;
    };

    records
        .iter_mut()
        .filter(|r| is_legacy_record(r))
        .filter_map(Value::as_object_mut)
        .map(migrate_record)
        .count()
}

fn migrate_record(record: &mut Map<String, Value>) {
    let entries = record.remove("entries");
    let legacy_full = record.remove("inventoryFull");
    let legacy_empty = record.remove("inventoryEmpty");

    let deliveries = entries
        .or_else(|| record.remove("deliveries"))
        .unwrap_or_else(|| Value::Array(Vec::new()));
    record.insert("deliveries".to_string(), deliveries);

    let mut inventory = match record.remove("inventory") {
        Some(Value::Object(existing)) => existing,
        _ => Map::new(),
    };
    if let Some(full) = legacy_full {
        inventory.insert("full".to_string(), full);
    }
    if let Some(empty) = legacy_empty {
        inventory.insert("empty".to_string(), empty);
    }
    if !inventory.is_empty() {
        record.insert("inventory".to_string(), Value::Object(inventory));
    }
}
