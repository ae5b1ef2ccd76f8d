//! Product entity - A cylinder size sold by the distributor.

use serde::{Deserialize, Serialize};

/// Cylinder product (e.g. "14.2kg") with its unit cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier such as `prod_14kg`
    pub id: String,
    /// Display name, usually the cylinder weight
    pub name: String,
    /// Cost of one refill
    pub unit_cost: f64,
}

impl Product {
    /// Builds a product from borrowed parts.
    #[must_use]
    pub fn new(id: &str, name: &str, unit_cost: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit_cost,
        }
    }
}
