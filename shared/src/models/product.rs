//! Product Model
//!
//! Only the parts of a product the catalog rules look at: its leaf
//! category and the metadata carried by each sellable variation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::category::CategoryId;

/// Product identifier
pub type ProductId = i64;

/// Variation metadata: field name -> scalar value
pub type VariationMetadata = BTreeMap<String, Value>;

/// Set of field names used by a variation
pub type MetadataShape = BTreeSet<String>;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Leaf category reference
    pub category_id: CategoryId,
}

/// Sellable variation of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariation {
    pub id: i64,
    pub product_id: ProductId,
    #[serde(default)]
    pub metadata: VariationMetadata,
}

impl ProductVariation {
    /// Field names used by this variation
    pub fn shape(&self) -> MetadataShape {
        self.metadata.keys().cloned().collect()
    }
}

/// Stringified form of a metadata value
///
/// Strings are taken verbatim (no JSON quotes); other scalars use their
/// JSON rendering, so `42` becomes "42" and `true` becomes "true".
pub fn metadata_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
