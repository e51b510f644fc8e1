//! Metadata Field Model
//!
//! A metadata field is a catalog-global definition (e.g. "Color"). It is
//! attached to a category through an assignment that carries the allowed
//! value set for that category.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::category::CategoryId;

/// Metadata field identifier
pub type MetadataFieldId = i64;

/// Collapsed field name -> allowed values mapping visible at a category
pub type MetadataSchema = BTreeMap<String, BTreeSet<String>>;

/// Metadata field entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub id: MetadataFieldId,
    pub name: String,
}

/// Metadata field attached to a category with its allowed values
///
/// Keyed by (category_id, field.id). The field is embedded so aggregation
/// does not need a second lookup per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFieldValueAssignment {
    pub category_id: CategoryId,
    pub field: MetadataField,
    /// Distinct, trimmed, case-sensitive values
    pub values: BTreeSet<String>,
}

impl MetadataFieldValueAssignment {
    /// Serialized form of the value set, joined with `separator`
    pub fn raw_values(&self, separator: &str) -> String {
        self.values
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// One entry of the display listing (not collapsed across levels)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDisplayEntry {
    pub field_id: MetadataFieldId,
    pub field_name: String,
    pub raw_values: String,
}
