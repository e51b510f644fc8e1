//! Category Model

use serde::{Deserialize, Serialize};

use crate::util::{now_millis, snowflake_id};

/// Category identifier (snowflake i64)
pub type CategoryId = i64;

/// Category entity
///
/// A node in the catalog tree. The parent is a plain id reference; children
/// are not stored on the node, they are independent records pointing back at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Parent category (None = root)
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Creation time (Unix millis)
    pub created_at: i64,
}

impl Category {
    /// Build a new category record with a fresh id
    pub fn new(name: impl Into<String>, parent_id: Option<CategoryId>) -> Self {
        Self {
            id: snowflake_id(),
            name: name.into(),
            parent_id,
            created_at: now_millis(),
        }
    }

    /// Build a category record with a caller-chosen id
    pub fn with_id(id: CategoryId, name: impl Into<String>, parent_id: Option<CategoryId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            created_at: now_millis(),
        }
    }

    /// Case-insensitive name comparison used by every uniqueness scope
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}
