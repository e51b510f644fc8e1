//! Catalog rule violations
//!
//! Every variant is a per-request rejection. Hosts turn them into
//! [`AppError`] (numeric code + details) and localise from the code.

use std::fmt;

use market_shared::error::{AppError, ErrorCode};
use market_shared::models::{CategoryId, MetadataFieldId, MetadataShape, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::RepoError;

/// Which uniqueness scope a category name collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameConflict {
    /// Another root category has the name
    RootDuplicate,
    /// A direct child of the same parent has the name
    SiblingDuplicate,
    /// The parent or one of its ancestors has the name
    AncestorDuplicate,
    /// A category in the renamed category's subtree has the name
    DescendantDuplicate,
}

impl NameConflict {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::RootDuplicate => ErrorCode::CategoryRootNameExists,
            Self::SiblingDuplicate => ErrorCode::CategorySiblingNameExists,
            Self::AncestorDuplicate => ErrorCode::CategoryAncestorNameExists,
            Self::DescendantDuplicate => ErrorCode::CategoryDescendantNameExists,
        }
    }
}

impl fmt::Display for NameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = match self {
            Self::RootDuplicate => "root",
            Self::SiblingDuplicate => "sibling",
            Self::AncestorDuplicate => "ancestor",
            Self::DescendantDuplicate => "descendant",
        };
        f.write_str(scope)
    }
}

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category name '{name}' duplicates {kind} category {conflicting_id}")]
    NameConflict {
        kind: NameConflict,
        name: String,
        conflicting_id: CategoryId,
    },

    #[error("Category {0} already has products")]
    ParentHasProducts(CategoryId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Category {0} has child categories")]
    CategoryHasChildren(CategoryId),

    #[error("Category {category_id} cannot be placed under {parent_id}")]
    CategoryCycle {
        category_id: CategoryId,
        parent_id: CategoryId,
    },

    #[error("Ancestor chain of category {category_id} loops back to {repeated_id}")]
    HierarchyCycle {
        category_id: CategoryId,
        repeated_id: CategoryId,
    },

    #[error("Category {0} is not a leaf")]
    ProductCategoryNotLeaf(CategoryId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Metadata field not found: {0}")]
    MetadataFieldNotFound(MetadataFieldId),

    #[error("Values are required for metadata field '{field}'")]
    MetadataValuesRequired { field: String },

    #[error("Duplicate value '{value}' for metadata field '{field}'")]
    DuplicateMetadataValue { field: String, value: String },

    #[error("Unknown metadata field '{field}'")]
    UnknownMetadataField { field: String },

    #[error("Value '{value}' is not allowed for metadata field '{field}'")]
    InvalidMetadataValue { field: String, value: String },

    #[error("Variation metadata is required")]
    MetadataRequired,

    #[error("Metadata fields {actual:?} do not match {expected:?}")]
    MetadataStructureMismatch {
        expected: MetadataShape,
        actual: MetadataShape,
    },

    #[error("Metadata field '{field}' is already assigned to category {category_id}")]
    DuplicateAssignment {
        category_id: CategoryId,
        field: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Result type for catalog rules
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Numeric code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NameConflict { kind, .. } => kind.error_code(),
            Self::ParentHasProducts(_) => ErrorCode::CategoryHasProducts,
            Self::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            Self::CategoryHasChildren(_) => ErrorCode::CategoryHasChildren,
            Self::CategoryCycle { .. } => ErrorCode::CategoryCycle,
            Self::HierarchyCycle { .. } => ErrorCode::CategoryHierarchyCorrupt,
            Self::ProductCategoryNotLeaf(_) => ErrorCode::ProductCategoryNotLeaf,
            Self::ProductNotFound(_) => ErrorCode::ProductNotFound,
            Self::MetadataFieldNotFound(_) => ErrorCode::MetadataFieldNotFound,
            Self::MetadataValuesRequired { .. } => ErrorCode::MetadataValuesRequired,
            Self::DuplicateMetadataValue { .. } => ErrorCode::MetadataDuplicateValue,
            Self::UnknownMetadataField { .. } => ErrorCode::MetadataUnknownField,
            Self::InvalidMetadataValue { .. } => ErrorCode::MetadataInvalidValue,
            Self::MetadataRequired => ErrorCode::MetadataRequired,
            Self::MetadataStructureMismatch { .. } => ErrorCode::MetadataStructureMismatch,
            Self::DuplicateAssignment { .. } => ErrorCode::MetadataAssignmentExists,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Store(e) => classify_repo_error(e),
        }
    }
}

fn classify_repo_error(e: &RepoError) -> ErrorCode {
    match e {
        RepoError::NotFound(_) => ErrorCode::NotFound,
        RepoError::Duplicate(_) => ErrorCode::AlreadyExists,
        RepoError::Validation(_) => ErrorCode::ValidationFailed,
        RepoError::Database(_) => ErrorCode::DatabaseError,
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let code = err.error_code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);

        match err {
            CatalogError::NameConflict {
                kind,
                name,
                conflicting_id,
            } => app
                .with_detail("scope", kind.to_string())
                .with_detail("name", name)
                .with_detail("conflicting_id", conflicting_id),
            CatalogError::ParentHasProducts(id)
            | CatalogError::CategoryNotFound(id)
            | CatalogError::CategoryHasChildren(id)
            | CatalogError::ProductCategoryNotLeaf(id) => app.with_detail("category_id", id),
            CatalogError::ProductNotFound(id) => app.with_detail("product_id", id),
            CatalogError::MetadataFieldNotFound(id) => app.with_detail("field_id", id),
            CatalogError::CategoryCycle {
                category_id,
                parent_id,
            } => app
                .with_detail("category_id", category_id)
                .with_detail("parent_id", parent_id),
            CatalogError::HierarchyCycle {
                category_id,
                repeated_id,
            } => {
                tracing::error!(category_id, repeated_id, "Category parent links form a cycle");
                app.with_detail("category_id", category_id)
                    .with_detail("repeated_id", repeated_id)
            }
            CatalogError::MetadataValuesRequired { field }
            | CatalogError::UnknownMetadataField { field } => app.with_detail("field", field),
            CatalogError::DuplicateMetadataValue { field, value }
            | CatalogError::InvalidMetadataValue { field, value } => {
                app.with_detail("field", field).with_detail("value", value)
            }
            CatalogError::MetadataStructureMismatch { expected, actual } => app
                .with_detail("expected", expected.into_iter().collect::<Vec<_>>())
                .with_detail("actual", actual.into_iter().collect::<Vec<_>>()),
            CatalogError::DuplicateAssignment { category_id, field } => app
                .with_detail("category_id", category_id)
                .with_detail("field", field),
            CatalogError::Store(e) => {
                tracing::error!(error = %e, error_code = %code, "Catalog store error");
                app
            }
            CatalogError::MetadataRequired | CatalogError::Validation(_) => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_conflict_codes() {
        assert_eq!(
            NameConflict::RootDuplicate.error_code(),
            ErrorCode::CategoryRootNameExists
        );
        assert_eq!(
            NameConflict::DescendantDuplicate.error_code(),
            ErrorCode::CategoryDescendantNameExists
        );
    }

    #[test]
    fn test_into_app_error_keeps_details() {
        let err = CatalogError::InvalidMetadataValue {
            field: "Color".to_string(),
            value: "Purple".to_string(),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::MetadataInvalidValue);
        let details = app.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "Color");
        assert_eq!(details.get("value").unwrap(), "Purple");
    }

    #[test]
    fn test_name_conflict_detail_scope() {
        let app: AppError = CatalogError::NameConflict {
            kind: NameConflict::SiblingDuplicate,
            name: "Shoes".to_string(),
            conflicting_id: 7,
        }
        .into();
        assert_eq!(app.code, ErrorCode::CategorySiblingNameExists);
        assert_eq!(app.details.unwrap().get("scope").unwrap(), "sibling");
    }

    #[test]
    fn test_lookup_misses_map_to_resource_codes() {
        let app: AppError = CatalogError::MetadataFieldNotFound(12).into();
        assert_eq!(app.code, ErrorCode::MetadataFieldNotFound);
        assert_eq!(app.details.unwrap().get("field_id").unwrap(), 12);
        assert_eq!(
            CatalogError::ProductNotFound(3).error_code(),
            ErrorCode::ProductNotFound
        );
        assert_eq!(
            CatalogError::HierarchyCycle { category_id: 1, repeated_id: 2 }.error_code(),
            ErrorCode::CategoryHierarchyCorrupt
        );
    }

    #[test]
    fn test_store_errors_map_to_system_codes() {
        let err = CatalogError::from(RepoError::Database("disk".to_string()));
        assert_eq!(err.error_code(), ErrorCode::DatabaseError);
        let err = CatalogError::from(RepoError::NotFound("x".to_string()));
        assert_eq!(err.error_code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_structure_mismatch_message() {
        let err = CatalogError::MetadataStructureMismatch {
            expected: ["Color".to_string()].into_iter().collect(),
            actual: ["Color".to_string(), "Size".to_string()].into_iter().collect(),
        };
        assert_eq!(
            err.to_string(),
            r#"Metadata fields {"Color", "Size"} do not match {"Color"}"#
        );
    }
}
