//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::CategoryNotFound
            | Self::MetadataFieldNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::CategoryRootNameExists
            | Self::CategorySiblingNameExists
            | Self::CategoryAncestorNameExists
            | Self::CategoryDescendantNameExists
            | Self::CategoryHasProducts
            | Self::CategoryHasChildren
            | Self::MetadataAssignmentExists => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (well-formed but breaks a catalog rule)
            Self::CategoryCycle
            | Self::ProductCategoryNotLeaf
            | Self::MetadataUnknownField
            | Self::MetadataInvalidValue
            | Self::MetadataStructureMismatch => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::DatabaseError | Self::CategoryHierarchyCorrupt => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
