//! Unified error codes for the catalog
//!
//! This module defines all error codes surfaced by the catalog engine to its
//! hosts. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Category errors
//! - 2xxx: Metadata errors
//! - 3xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Category ====================
    /// Category not found
    CategoryNotFound = 1001,
    /// Root category name already exists
    CategoryRootNameExists = 1002,
    /// Sibling category name already exists
    CategorySiblingNameExists = 1003,
    /// Name repeats a category in the ancestor chain
    CategoryAncestorNameExists = 1004,
    /// Name repeats a category in the subtree
    CategoryDescendantNameExists = 1005,
    /// Category has products and cannot take children
    CategoryHasProducts = 1006,
    /// Category has children
    CategoryHasChildren = 1007,
    /// Category would become its own ancestor
    CategoryCycle = 1008,
    /// Stored parent links loop back on themselves
    CategoryHierarchyCorrupt = 1009,

    // ==================== 2xxx: Metadata ====================
    /// Metadata field not found
    MetadataFieldNotFound = 2001,
    /// Assignment value string is blank
    MetadataValuesRequired = 2002,
    /// Assignment value string repeats a value
    MetadataDuplicateValue = 2003,
    /// Variation uses a field outside the effective schema
    MetadataUnknownField = 2004,
    /// Variation value not in the allowed set
    MetadataInvalidValue = 2005,
    /// Variation metadata is empty
    MetadataRequired = 2006,
    /// Variation field names differ from sibling variations
    MetadataStructureMismatch = 2007,
    /// Field already assigned to this category
    MetadataAssignmentExists = 2008,

    // ==================== 3xxx: Product ====================
    /// Product not found
    ProductNotFound = 3001,
    /// Product category is not a leaf
    ProductCategoryNotLeaf = 3002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    ///
    /// User-facing, localized text is produced by the host from the code.
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryRootNameExists => "A root category with this name already exists",
            ErrorCode::CategorySiblingNameExists => {
                "A category with this name already exists under the same parent"
            }
            ErrorCode::CategoryAncestorNameExists => {
                "Category name repeats a name in its ancestor chain"
            }
            ErrorCode::CategoryDescendantNameExists => {
                "Category name repeats a name in its subtree"
            }
            ErrorCode::CategoryHasProducts => "Category has associated products",
            ErrorCode::CategoryHasChildren => "Category has child categories",
            ErrorCode::CategoryCycle => "Category cannot be moved under its own subtree",
            ErrorCode::CategoryHierarchyCorrupt => "Category hierarchy contains a parent cycle",

            // Metadata
            ErrorCode::MetadataFieldNotFound => "Metadata field not found",
            ErrorCode::MetadataValuesRequired => "Metadata values are required",
            ErrorCode::MetadataDuplicateValue => "Metadata values contain a duplicate",
            ErrorCode::MetadataUnknownField => "Metadata field is not available for this category",
            ErrorCode::MetadataInvalidValue => "Metadata value is not allowed for this field",
            ErrorCode::MetadataRequired => "Variation metadata is required",
            ErrorCode::MetadataStructureMismatch => {
                "Variation metadata fields differ from other variations of the product"
            }
            ErrorCode::MetadataAssignmentExists => {
                "Metadata field is already assigned to this category"
            }

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductCategoryNotLeaf => "Products may only belong to leaf categories",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Category
            1001 => Ok(ErrorCode::CategoryNotFound),
            1002 => Ok(ErrorCode::CategoryRootNameExists),
            1003 => Ok(ErrorCode::CategorySiblingNameExists),
            1004 => Ok(ErrorCode::CategoryAncestorNameExists),
            1005 => Ok(ErrorCode::CategoryDescendantNameExists),
            1006 => Ok(ErrorCode::CategoryHasProducts),
            1007 => Ok(ErrorCode::CategoryHasChildren),
            1008 => Ok(ErrorCode::CategoryCycle),
            1009 => Ok(ErrorCode::CategoryHierarchyCorrupt),

            // Metadata
            2001 => Ok(ErrorCode::MetadataFieldNotFound),
            2002 => Ok(ErrorCode::MetadataValuesRequired),
            2003 => Ok(ErrorCode::MetadataDuplicateValue),
            2004 => Ok(ErrorCode::MetadataUnknownField),
            2005 => Ok(ErrorCode::MetadataInvalidValue),
            2006 => Ok(ErrorCode::MetadataRequired),
            2007 => Ok(ErrorCode::MetadataStructureMismatch),
            2008 => Ok(ErrorCode::MetadataAssignmentExists),

            // Product
            3001 => Ok(ErrorCode::ProductNotFound),
            3002 => Ok(ErrorCode::ProductCategoryNotLeaf),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
