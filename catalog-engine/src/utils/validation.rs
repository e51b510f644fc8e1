//! Input validation helpers
//!
//! Text hygiene for names entering the catalog. Uniqueness rules live in
//! [`crate::catalog::names`]; this only guards shape and length.

use crate::catalog::CatalogError;

/// Entity names: category, metadata field
pub const MAX_NAME_LEN: usize = 200;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CatalogError::Validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}
