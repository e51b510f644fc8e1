//! Unified error system for the catalog
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Category errors
//! - 2xxx: Metadata errors
//! - 3xxx: Product errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use market_shared::error::{AppError, ErrorCategory, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CategoryRootNameExists)
//!     .with_detail("name", "Electronics");
//!
//! assert_eq!(err.code.code(), 1002);
//! assert_eq!(err.code.category(), ErrorCategory::Category);
//! assert_eq!(err.http_status().as_u16(), 409);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
