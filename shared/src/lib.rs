//! Shared types for the marketplace catalog
//!
//! Common types used by the catalog engine and its hosts: category,
//! metadata and variation models, error codes and the application error,
//! and id/time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;

pub use error::{AppError, ErrorCategory, ErrorCode};
