//! Data models
//!
//! Shared between the catalog engine and its host services (via API).
//! All IDs are `i64` snowflakes.

pub mod category;
pub mod metadata;
pub mod product;

// Re-exports
pub use category::*;
pub use metadata::*;
pub use product::*;
