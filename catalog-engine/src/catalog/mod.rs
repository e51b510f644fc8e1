//! Category hierarchy and metadata rules
//!
//! - [`CategoryTree`]: ancestor / descendant traversal over the store
//! - [`NameUniquenessValidator`]: the category name scopes
//! - [`MetadataAggregator`]: nearest-wins metadata schema per category
//! - [`MetadataFieldValueValidator`]: assignment values and variation metadata
//! - [`SubtreeIndexer`]: category filter expansion for catalog browsing

pub mod error;
pub mod metadata;
pub mod names;
pub mod subtree;
pub mod tree;
pub mod values;

pub use error::{CatalogError, CatalogResult, NameConflict};
pub use metadata::{MetadataAggregator, merge_nearest_first};
pub use names::NameUniquenessValidator;
pub use subtree::{SubtreeFilter, SubtreeIndexer};
pub use tree::CategoryTree;
pub use values::MetadataFieldValueValidator;
