//! Persistence collaborator
//!
//! The catalog rules never own data; they read it through [`CatalogStore`].
//! Hosts back the trait with their database, [`MemoryCatalogStore`] is the
//! in-process implementation used by tests and small deployments.

pub mod memory;

pub use memory::MemoryCatalogStore;

use market_shared::models::{
    Category, CategoryId, MetadataField, MetadataFieldId, MetadataFieldValueAssignment,
    MetadataShape, Product, ProductId,
};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Clone, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Read access the catalog rules need from the store
///
/// Calls are synchronous; the host hands the engine a view that stays
/// consistent for one validate-then-write operation.
pub trait CatalogStore: Send + Sync {
    /// Find category by id
    fn find_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>>;

    /// Direct children of `parent_id`; `None` lists the root categories
    fn find_children(&self, parent_id: Option<CategoryId>) -> RepoResult<Vec<Category>>;

    /// Find metadata field by id
    fn find_metadata_field(&self, id: MetadataFieldId) -> RepoResult<Option<MetadataField>>;

    /// Find product by id
    fn find_product(&self, id: ProductId) -> RepoResult<Option<Product>>;

    /// Metadata assignments attached directly to a category
    fn find_metadata_assignments(
        &self,
        category_id: CategoryId,
    ) -> RepoResult<Vec<MetadataFieldValueAssignment>>;

    /// Whether any product references this category
    fn category_has_products(&self, category_id: CategoryId) -> RepoResult<bool>;

    /// Field-name sets of the product's variations, skipping `exclude_variation`
    fn find_sibling_variation_shapes(
        &self,
        product_id: ProductId,
        exclude_variation: Option<i64>,
    ) -> RepoResult<Vec<MetadataShape>>;
}
