//! Catalog Service - category and metadata rule checks over a store
//!
//! Every operation reads the store fresh and holds no lock of its own; the
//! store decides how concurrent reads and writes interleave.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use market_shared::models::{
    Category, CategoryId, MetadataDisplayEntry, MetadataField, MetadataFieldId, MetadataSchema,
    Product, ProductId, VariationMetadata,
};

use crate::catalog::{
    CatalogError, CatalogResult, CategoryTree, MetadataAggregator, MetadataFieldValueValidator,
    NameUniquenessValidator, SubtreeFilter, SubtreeIndexer,
};
use crate::core::Config;
use crate::db::CatalogStore;
use crate::utils::validation::validate_required_text;

fn log_rejection(operation: &'static str, err: &CatalogError) {
    tracing::warn!(
        operation,
        code = err.error_code().code(),
        "Rejected: {}",
        err
    );
}

// =============================================================================
// Service
// =============================================================================

pub struct CatalogService<S: CatalogStore + ?Sized> {
    store: Arc<S>,
    config: Config,
}

impl<S: CatalogStore + ?Sized> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: CatalogStore + ?Sized> std::fmt::Debug for CatalogService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: CatalogStore + ?Sized> CatalogService<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> CategoryTree<'_, S> {
        CategoryTree::new(self.store.as_ref())
    }

    fn names(&self) -> NameUniquenessValidator<'_, S> {
        NameUniquenessValidator::new(self.store.as_ref())
    }

    fn aggregator(&self) -> MetadataAggregator<'_, S> {
        MetadataAggregator::new(self.store.as_ref(), self.config.value_separator)
    }

    fn values(&self) -> MetadataFieldValueValidator {
        MetadataFieldValueValidator::new(self.config.value_separator)
    }

    /// Look up a category by id
    pub fn find_category(&self, id: CategoryId) -> CatalogResult<Category> {
        self.tree().category(id)
    }

    /// Look up a metadata field by id
    pub fn find_metadata_field(&self, id: MetadataFieldId) -> CatalogResult<MetadataField> {
        self.store
            .find_metadata_field(id)?
            .ok_or(CatalogError::MetadataFieldNotFound(id))
    }

    /// Look up a product by id
    pub fn find_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.store
            .find_product(id)?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    // =========================================================================
    // Category names
    // =========================================================================

    /// Validate the name of a category about to be created under `parent`
    pub fn validate_new_category_name(
        &self,
        name: &str,
        parent: Option<&Category>,
    ) -> CatalogResult<()> {
        self.names()
            .validate_new(name, parent)
            .inspect_err(|e| log_rejection("validate_new_category_name", e))?;
        tracing::debug!(name, parent_id = ?parent.map(|p| p.id), "Category name accepted");
        Ok(())
    }

    /// Validate a rename and/or re-parent of an existing category
    pub fn validate_renamed_category_name(
        &self,
        new_name: &str,
        category: &Category,
        parent: Option<&Category>,
    ) -> CatalogResult<()> {
        self.names()
            .validate_rename(new_name, category, parent)
            .inspect_err(|e| log_rejection("validate_renamed_category_name", e))?;
        tracing::debug!(
            category_id = category.id,
            new_name,
            parent_id = ?parent.map(|p| p.id),
            "Category rename accepted"
        );
        Ok(())
    }

    /// Non-blank and within the configured length
    pub fn validate_category_name_text(&self, name: &str) -> CatalogResult<()> {
        validate_required_text(name, "name", self.config.max_name_len)
            .inspect_err(|e| log_rejection("validate_category_name_text", e))
    }

    /// Reject moving `category` under itself or one of its descendants
    pub fn validate_category_move(
        &self,
        category: &Category,
        new_parent: Option<&Category>,
    ) -> CatalogResult<()> {
        let Some(parent) = new_parent else {
            return Ok(());
        };
        if self.tree().is_in_subtree(category, parent)? {
            let err = CatalogError::CategoryCycle {
                category_id: category.id,
                parent_id: parent.id,
            };
            log_rejection("validate_category_move", &err);
            return Err(err);
        }
        Ok(())
    }

    /// A category can be deleted once it has no children and no products
    pub fn validate_category_deletion(&self, category: &Category) -> CatalogResult<()> {
        self.check_deletion(category)
            .inspect_err(|e| log_rejection("validate_category_deletion", e))
    }

    fn check_deletion(&self, category: &Category) -> CatalogResult<()> {
        if !self.tree().is_leaf(category)? {
            return Err(CatalogError::CategoryHasChildren(category.id));
        }
        if self.store.category_has_products(category.id)? {
            return Err(CatalogError::ParentHasProducts(category.id));
        }
        Ok(())
    }

    /// Products attach to leaf categories only
    pub fn validate_product_category(&self, category: &Category) -> CatalogResult<()> {
        if !self.tree().is_leaf(category)? {
            let err = CatalogError::ProductCategoryNotLeaf(category.id);
            log_rejection("validate_product_category", &err);
            return Err(err);
        }
        Ok(())
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Collapsed field -> allowed values visible at `category`
    pub fn effective_metadata_schema(&self, category: &Category) -> CatalogResult<MetadataSchema> {
        self.aggregator().effective_schema(category)
    }

    /// Every assignment up the ancestor chain, leaf first, for display
    pub fn display_metadata(&self, category: &Category) -> CatalogResult<Vec<MetadataDisplayEntry>> {
        self.aggregator().display_metadata(category)
    }

    /// Parse a raw value string for `field_name`
    pub fn validate_assignment_values(
        &self,
        raw: &str,
        field_name: &str,
    ) -> CatalogResult<BTreeSet<String>> {
        self.values()
            .validate_assignment_values(raw, field_name)
            .inspect_err(|e| log_rejection("validate_assignment_values", e))
    }

    /// Check a new (category, field) assignment and parse its values
    pub fn validate_new_assignment(
        &self,
        category: &Category,
        field: &MetadataField,
        raw: &str,
    ) -> CatalogResult<BTreeSet<String>> {
        self.check_new_assignment(category, field, raw)
            .inspect_err(|e| log_rejection("validate_new_assignment", e))
    }

    fn check_new_assignment(
        &self,
        category: &Category,
        field: &MetadataField,
        raw: &str,
    ) -> CatalogResult<BTreeSet<String>> {
        let existing = self.store.find_metadata_assignments(category.id)?;
        if existing.iter().any(|a| a.field.id == field.id) {
            return Err(CatalogError::DuplicateAssignment {
                category_id: category.id,
                field: field.name.clone(),
            });
        }
        self.values().validate_assignment_values(raw, &field.name)
    }

    /// Validate metadata for a new variation of `product_id` in `leaf`
    pub fn validate_variation_metadata(
        &self,
        metadata: &VariationMetadata,
        leaf: &Category,
        product_id: ProductId,
    ) -> CatalogResult<()> {
        self.check_variation(metadata, leaf, product_id, None)
            .inspect_err(|e| log_rejection("validate_variation_metadata", e))
    }

    /// Like [`Self::validate_variation_metadata`] but for an existing
    /// variation, which is left out of the sibling comparison
    pub fn validate_variation_update(
        &self,
        metadata: &VariationMetadata,
        leaf: &Category,
        product_id: ProductId,
        variation_id: i64,
    ) -> CatalogResult<()> {
        self.check_variation(metadata, leaf, product_id, Some(variation_id))
            .inspect_err(|e| log_rejection("validate_variation_update", e))
    }

    fn check_variation(
        &self,
        metadata: &VariationMetadata,
        leaf: &Category,
        product_id: ProductId,
        exclude: Option<i64>,
    ) -> CatalogResult<()> {
        self.find_product(product_id)?;
        let schema = self.effective_metadata_schema(leaf)?;
        let shapes = self
            .store
            .find_sibling_variation_shapes(product_id, exclude)?;
        self.values()
            .validate_variation_metadata(metadata, &schema, &shapes)
    }

    // =========================================================================
    // Subtree
    // =========================================================================

    /// `category` plus every descendant id
    pub fn subtree_category_ids(&self, category: &Category) -> CatalogResult<HashSet<CategoryId>> {
        Ok(self.subtree_filter(category)?.into_ids())
    }

    pub fn subtree_filter(&self, category: &Category) -> CatalogResult<SubtreeFilter> {
        SubtreeIndexer::new(self.store.as_ref()).index(category)
    }
}
