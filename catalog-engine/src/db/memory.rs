//! In-memory catalog store
//!
//! Arena layout: categories live in one id-keyed map and the tree is a
//! separate parent -> children index, so no record points at another.

use std::collections::HashMap;

use market_shared::models::{
    Category, CategoryId, MetadataField, MetadataFieldId, MetadataFieldValueAssignment,
    MetadataShape, Product, ProductId, ProductVariation,
};
use parking_lot::RwLock;

use super::{CatalogStore, RepoError, RepoResult};

#[derive(Debug, Default)]
struct Inner {
    categories: HashMap<CategoryId, Category>,
    /// parent -> children (None = roots), in insertion order
    children: HashMap<Option<CategoryId>, Vec<CategoryId>>,
    fields: HashMap<MetadataFieldId, MetadataField>,
    assignments: HashMap<CategoryId, Vec<MetadataFieldValueAssignment>>,
    products: HashMap<ProductId, Product>,
    /// category -> products referencing it
    products_by_category: HashMap<CategoryId, Vec<ProductId>>,
    variations: HashMap<ProductId, Vec<ProductVariation>>,
}

/// Catalog store kept entirely in memory
///
/// Reads share the lock; every write takes it exclusively, so a reader
/// never observes a half-applied mutation.
#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for MemoryCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryCatalogStore")
            .field("categories_count", &inner.categories.len())
            .field("fields_count", &inner.fields.len())
            .field("products_count", &inner.products.len())
            .finish()
    }
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Category - Write
    // =========================================================================

    /// Insert a category; its parent must already exist
    pub fn insert_category(&self, category: Category) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if inner.categories.contains_key(&category.id) {
            return Err(RepoError::Duplicate(format!(
                "Category {} already exists",
                category.id
            )));
        }
        if let Some(parent_id) = category.parent_id
            && !inner.categories.contains_key(&parent_id)
        {
            return Err(RepoError::NotFound(format!(
                "Parent category {} not found",
                parent_id
            )));
        }

        inner
            .children
            .entry(category.parent_id)
            .or_default()
            .push(category.id);
        inner.categories.insert(category.id, category);
        Ok(())
    }

    /// Rename a category and move it under `parent_id`
    pub fn update_category(
        &self,
        id: CategoryId,
        name: impl Into<String>,
        parent_id: Option<CategoryId>,
    ) -> RepoResult<Category> {
        let mut inner = self.inner.write();
        if let Some(pid) = parent_id
            && !inner.categories.contains_key(&pid)
        {
            return Err(RepoError::NotFound(format!(
                "Parent category {} not found",
                pid
            )));
        }

        let old_parent = inner
            .categories
            .get(&id)
            .map(|c| c.parent_id)
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        if old_parent != parent_id {
            if let Some(siblings) = inner.children.get_mut(&old_parent) {
                siblings.retain(|child| *child != id);
            }
            inner.children.entry(parent_id).or_default().push(id);
        }

        let category = inner
            .categories
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;
        category.name = name.into();
        category.parent_id = parent_id;
        Ok(category.clone())
    }

    // =========================================================================
    // Metadata - Write
    // =========================================================================

    pub fn insert_field(&self, field: MetadataField) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if inner
            .fields
            .values()
            .any(|f| f.id == field.id || f.name == field.name)
        {
            return Err(RepoError::Duplicate(format!(
                "Metadata field '{}' already exists",
                field.name
            )));
        }
        inner.fields.insert(field.id, field);
        Ok(())
    }

    /// Attach a field to a category; one assignment per (category, field)
    pub fn insert_assignment(&self, assignment: MetadataFieldValueAssignment) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if !inner.categories.contains_key(&assignment.category_id) {
            return Err(RepoError::NotFound(format!(
                "Category {} not found",
                assignment.category_id
            )));
        }
        if !inner.fields.contains_key(&assignment.field.id) {
            return Err(RepoError::NotFound(format!(
                "Metadata field {} not found",
                assignment.field.id
            )));
        }

        let level = inner.assignments.entry(assignment.category_id).or_default();
        if level.iter().any(|a| a.field.id == assignment.field.id) {
            return Err(RepoError::Duplicate(format!(
                "Metadata field {} already assigned to category {}",
                assignment.field.id, assignment.category_id
            )));
        }
        level.push(assignment);
        Ok(())
    }

    // =========================================================================
    // Product - Write
    // =========================================================================

    pub fn insert_product(&self, product: Product) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if !inner.categories.contains_key(&product.category_id) {
            return Err(RepoError::NotFound(format!(
                "Category {} not found",
                product.category_id
            )));
        }
        if inner.products.contains_key(&product.id) {
            return Err(RepoError::Duplicate(format!(
                "Product {} already exists",
                product.id
            )));
        }
        inner
            .products_by_category
            .entry(product.category_id)
            .or_default()
            .push(product.id);
        inner.products.insert(product.id, product);
        Ok(())
    }

    /// Products whose category is in `category_ids`
    pub fn find_products_in<'a>(
        &self,
        category_ids: impl IntoIterator<Item = &'a CategoryId>,
    ) -> Vec<Product> {
        let inner = self.inner.read();
        category_ids
            .into_iter()
            .filter_map(|id| inner.products_by_category.get(id))
            .flatten()
            .filter_map(|pid| inner.products.get(pid).cloned())
            .collect()
    }

    pub fn insert_variation(&self, variation: ProductVariation) -> RepoResult<()> {
        let mut inner = self.inner.write();
        if !inner.products.contains_key(&variation.product_id) {
            return Err(RepoError::NotFound(format!(
                "Product {} not found",
                variation.product_id
            )));
        }
        let variations = inner.variations.entry(variation.product_id).or_default();
        if variations.iter().any(|v| v.id == variation.id) {
            return Err(RepoError::Duplicate(format!(
                "Variation {} already exists",
                variation.id
            )));
        }
        variations.push(variation);
        Ok(())
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn find_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        Ok(self.inner.read().categories.get(&id).cloned())
    }

    fn find_children(&self, parent_id: Option<CategoryId>) -> RepoResult<Vec<Category>> {
        let inner = self.inner.read();
        let children = inner
            .children
            .get(&parent_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.categories.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(children)
    }

    fn find_metadata_field(&self, id: MetadataFieldId) -> RepoResult<Option<MetadataField>> {
        Ok(self.inner.read().fields.get(&id).cloned())
    }

    fn find_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        Ok(self.inner.read().products.get(&id).cloned())
    }

    fn find_metadata_assignments(
        &self,
        category_id: CategoryId,
    ) -> RepoResult<Vec<MetadataFieldValueAssignment>> {
        Ok(self
            .inner
            .read()
            .assignments
            .get(&category_id)
            .cloned()
            .unwrap_or_default())
    }

    fn category_has_products(&self, category_id: CategoryId) -> RepoResult<bool> {
        Ok(self
            .inner
            .read()
            .products_by_category
            .get(&category_id)
            .is_some_and(|products| !products.is_empty()))
    }

    fn find_sibling_variation_shapes(
        &self,
        product_id: ProductId,
        exclude_variation: Option<i64>,
    ) -> RepoResult<Vec<MetadataShape>> {
        let inner = self.inner.read();
        let shapes = inner
            .variations
            .get(&product_id)
            .map(|variations| {
                variations
                    .iter()
                    .filter(|v| Some(v.id) != exclude_variation)
                    .map(ProductVariation::shape)
                    .collect()
            })
            .unwrap_or_default();
        Ok(shapes)
    }
}
