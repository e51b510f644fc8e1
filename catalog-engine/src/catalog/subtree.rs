//! Subtree expansion for browse-by-category queries

use std::collections::HashSet;

use market_shared::models::{Category, CategoryId, Product};

use super::error::CatalogResult;
use super::tree::CategoryTree;
use crate::db::CatalogStore;

/// Ids of a category and everything below it
///
/// The set always holds the root id, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeFilter {
    root: CategoryId,
    ids: HashSet<CategoryId>,
}

impl SubtreeFilter {
    pub fn root(&self) -> CategoryId {
        self.root
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &HashSet<CategoryId> {
        &self.ids
    }

    pub fn into_ids(self) -> HashSet<CategoryId> {
        self.ids
    }

    /// Keep the products whose category lies in the subtree
    pub fn filter_products<'p>(
        &self,
        products: impl IntoIterator<Item = &'p Product>,
    ) -> Vec<&'p Product> {
        products
            .into_iter()
            .filter(|p| self.contains(p.category_id))
            .collect()
    }
}

pub struct SubtreeIndexer<'a, S: CatalogStore + ?Sized> {
    tree: CategoryTree<'a, S>,
}

impl<'a, S: CatalogStore + ?Sized> SubtreeIndexer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            tree: CategoryTree::new(store),
        }
    }

    /// Expand `category` into itself plus all descendants
    ///
    /// Breadth first from `category`; only the subtree is visited.
    pub fn index(&self, category: &Category) -> CatalogResult<SubtreeFilter> {
        let ids = self.tree.descendant_ids(category)?;
        tracing::debug!(category_id = category.id, size = ids.len(), "Subtree indexed");
        Ok(SubtreeFilter {
            root: category.id,
            ids,
        })
    }
}
