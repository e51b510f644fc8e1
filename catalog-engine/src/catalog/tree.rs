//! Category tree traversal
//!
//! A read-only view over the store. Categories are addressed by id and every
//! step of a walk is one lookup, so nothing here holds references between
//! nodes and a walk always sees the store's current state.

use std::collections::{HashSet, VecDeque};

use market_shared::models::{Category, CategoryId};

use super::error::{CatalogError, CatalogResult};
use crate::db::CatalogStore;

/// Traversal primitives over the category graph
pub struct CategoryTree<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: CatalogStore + ?Sized> CategoryTree<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch a category, failing with `CategoryNotFound`
    pub fn category(&self, id: CategoryId) -> CatalogResult<Category> {
        self.store
            .find_category_by_id(id)?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Categories from `category` up to its root, leaf first, inclusive
    ///
    /// Any depth is walked. A parent id seen twice means the stored links
    /// loop, reported as `HierarchyCycle` instead of walking forever.
    pub fn ancestor_chain(&self, category: &Category) -> CatalogResult<Vec<Category>> {
        let mut seen = HashSet::from([category.id]);
        let mut chain = vec![category.clone()];
        let mut next = category.parent_id;

        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                return Err(CatalogError::HierarchyCycle {
                    category_id: category.id,
                    repeated_id: parent_id,
                });
            }
            let parent = self.category(parent_id)?;
            next = parent.parent_id;
            chain.push(parent);
        }

        Ok(chain)
    }

    /// Direct children
    pub fn children(&self, category: &Category) -> CatalogResult<Vec<Category>> {
        Ok(self.store.find_children(Some(category.id))?)
    }

    /// Categories without a parent
    pub fn roots(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.store.find_children(None)?)
    }

    pub fn is_leaf(&self, category: &Category) -> CatalogResult<bool> {
        Ok(self.children(category)?.is_empty())
    }

    /// Every category below `category`, breadth first, excluding itself
    pub fn descendants(&self, category: &Category) -> CatalogResult<Vec<Category>> {
        let mut seen = HashSet::from([category.id]);
        let mut queue = VecDeque::from([category.id]);
        let mut found = Vec::new();

        while let Some(id) = queue.pop_front() {
            for child in self.store.find_children(Some(id))? {
                // A child is reachable from one parent only; the set guards
                // against a corrupted index listing it twice.
                if seen.insert(child.id) {
                    queue.push_back(child.id);
                    found.push(child);
                }
            }
        }

        Ok(found)
    }

    /// Ids of `category` and all of its descendants
    pub fn descendant_ids(&self, category: &Category) -> CatalogResult<HashSet<CategoryId>> {
        let mut ids = HashSet::from([category.id]);
        ids.extend(self.descendants(category)?.into_iter().map(|c| c.id));
        Ok(ids)
    }

    /// Whether `candidate` is `category` itself or lies in its subtree
    pub fn is_in_subtree(&self, category: &Category, candidate: &Category) -> CatalogResult<bool> {
        if candidate.id == category.id {
            return Ok(true);
        }
        // Walking up from the candidate touches only its chain, not the subtree.
        let chain = self.ancestor_chain(candidate)?;
        Ok(chain.iter().any(|c| c.id == category.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalogStore;

    /// root -> {a, b}, a -> {a1, a2}, a1 -> {deep}
    fn sample() -> MemoryCatalogStore {
        let store = MemoryCatalogStore::new();
        for (id, name, parent) in [
            (1, "root", None),
            (2, "a", Some(1)),
            (3, "b", Some(1)),
            (4, "a1", Some(2)),
            (5, "a2", Some(2)),
            (6, "deep", Some(4)),
        ] {
            store
                .insert_category(Category::with_id(id, name, parent))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_ancestor_chain_leaf_first() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let deep = tree.category(6).unwrap();

        let ids: Vec<_> = tree
            .ancestor_chain(&deep)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![6, 4, 2, 1]);
    }

    #[test]
    fn test_ancestor_chain_of_root_is_itself() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let root = tree.category(1).unwrap();
        assert_eq!(tree.ancestor_chain(&root).unwrap(), vec![root]);
    }

    #[test]
    fn test_ancestor_chain_has_no_depth_limit() {
        let store = MemoryCatalogStore::new();
        store.insert_category(Category::with_id(1, "level-1", None)).unwrap();
        for id in 2..=300 {
            store
                .insert_category(Category::with_id(id, format!("level-{id}"), Some(id - 1)))
                .unwrap();
        }
        let tree = CategoryTree::new(&store);
        let bottom = tree.category(300).unwrap();

        let chain = tree.ancestor_chain(&bottom).unwrap();
        assert_eq!(chain.len(), 300);
        assert_eq!(chain.first().unwrap().id, 300);
        assert_eq!(chain.last().unwrap().id, 1);
    }

    #[test]
    fn test_ancestor_chain_reports_stored_cycle() {
        let store = sample();
        // The store does not validate moves, so the root can be hung below
        // its own grandchild.
        store.update_category(1, "root", Some(6)).unwrap();
        let tree = CategoryTree::new(&store);
        let deep = tree.category(6).unwrap();
        assert!(matches!(
            tree.ancestor_chain(&deep),
            Err(CatalogError::HierarchyCycle { category_id: 6, repeated_id: 6 })
        ));
    }

    #[test]
    fn test_descendants_any_depth() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let a = tree.category(2).unwrap();

        let mut ids: Vec<_> = tree.descendants(&a).unwrap().iter().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[test]
    fn test_descendant_ids_inclusive() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let b = tree.category(3).unwrap();
        assert_eq!(tree.descendant_ids(&b).unwrap(), HashSet::from([3]));
    }

    #[test]
    fn test_children_and_leaf() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let root = tree.category(1).unwrap();
        assert_eq!(tree.children(&root).unwrap().len(), 2);
        assert!(!tree.is_leaf(&root).unwrap());
        assert!(tree.is_leaf(&tree.category(5).unwrap()).unwrap());
        assert_eq!(tree.roots().unwrap().len(), 1);
    }

    #[test]
    fn test_is_in_subtree() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        let a = tree.category(2).unwrap();
        assert!(tree.is_in_subtree(&a, &a).unwrap());
        assert!(tree.is_in_subtree(&a, &tree.category(6).unwrap()).unwrap());
        assert!(!tree.is_in_subtree(&a, &tree.category(3).unwrap()).unwrap());
    }

    #[test]
    fn test_missing_category() {
        let store = sample();
        let tree = CategoryTree::new(&store);
        assert!(matches!(
            tree.category(99),
            Err(CatalogError::CategoryNotFound(99))
        ));
    }
}
