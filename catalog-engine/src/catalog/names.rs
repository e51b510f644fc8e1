//! Category name uniqueness
//!
//! A name must be unique, case-insensitively, within four overlapping
//! scopes: the root set (for roots), the sibling set (for children), the
//! parent's ancestor chain, and, on rename, the category's own subtree.
//! Names are compared as given; trimming is up to the caller.

use market_shared::models::Category;

use super::error::{CatalogError, CatalogResult, NameConflict};
use super::tree::CategoryTree;
use crate::db::CatalogStore;

pub struct NameUniquenessValidator<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    tree: CategoryTree<'a, S>,
}

impl<'a, S: CatalogStore + ?Sized> NameUniquenessValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            tree: CategoryTree::new(store),
        }
    }

    /// Check a name for a category about to be created under `parent`
    ///
    /// Order: root duplicate, sibling duplicate, parent has products,
    /// ancestor duplicate. The first violation is returned.
    pub fn validate_new(&self, name: &str, parent: Option<&Category>) -> CatalogResult<()> {
        self.check_scope(name, parent, None)
    }

    /// Check a new name (and possibly new parent) for an existing category
    ///
    /// Runs the creation checks against the target parent's scope with the
    /// category itself excluded, then rejects a name used anywhere in the
    /// category's subtree. Moving a category under itself or one of its
    /// descendants fails first with `CategoryCycle`.
    pub fn validate_rename(
        &self,
        new_name: &str,
        category: &Category,
        parent: Option<&Category>,
    ) -> CatalogResult<()> {
        if let Some(parent) = parent
            && category.parent_id != Some(parent.id)
            && self.tree.is_in_subtree(category, parent)?
        {
            return Err(CatalogError::CategoryCycle {
                category_id: category.id,
                parent_id: parent.id,
            });
        }

        self.check_scope(new_name, parent, Some(category))?;

        if let Some(hit) = self
            .tree
            .descendants(category)?
            .into_iter()
            .find(|d| d.name_matches(new_name))
        {
            return Err(conflict(NameConflict::DescendantDuplicate, new_name, &hit));
        }

        Ok(())
    }

    fn check_scope(
        &self,
        name: &str,
        parent: Option<&Category>,
        renamed: Option<&Category>,
    ) -> CatalogResult<()> {
        let is_other = |c: &Category| renamed.is_none_or(|r| r.id != c.id);

        let Some(parent) = parent else {
            if let Some(hit) = self
                .tree
                .roots()?
                .into_iter()
                .find(|c| is_other(c) && c.name_matches(name))
            {
                return Err(conflict(NameConflict::RootDuplicate, name, &hit));
            }
            return Ok(());
        };

        if let Some(hit) = self
            .tree
            .children(parent)?
            .into_iter()
            .find(|c| is_other(c) && c.name_matches(name))
        {
            return Err(conflict(NameConflict::SiblingDuplicate, name, &hit));
        }

        if self.store.category_has_products(parent.id)? {
            return Err(CatalogError::ParentHasProducts(parent.id));
        }

        if let Some(hit) = self
            .tree
            .ancestor_chain(parent)?
            .into_iter()
            .find(|c| is_other(c) && c.name_matches(name))
        {
            return Err(conflict(NameConflict::AncestorDuplicate, name, &hit));
        }

        Ok(())
    }
}

fn conflict(kind: NameConflict, name: &str, hit: &Category) -> CatalogError {
    CatalogError::NameConflict {
        kind,
        name: name.to_string(),
        conflicting_id: hit.id,
    }
}
