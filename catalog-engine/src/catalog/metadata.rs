//! Metadata aggregation along the ancestor chain
//!
//! Fields assigned to a category are visible to all of its descendants.
//! When the same field name is assigned on several levels, the level
//! nearest to the queried category wins.

use market_shared::models::{
    Category, MetadataDisplayEntry, MetadataFieldValueAssignment, MetadataSchema,
};

use super::error::{CatalogError, CatalogResult};
use super::tree::CategoryTree;
use crate::db::CatalogStore;

pub struct MetadataAggregator<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    tree: CategoryTree<'a, S>,
    separator: char,
}

impl<'a, S: CatalogStore + ?Sized> MetadataAggregator<'a, S> {
    pub fn new(store: &'a S, separator: char) -> Self {
        Self {
            store,
            tree: CategoryTree::new(store),
            separator,
        }
    }

    /// Assignments per level, leaf first
    fn levels(&self, category: &Category) -> CatalogResult<Vec<Vec<MetadataFieldValueAssignment>>> {
        self.tree
            .ancestor_chain(category)?
            .iter()
            .map(|level| {
                self.store
                    .find_metadata_assignments(level.id)
                    .map_err(CatalogError::from)
            })
            .collect()
    }

    /// Collapsed field name -> allowed values visible at `category`
    pub fn effective_schema(&self, category: &Category) -> CatalogResult<MetadataSchema> {
        let levels = self.levels(category)?;
        let schema = merge_nearest_first(&levels);
        tracing::debug!(
            category_id = category.id,
            levels = levels.len(),
            fields = schema.len(),
            "Effective metadata schema resolved"
        );
        Ok(schema)
    }

    /// Every assignment visible at `category`, leaf level first
    ///
    /// Unlike [`Self::effective_schema`] nothing is collapsed: a field
    /// assigned on two levels appears twice.
    pub fn display_metadata(&self, category: &Category) -> CatalogResult<Vec<MetadataDisplayEntry>> {
        let separator = self.separator.to_string();
        let entries = self
            .levels(category)?
            .into_iter()
            .flatten()
            .map(|a| MetadataDisplayEntry {
                field_id: a.field.id,
                raw_values: a.raw_values(&separator),
                field_name: a.field.name,
            })
            .collect();
        Ok(entries)
    }
}

/// Merge per-level assignments, nearest level first
///
/// A field name is taken from the first level that defines it; later
/// (more distant) levels only contribute names not seen yet. Reversing the
/// input order reverses the precedence.
pub fn merge_nearest_first(levels: &[Vec<MetadataFieldValueAssignment>]) -> MetadataSchema {
    let mut schema = MetadataSchema::new();
    for assignment in levels.iter().flatten() {
        schema
            .entry(assignment.field.name.clone())
            .or_insert_with(|| assignment.values.clone());
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalogStore;
    use market_shared::models::MetadataField;
    use std::collections::BTreeSet;

    fn values(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|v| v.to_string()).collect()
    }

    fn assign(category_id: i64, field_id: i64, name: &str, vals: &[&str]) -> MetadataFieldValueAssignment {
        MetadataFieldValueAssignment {
            category_id,
            field: MetadataField {
                id: field_id,
                name: name.to_string(),
            },
            values: values(vals),
        }
    }

    /// Clothing(Color: Red,Blue; Material: Cotton) -> Shirts(Color: Green) -> Polo
    fn sample() -> MemoryCatalogStore {
        let store = MemoryCatalogStore::new();
        store.insert_category(Category::with_id(1, "Clothing", None)).unwrap();
        store.insert_category(Category::with_id(2, "Shirts", Some(1))).unwrap();
        store.insert_category(Category::with_id(3, "Polo", Some(2))).unwrap();
        for (id, name) in [(10, "Color"), (11, "Material")] {
            store
                .insert_field(MetadataField {
                    id,
                    name: name.to_string(),
                })
                .unwrap();
        }
        store.insert_assignment(assign(1, 10, "Color", &["Red", "Blue"])).unwrap();
        store.insert_assignment(assign(1, 11, "Material", &["Cotton"])).unwrap();
        store.insert_assignment(assign(2, 10, "Color", &["Green"])).unwrap();
        store
    }

    #[test]
    fn test_nearest_level_wins() {
        let store = sample();
        let aggregator = MetadataAggregator::new(&store, ',');

        let shirts = store.find_category_by_id(2).unwrap().unwrap();
        let schema = aggregator.effective_schema(&shirts).unwrap();
        assert_eq!(schema.get("Color"), Some(&values(&["Green"])));
        assert_eq!(schema.get("Material"), Some(&values(&["Cotton"])));

        let clothing = store.find_category_by_id(1).unwrap().unwrap();
        let schema = aggregator.effective_schema(&clothing).unwrap();
        assert_eq!(schema.get("Color"), Some(&values(&["Red", "Blue"])));
    }

    #[test]
    fn test_inherited_through_levels_without_assignments() {
        let store = sample();
        let aggregator = MetadataAggregator::new(&store, ',');
        let polo = store.find_category_by_id(3).unwrap().unwrap();
        let schema = aggregator.effective_schema(&polo).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("Color"), Some(&values(&["Green"])));
    }

    #[test]
    fn test_merge_order_decides_precedence() {
        let near = vec![assign(2, 10, "Color", &["Green"])];
        let far = vec![assign(1, 10, "Color", &["Red", "Blue"])];

        let schema = merge_nearest_first(&[near.clone(), far.clone()]);
        assert_eq!(schema["Color"], values(&["Green"]));

        let reversed = merge_nearest_first(&[far, near]);
        assert_eq!(reversed["Color"], values(&["Red", "Blue"]));
    }

    #[test]
    fn test_field_names_compare_exactly() {
        let levels = vec![
            vec![assign(2, 12, "Color ", &["Green"])],
            vec![assign(1, 10, "Color", &["Red"])],
        ];
        let schema = merge_nearest_first(&levels);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_display_keeps_every_level() {
        let store = sample();
        let aggregator = MetadataAggregator::new(&store, ',');
        let polo = store.find_category_by_id(3).unwrap().unwrap();

        let entries = aggregator.display_metadata(&polo).unwrap();
        let listed: Vec<_> = entries
            .iter()
            .map(|e| (e.field_id, e.field_name.as_str(), e.raw_values.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (10, "Color", "Green"),
                (10, "Color", "Blue,Red"),
                (11, "Material", "Cotton"),
            ]
        );
    }
}
