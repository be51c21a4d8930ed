//! Leaf selection for coarse mutations.
//!
//! A responder usually knows only the category of a person being counted, so
//! the UI lets them increment or decrement at any depth of the tree. These
//! functions map a path to the single leaf that actually changes.
//!
//! Increments fill in missing components with the most favorable status:
//! the last health label and the first evacuation label. Decrements remove
//! one unit from the first positive leaf under the path in canonical order,
//! not necessarily the leaf most recently incremented.

use std::collections::BTreeMap;

use muster_types::{LeafKey, NodePath, Taxonomy};

use crate::TallyError;

/// Pick the leaf an increment of `path` lands on.
///
/// # Errors
///
/// Returns [`TallyError::RootNotAddressable`] for the root path and
/// [`TallyError::UnknownNode`] if `path` is outside `taxonomy`.
pub fn increment_target(taxonomy: &Taxonomy, path: NodePath) -> Result<LeafKey, TallyError> {
    if !taxonomy.contains_path(path) {
        return Err(TallyError::UnknownNode { path });
    }
    match path {
        NodePath::Root => Err(TallyError::RootNotAddressable),
        NodePath::Category(category) => Ok(LeafKey {
            category,
            health: taxonomy.last_health(),
            evacuation: taxonomy.first_evacuation(),
        }),
        NodePath::Health(category, health) => Ok(LeafKey {
            category,
            health,
            evacuation: taxonomy.first_evacuation(),
        }),
        NodePath::Leaf(key) => Ok(key),
    }
}

/// Pick the leaf a decrement of `path` takes from.
///
/// Returns `None` when every leaf under `path` is zero.
pub fn decrement_target(counts: &BTreeMap<LeafKey, u32>, path: NodePath) -> Option<LeafKey> {
    // BTreeMap iteration follows LeafKey's Ord, which is canonical order.
    counts
        .iter()
        .find(|&(key, count)| *count > 0 && path.contains(*key))
        .map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use muster_types::{CategoryIx, HealthIx};

    use super::*;

    fn zeroed(taxonomy: &Taxonomy) -> BTreeMap<LeafKey, u32> {
        taxonomy.leaves().map(|k| (k, 0)).collect()
    }

    #[test]
    fn category_increment_uses_best_case_bucket() {
        let taxonomy = Taxonomy::standard();
        let target = increment_target(&taxonomy, NodePath::Category(CategoryIx(0)));
        assert_eq!(target, Ok(LeafKey::new(0, 3, 0)));
    }

    #[test]
    fn health_increment_uses_first_evacuation_status() {
        let taxonomy = Taxonomy::standard();
        let target = increment_target(&taxonomy, NodePath::Health(CategoryIx(2), HealthIx(1)));
        assert_eq!(target, Ok(LeafKey::new(2, 1, 0)));
    }

    #[test]
    fn leaf_increment_is_exact() {
        let taxonomy = Taxonomy::standard();
        let key = LeafKey::new(1, 2, 3);
        assert_eq!(increment_target(&taxonomy, NodePath::Leaf(key)), Ok(key));
    }

    #[test]
    fn root_increment_is_rejected() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(
            increment_target(&taxonomy, NodePath::Root),
            Err(TallyError::RootNotAddressable)
        );
    }

    #[test]
    fn foreign_path_is_rejected() {
        let taxonomy = Taxonomy::standard();
        let path = NodePath::Category(CategoryIx(7));
        assert_eq!(
            increment_target(&taxonomy, path),
            Err(TallyError::UnknownNode { path })
        );
    }

    #[test]
    fn decrement_on_empty_subtree_finds_nothing() {
        let taxonomy = Taxonomy::standard();
        let counts = zeroed(&taxonomy);
        assert_eq!(decrement_target(&counts, NodePath::Root), None);
    }

    #[test]
    fn decrement_picks_first_positive_leaf_in_canonical_order() {
        let taxonomy = Taxonomy::standard();
        let mut counts = zeroed(&taxonomy);
        counts.insert(LeafKey::new(1, 3, 0), 2);
        counts.insert(LeafKey::new(1, 0, 2), 1);
        counts.insert(LeafKey::new(0, 3, 3), 5);

        let women = NodePath::Category(CategoryIx(1));
        assert_eq!(decrement_target(&counts, women), Some(LeafKey::new(1, 0, 2)));
        assert_eq!(decrement_target(&counts, NodePath::Root), Some(LeafKey::new(0, 3, 3)));
        assert_eq!(
            decrement_target(&counts, NodePath::Health(CategoryIx(1), HealthIx(3))),
            Some(LeafKey::new(1, 3, 0))
        );
    }
}
