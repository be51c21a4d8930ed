//! The three-level headcount taxonomy and the keys that address it.
//!
//! A [`Taxonomy`] is an explicit descriptor handed to the tally engine at
//! construction: three ordered label lists (category, health status,
//! evacuation status). Its cartesian product defines the set of countable
//! buckets, each addressed by a [`LeafKey`]. A [`NodePath`] is a prefix of a
//! leaf key and addresses an aggregate node of the tree.
//!
//! Labels only exist at the boundary. [`Taxonomy::resolve`] turns UI labels
//! into typed paths once; everything past that point works on indices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{CategoryIx, EvacuationIx, HealthIx};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building a taxonomy or resolving labels against it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    /// A level has no labels, so the product would be empty.
    #[error("taxonomy level {level} has no labels")]
    EmptyLevel {
        /// The empty level.
        level: TaxonomyLevel,
    },

    /// A label is empty or whitespace only.
    #[error("taxonomy level {level} contains a blank label")]
    BlankLabel {
        /// The level holding the blank label.
        level: TaxonomyLevel,
    },

    /// The same label appears twice within one level.
    #[error("taxonomy level {level} lists {label:?} more than once")]
    DuplicateLabel {
        /// The level holding the duplicate.
        level: TaxonomyLevel,
        /// The repeated label.
        label: String,
    },

    /// A label is not part of the level it was looked up in.
    #[error("unknown {level} label {label:?}")]
    UnknownLabel {
        /// The level the label was resolved against.
        level: TaxonomyLevel,
        /// The unrecognized label.
        label: String,
    },

    /// More labels were supplied than the tree has levels.
    #[error("path has {len} components, at most 3 are allowed")]
    PathTooLong {
        /// Number of supplied components.
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// One of the three levels of the headcount tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TaxonomyLevel {
    /// Level 0: demographic category.
    Category,
    /// Level 1: physical condition.
    Health,
    /// Level 2: evacuation progress.
    Evacuation,
}

impl core::fmt::Display for TaxonomyLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::Health => "health status",
            Self::Evacuation => "evacuation status",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Keys and paths
// ---------------------------------------------------------------------------

/// Full address of one countable bucket.
///
/// Field order gives the derived [`Ord`] the canonical enumeration order:
/// category-major, then health, then evacuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeafKey {
    /// Level 0 position.
    pub category: CategoryIx,
    /// Level 1 position.
    pub health: HealthIx,
    /// Level 2 position.
    pub evacuation: EvacuationIx,
}

impl LeafKey {
    /// Build a key from raw level positions.
    pub const fn new(category: usize, health: usize, evacuation: usize) -> Self {
        Self {
            category: CategoryIx(category),
            health: HealthIx(health),
            evacuation: EvacuationIx(evacuation),
        }
    }
}

/// A prefix of a [`LeafKey`], addressing one node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum NodePath {
    /// The whole tree (empty prefix).
    Root,
    /// A category node.
    Category(CategoryIx),
    /// A (category, health) node.
    Health(CategoryIx, HealthIx),
    /// A single leaf.
    Leaf(LeafKey),
}

impl NodePath {
    /// Number of key components in the path (0 to 3).
    pub const fn depth(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Category(_) => 1,
            Self::Health(..) => 2,
            Self::Leaf(_) => 3,
        }
    }

    /// Whether `key` lies in the subtree addressed by this path.
    pub const fn contains(self, key: LeafKey) -> bool {
        match self {
            Self::Root => true,
            Self::Category(c) => c.0 == key.category.0,
            Self::Health(c, h) => c.0 == key.category.0 && h.0 == key.health.0,
            Self::Leaf(leaf) => {
                leaf.category.0 == key.category.0
                    && leaf.health.0 == key.health.0
                    && leaf.evacuation.0 == key.evacuation.0
            }
        }
    }

    /// Whether this path is `other` or one of its ancestors.
    pub const fn is_prefix_of(self, other: Self) -> bool {
        match (self, other) {
            (Self::Root, _) => true,
            (Self::Category(c), Self::Category(oc) | Self::Health(oc, _)) => c.0 == oc.0,
            (Self::Category(c), Self::Leaf(k)) => c.0 == k.category.0,
            (Self::Health(c, h), Self::Health(oc, oh)) => c.0 == oc.0 && h.0 == oh.0,
            (Self::Health(c, h), Self::Leaf(k)) => c.0 == k.category.0 && h.0 == k.health.0,
            (Self::Leaf(a), Self::Leaf(b)) => {
                a.category.0 == b.category.0
                    && a.health.0 == b.health.0
                    && a.evacuation.0 == b.evacuation.0
            }
            _ => false,
        }
    }

    /// The path one level up, or `None` for the root.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Root => None,
            Self::Category(_) => Some(Self::Root),
            Self::Health(c, _) => Some(Self::Category(c)),
            Self::Leaf(k) => Some(Self::Health(k.category, k.health)),
        }
    }
}

impl From<LeafKey> for NodePath {
    fn from(key: LeafKey) -> Self {
        Self::Leaf(key)
    }
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// Default category labels.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Men", "Women", "Transgender", "Children (<18)"];

/// Default health status labels, worst to best.
pub const DEFAULT_HEALTH_STATUSES: [&str; 4] =
    ["Dead", "Seriously Injured", "Mildly Injured", "Not Injured"];

/// Default evacuation status labels, best to worst.
pub const DEFAULT_EVACUATION_STATUSES: [&str; 4] = [
    "Evacuated",
    "Being Evacuated",
    "Not Yet Evacuated",
    "Unaccounted / Missing",
];

/// Ordered label lists for the three levels of the headcount tree.
///
/// Every level is non-empty and free of duplicates; [`Taxonomy::new`]
/// enforces this so downstream code can rely on a non-empty product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Taxonomy {
    categories: Vec<String>,
    health: Vec<String>,
    evacuation: Vec<String>,
}

impl Taxonomy {
    /// Build a taxonomy from three ordered label lists.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if a level is empty, holds a blank label, or
    /// repeats a label.
    pub fn new(
        categories: Vec<String>,
        health: Vec<String>,
        evacuation: Vec<String>,
    ) -> Result<Self, TaxonomyError> {
        validate_level(TaxonomyLevel::Category, &categories)?;
        validate_level(TaxonomyLevel::Health, &health)?;
        validate_level(TaxonomyLevel::Evacuation, &evacuation)?;
        Ok(Self {
            categories,
            health,
            evacuation,
        })
    }

    /// The built-in 4x4x4 taxonomy used in the field.
    pub fn standard() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| (*s).to_owned()).collect(),
            health: DEFAULT_HEALTH_STATUSES.iter().map(|s| (*s).to_owned()).collect(),
            evacuation: DEFAULT_EVACUATION_STATUSES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }

    /// Category labels in order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Health status labels in order.
    pub fn health_statuses(&self) -> &[String] {
        &self.health
    }

    /// Evacuation status labels in order.
    pub fn evacuation_statuses(&self) -> &[String] {
        &self.evacuation
    }

    /// Size of the cartesian product.
    pub const fn leaf_count(&self) -> usize {
        self.categories
            .len()
            .saturating_mul(self.health.len())
            .saturating_mul(self.evacuation.len())
    }

    /// The last health status (the most favorable one).
    pub const fn last_health(&self) -> HealthIx {
        HealthIx(self.health.len().saturating_sub(1))
    }

    /// The first evacuation status (the most favorable one).
    pub const fn first_evacuation(&self) -> EvacuationIx {
        EvacuationIx(0)
    }

    /// Whether `key` belongs to this taxonomy's product.
    pub const fn contains_key(&self, key: LeafKey) -> bool {
        key.category.0 < self.categories.len()
            && key.health.0 < self.health.len()
            && key.evacuation.0 < self.evacuation.len()
    }

    /// Whether every component of `path` belongs to this taxonomy.
    pub fn contains_path(&self, path: NodePath) -> bool {
        match path {
            NodePath::Root => true,
            NodePath::Category(c) => c.0 < self.categories.len(),
            NodePath::Health(c, h) => c.0 < self.categories.len() && h.0 < self.health.len(),
            NodePath::Leaf(key) => self.contains_key(key),
        }
    }

    /// Enumerate every leaf key in canonical order.
    pub fn leaves(&self) -> impl Iterator<Item = LeafKey> + '_ {
        (0..self.categories.len()).flat_map(move |c| {
            (0..self.health.len()).flat_map(move |h| {
                (0..self.evacuation.len()).map(move |e| LeafKey::new(c, h, e))
            })
        })
    }

    /// Direct children of `path`, in taxonomy order. Leaves have none.
    pub fn children(&self, path: NodePath) -> Vec<NodePath> {
        match path {
            NodePath::Root => (0..self.categories.len())
                .map(|c| NodePath::Category(CategoryIx(c)))
                .collect(),
            NodePath::Category(c) => (0..self.health.len())
                .map(|h| NodePath::Health(c, HealthIx(h)))
                .collect(),
            NodePath::Health(c, h) => (0..self.evacuation.len())
                .map(|e| {
                    NodePath::Leaf(LeafKey {
                        category: c,
                        health: h,
                        evacuation: EvacuationIx(e),
                    })
                })
                .collect(),
            NodePath::Leaf(_) => Vec::new(),
        }
    }

    /// Look up a category by label.
    pub fn category_ix(&self, label: &str) -> Option<CategoryIx> {
        position(&self.categories, label).map(CategoryIx)
    }

    /// Look up a health status by label.
    pub fn health_ix(&self, label: &str) -> Option<HealthIx> {
        position(&self.health, label).map(HealthIx)
    }

    /// Look up an evacuation status by label.
    pub fn evacuation_ix(&self, label: &str) -> Option<EvacuationIx> {
        position(&self.evacuation, label).map(EvacuationIx)
    }

    /// Resolve up to three labels into a typed path.
    ///
    /// An empty slice resolves to [`NodePath::Root`].
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::UnknownLabel`] for a label outside its level
    /// and [`TaxonomyError::PathTooLong`] for more than three labels.
    pub fn resolve(&self, labels: &[&str]) -> Result<NodePath, TaxonomyError> {
        match labels {
            [] => Ok(NodePath::Root),
            [c] => Ok(NodePath::Category(self.require_category(c)?)),
            [c, h] => Ok(NodePath::Health(
                self.require_category(c)?,
                self.require_health(h)?,
            )),
            [c, h, e] => Ok(NodePath::Leaf(LeafKey {
                category: self.require_category(c)?,
                health: self.require_health(h)?,
                evacuation: self.require_evacuation(e)?,
            })),
            _ => Err(TaxonomyError::PathTooLong { len: labels.len() }),
        }
    }

    /// Render a path back into its labels. Components outside the taxonomy
    /// are skipped.
    pub fn label_path(&self, path: NodePath) -> Vec<&str> {
        let (c, h, e) = match path {
            NodePath::Root => (None, None, None),
            NodePath::Category(c) => (Some(c), None, None),
            NodePath::Health(c, h) => (Some(c), Some(h), None),
            NodePath::Leaf(k) => (Some(k.category), Some(k.health), Some(k.evacuation)),
        };
        let mut labels = Vec::with_capacity(path.depth());
        labels.extend(c.and_then(|c| self.categories.get(c.0)).map(String::as_str));
        labels.extend(h.and_then(|h| self.health.get(h.0)).map(String::as_str));
        labels.extend(e.and_then(|e| self.evacuation.get(e.0)).map(String::as_str));
        labels
    }

    /// The label of the deepest component of `path` (`None` for the root).
    pub fn node_label(&self, path: NodePath) -> Option<&str> {
        let label = match path {
            NodePath::Root => None,
            NodePath::Category(c) => self.categories.get(c.0),
            NodePath::Health(_, h) => self.health.get(h.0),
            NodePath::Leaf(k) => self.evacuation.get(k.evacuation.0),
        };
        label.map(String::as_str)
    }

    fn require_category(&self, label: &str) -> Result<CategoryIx, TaxonomyError> {
        self.category_ix(label).ok_or_else(|| unknown(TaxonomyLevel::Category, label))
    }

    fn require_health(&self, label: &str) -> Result<HealthIx, TaxonomyError> {
        self.health_ix(label).ok_or_else(|| unknown(TaxonomyLevel::Health, label))
    }

    fn require_evacuation(&self, label: &str) -> Result<EvacuationIx, TaxonomyError> {
        self.evacuation_ix(label)
            .ok_or_else(|| unknown(TaxonomyLevel::Evacuation, label))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_level(level: TaxonomyLevel, labels: &[String]) -> Result<(), TaxonomyError> {
    if labels.is_empty() {
        return Err(TaxonomyError::EmptyLevel { level });
    }
    for (i, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(TaxonomyError::BlankLabel { level });
        }
        if labels.iter().skip(i.saturating_add(1)).any(|other| other == label) {
            return Err(TaxonomyError::DuplicateLabel {
                level,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

fn position(labels: &[String], label: &str) -> Option<usize> {
    let wanted = label.trim();
    labels.iter().position(|l| l == wanted)
}

fn unknown(level: TaxonomyLevel, label: &str) -> TaxonomyError {
    TaxonomyError::UnknownLabel {
        level,
        label: label.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn standard_taxonomy_has_64_leaves() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.leaf_count(), 64);
        assert_eq!(taxonomy.leaves().count(), 64);
    }

    #[test]
    fn leaves_enumerate_in_canonical_order() {
        let taxonomy = Taxonomy::standard();
        let keys: Vec<LeafKey> = taxonomy.leaves().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&LeafKey::new(0, 0, 0)));
        assert_eq!(keys.get(1), Some(&LeafKey::new(0, 0, 1)));
        assert_eq!(keys.get(4), Some(&LeafKey::new(0, 1, 0)));
        assert_eq!(keys.last(), Some(&LeafKey::new(3, 3, 3)));
    }

    #[test]
    fn resolve_each_depth() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.resolve(&[]), Ok(NodePath::Root));
        assert_eq!(
            taxonomy.resolve(&["Women"]),
            Ok(NodePath::Category(CategoryIx(1)))
        );
        assert_eq!(
            taxonomy.resolve(&["Men", "Dead"]),
            Ok(NodePath::Health(CategoryIx(0), HealthIx(0)))
        );
        assert_eq!(
            taxonomy.resolve(&["Children (<18)", "Not Injured", "Unaccounted / Missing"]),
            Ok(NodePath::Leaf(LeafKey::new(3, 3, 3)))
        );
    }

    #[test]
    fn resolve_trims_whitespace() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(
            taxonomy.resolve(&["  Men "]),
            Ok(NodePath::Category(CategoryIx(0)))
        );
    }

    #[test]
    fn resolve_rejects_unknown_label() {
        let taxonomy = Taxonomy::standard();
        let err = taxonomy.resolve(&["Men", "Bruised"]);
        assert_eq!(
            err,
            Err(TaxonomyError::UnknownLabel {
                level: TaxonomyLevel::Health,
                label: "Bruised".to_owned(),
            })
        );
    }

    #[test]
    fn resolve_rejects_long_paths() {
        let taxonomy = Taxonomy::standard();
        let err = taxonomy.resolve(&["Men", "Dead", "Evacuated", "Extra"]);
        assert_eq!(err, Err(TaxonomyError::PathTooLong { len: 4 }));
    }

    #[test]
    fn new_rejects_empty_level() {
        let err = Taxonomy::new(labels(&["A"]), Vec::new(), labels(&["X"]));
        assert_eq!(
            err,
            Err(TaxonomyError::EmptyLevel {
                level: TaxonomyLevel::Health
            })
        );
    }

    #[test]
    fn new_rejects_duplicates_and_blanks() {
        let dup = Taxonomy::new(labels(&["A", "A"]), labels(&["h"]), labels(&["e"]));
        assert!(matches!(dup, Err(TaxonomyError::DuplicateLabel { .. })));

        let blank = Taxonomy::new(labels(&["A"]), labels(&["h"]), labels(&[" "]));
        assert_eq!(
            blank,
            Err(TaxonomyError::BlankLabel {
                level: TaxonomyLevel::Evacuation
            })
        );
    }

    #[test]
    fn synthetic_taxonomy_defaults() {
        let taxonomy = Taxonomy::new(labels(&["A", "B"]), labels(&["sick", "well"]), labels(&["out"]))
            .unwrap_or_default();
        assert_eq!(taxonomy.leaf_count(), 4);
        assert_eq!(taxonomy.last_health(), HealthIx(1));
        assert_eq!(taxonomy.first_evacuation(), EvacuationIx(0));
    }

    #[test]
    fn path_prefix_relations() {
        let leaf = LeafKey::new(1, 2, 3);
        let health = NodePath::Health(CategoryIx(1), HealthIx(2));
        assert!(NodePath::Root.contains(leaf));
        assert!(NodePath::Category(CategoryIx(1)).contains(leaf));
        assert!(!NodePath::Category(CategoryIx(0)).contains(leaf));
        assert!(health.contains(leaf));
        assert!(health.is_prefix_of(NodePath::Leaf(leaf)));
        assert!(!NodePath::Leaf(leaf).is_prefix_of(health));
        assert_eq!(NodePath::Leaf(leaf).parent(), Some(health));
        assert_eq!(NodePath::Root.parent(), None);
    }

    #[test]
    fn label_path_round_trips_resolve() {
        let taxonomy = Taxonomy::standard();
        let labels = ["Transgender", "Mildly Injured", "Being Evacuated"];
        let path = taxonomy.resolve(&labels).unwrap_or(NodePath::Root);
        assert_eq!(taxonomy.label_path(path), labels.to_vec());
        assert_eq!(taxonomy.node_label(path), Some("Being Evacuated"));
    }

    #[test]
    fn children_follow_taxonomy_order() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.children(NodePath::Root).len(), 4);
        let kids = taxonomy.children(NodePath::Category(CategoryIx(2)));
        assert_eq!(kids.first(), Some(&NodePath::Health(CategoryIx(2), HealthIx(0))));
        assert!(taxonomy.children(NodePath::Leaf(LeafKey::new(0, 0, 0))).is_empty());
    }

    #[test]
    fn foreign_keys_are_not_contained() {
        let taxonomy = Taxonomy::standard();
        assert!(taxonomy.contains_key(LeafKey::new(3, 3, 3)));
        assert!(!taxonomy.contains_key(LeafKey::new(4, 0, 0)));
        assert!(!taxonomy.contains_path(NodePath::Category(CategoryIx(9))));
    }
}
