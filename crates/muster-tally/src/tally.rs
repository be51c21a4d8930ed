//! The tally store: one count per leaf of the headcount tree.
//!
//! The [`Tally`] struct owns its [`Taxonomy`] and a count for every key of
//! the taxonomy's cartesian product. It is created once per session with all
//! counts at zero and mutated only through its methods.
//!
//! # Design
//!
//! - **Closed key set**: every product key is present from construction on;
//!   no other key is ever inserted.
//! - **Unsigned counts**: a count cannot go below zero by type, and writes
//!   that would need a negative count are rejected.
//! - **Atomic operations**: each call changes at most one leaf, and nothing
//!   on error.

use std::collections::BTreeMap;

use muster_types::{LeafKey, NodePath, Taxonomy};
use tracing::{debug, warn};

use crate::TallyError;
use crate::cascade::{decrement_target, increment_target};

/// Headcount tally over a three-level taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    taxonomy: Taxonomy,
    /// Count per leaf, iterated in canonical order.
    counts: BTreeMap<LeafKey, u32>,
}

impl Tally {
    /// Create a tally with every leaf of `taxonomy` set to zero.
    pub fn new(taxonomy: Taxonomy) -> Self {
        let counts: BTreeMap<LeafKey, u32> = taxonomy.leaves().map(|key| (key, 0)).collect();
        debug!(leaves = counts.len(), "tally initialized");
        Self { taxonomy, counts }
    }

    /// The taxonomy this tally was built with.
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// All leaf counts in canonical order.
    pub const fn counts(&self) -> &BTreeMap<LeafKey, u32> {
        &self.counts
    }

    /// Count of a single leaf, or `None` if the key is outside the taxonomy.
    pub fn leaf(&self, key: LeafKey) -> Option<u32> {
        self.counts.get(&key).copied()
    }

    /// Resolve UI labels into a path against this tally's taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::Taxonomy`] if a label is unknown or the path is
    /// too long.
    pub fn resolve(&self, labels: &[&str]) -> Result<NodePath, TallyError> {
        Ok(self.taxonomy.resolve(labels)?)
    }

    /// Sum of every leaf under `path`.
    ///
    /// A leaf path yields that leaf's count and the root yields the grand
    /// total. Paths outside the taxonomy cover no leaves and sum to zero.
    pub fn sum(&self, path: NodePath) -> u64 {
        self.counts
            .iter()
            .filter(|&(key, _)| path.contains(*key))
            .fold(0_u64, |acc, (_, count)| acc.saturating_add(u64::from(*count)))
    }

    /// Sum of every leaf in the tally.
    pub fn grand_total(&self) -> u64 {
        self.sum(NodePath::Root)
    }

    /// Overwrite one leaf's count. Returns the previous count.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::InvalidValue`] if `value` is negative or does
    /// not fit a count, and [`TallyError::UnknownNode`] if `key` is outside
    /// the taxonomy. The table is unchanged on error.
    pub fn set_leaf(&mut self, key: LeafKey, value: i64) -> Result<u32, TallyError> {
        let Ok(count) = u32::try_from(value) else {
            warn!(?key, value, "rejected leaf write");
            return Err(TallyError::InvalidValue { value });
        };
        let slot = self
            .counts
            .get_mut(&key)
            .ok_or(TallyError::UnknownNode {
                path: NodePath::Leaf(key),
            })?;
        let previous = core::mem::replace(slot, count);
        debug!(?key, previous, count, "leaf set");
        Ok(previous)
    }

    /// Add one person under `path` and return the leaf that received them.
    ///
    /// A category path lands on (category, last health, first evacuation),
    /// a category+health path on (category, health, first evacuation), and a
    /// leaf path on the leaf itself.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::RootNotAddressable`] for the root,
    /// [`TallyError::UnknownNode`] for a path outside the taxonomy and
    /// [`TallyError::Overflow`] if the target leaf is saturated.
    pub fn increment(&mut self, path: NodePath) -> Result<LeafKey, TallyError> {
        let key = increment_target(&self.taxonomy, path)?;
        let slot = self
            .counts
            .get_mut(&key)
            .ok_or(TallyError::UnknownNode {
                path: NodePath::Leaf(key),
            })?;
        *slot = slot.checked_add(1).ok_or(TallyError::Overflow { key })?;
        debug!(?path, ?key, count = *slot, "headcount incremented");
        Ok(key)
    }

    /// Remove one person from under `path`.
    ///
    /// Takes from the first positive leaf under `path` in canonical order
    /// and returns it. Returns `Ok(None)` without changing anything when the
    /// subtree is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::UnknownNode`] for a path outside the taxonomy.
    pub fn decrement(&mut self, path: NodePath) -> Result<Option<LeafKey>, TallyError> {
        if !self.taxonomy.contains_path(path) {
            return Err(TallyError::UnknownNode { path });
        }
        let Some(key) = decrement_target(&self.counts, path) else {
            debug!(?path, "decrement on empty subtree ignored");
            return Ok(None);
        };
        if let Some(slot) = self.counts.get_mut(&key) {
            *slot = slot.saturating_sub(1);
            debug!(?path, ?key, count = *slot, "headcount decremented");
        }
        Ok(Some(key))
    }

    /// Resolve `labels` and increment the resulting path.
    ///
    /// # Errors
    ///
    /// See [`Tally::resolve`] and [`Tally::increment`].
    pub fn increment_labels(&mut self, labels: &[&str]) -> Result<LeafKey, TallyError> {
        let path = self.resolve(labels)?;
        self.increment(path)
    }

    /// Resolve `labels` and decrement the resulting path.
    ///
    /// # Errors
    ///
    /// See [`Tally::resolve`] and [`Tally::decrement`].
    pub fn decrement_labels(&mut self, labels: &[&str]) -> Result<Option<LeafKey>, TallyError> {
        let path = self.resolve(labels)?;
        self.decrement(path)
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new(Taxonomy::standard())
    }
}
