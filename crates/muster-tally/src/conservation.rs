//! Integrity checks over a tally.
//!
//! Two kinds of check live here:
//!
//! - [`verify_tally`] inspects a single table: the key set must equal the
//!   taxonomy's cartesian product, and the grand total must equal both the
//!   plain sum of all leaves and the sum of the category subtotals.
//! - [`TallyDelta`] compares two tables leaf by leaf, which is how callers
//!   confirm that a mutation touched exactly one leaf by exactly one unit.

use std::collections::{BTreeMap, BTreeSet};

use muster_types::{CategoryIx, LeafKey, NodePath};

use crate::Tally;

/// A broken tally invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyAnomaly {
    /// Product keys with no entry in the table.
    pub missing: Vec<LeafKey>,
    /// Table entries that are not product keys.
    pub foreign: Vec<LeafKey>,
    /// Grand total as reported by [`Tally::grand_total`].
    pub grand_total: u64,
    /// Independent sum of every leaf count.
    pub leaf_total: u64,
    /// Sum of the per-category subtotals.
    pub category_total: u64,
    /// Human-readable description.
    pub message: String,
}

impl core::fmt::Display for TallyAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The result of [`verify_tally`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyCheck {
    /// Every invariant holds.
    Consistent,
    /// At least one invariant is violated.
    Anomaly(TallyAnomaly),
}

/// Verify the closed key set and the agreement of all totals.
pub fn verify_tally(tally: &Tally) -> TallyCheck {
    let expected: BTreeSet<LeafKey> = tally.taxonomy().leaves().collect();
    let present: BTreeSet<LeafKey> = tally.counts().keys().copied().collect();

    let missing: Vec<LeafKey> = expected.difference(&present).copied().collect();
    let foreign: Vec<LeafKey> = present.difference(&expected).copied().collect();

    let leaf_total = tally
        .counts()
        .values()
        .fold(0_u64, |acc, c| acc.saturating_add(u64::from(*c)));
    let category_total = (0..tally.taxonomy().categories().len())
        .map(|c| tally.sum(NodePath::Category(CategoryIx(c))))
        .fold(0_u64, u64::saturating_add);
    let grand_total = tally.grand_total();

    if missing.is_empty()
        && foreign.is_empty()
        && grand_total == leaf_total
        && grand_total == category_total
    {
        return TallyCheck::Consistent;
    }

    let message = format!(
        "TALLY_ANOMALY: {} missing leaves, {} foreign leaves, totals grand={grand_total} \
         leaves={leaf_total} categories={category_total}",
        missing.len(),
        foreign.len(),
    );
    TallyCheck::Anomaly(TallyAnomaly {
        missing,
        foreign,
        grand_total,
        leaf_total,
        category_total,
        message,
    })
}

/// Leaf-by-leaf difference between two tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyDelta {
    /// Changed leaves as (before, after).
    pub changed: BTreeMap<LeafKey, (u32, u32)>,
}

impl TallyDelta {
    /// Compare `before` against `after`. Keys present on one side only are
    /// treated as zero on the other.
    pub fn between(before: &BTreeMap<LeafKey, u32>, after: &BTreeMap<LeafKey, u32>) -> Self {
        let keys: BTreeSet<&LeafKey> = before.keys().chain(after.keys()).collect();
        let changed = keys
            .into_iter()
            .filter_map(|key| {
                let old = before.get(key).copied().unwrap_or(0);
                let new = after.get(key).copied().unwrap_or(0);
                (old != new).then_some((*key, (old, new)))
            })
            .collect();
        Self { changed }
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Net change in the grand total.
    pub fn net(&self) -> i64 {
        self.changed.values().fold(0_i64, |acc, (old, new)| {
            acc.saturating_add(i64::from(*new))
                .saturating_sub(i64::from(*old))
        })
    }

    /// The single changed leaf, if exactly one leaf changed.
    pub fn single_leaf(&self) -> Option<LeafKey> {
        let mut keys = self.changed.keys();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Some(*key),
            _ => None,
        }
    }
}
