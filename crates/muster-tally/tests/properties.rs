//! Behavioral properties of the headcount tally.
//!
//! Covers the field scenarios, conservation of every mutation, decrement
//! determinism, and a seeded random walk over all operations that checks
//! the table invariants after each step.

#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::collections::BTreeMap;

use muster_tally::conservation::verify_tally;
use muster_tally::{Tally, TallyCheck, TallyDelta};
use muster_types::{LeafKey, NodePath, Taxonomy};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn path(tally: &Tally, labels: &[&str]) -> NodePath {
    tally.resolve(labels).unwrap()
}

fn leaf(tally: &Tally, labels: [&str; 3]) -> u32 {
    match path(tally, &labels) {
        NodePath::Leaf(key) => tally.leaf(key).unwrap(),
        other => panic!("not a leaf: {other:?}"),
    }
}

/// Every path in the taxonomy, root first.
fn all_paths(taxonomy: &Taxonomy) -> Vec<NodePath> {
    let mut paths = vec![NodePath::Root];
    let mut frontier = vec![NodePath::Root];
    while let Some(p) = frontier.pop() {
        for child in taxonomy.children(p) {
            paths.push(child);
            frontier.push(child);
        }
    }
    paths
}

fn independent_total(counts: &BTreeMap<LeafKey, u32>) -> u64 {
    counts.values().map(|c| u64::from(*c)).sum()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_single_category_increment() {
    let mut tally = Tally::new(Taxonomy::standard());
    let men = path(&tally, &["Men"]);
    tally.increment(men).unwrap();

    assert_eq!(tally.sum(men), 1);
    assert_eq!(tally.grand_total(), 1);
    assert_eq!(leaf(&tally, ["Men", "Not Injured", "Evacuated"]), 1);
    let nonzero = tally.counts().values().filter(|c| **c > 0).count();
    assert_eq!(nonzero, 1);
}

#[test]
fn scenario_b_increment_three_then_decrement_one() {
    let mut tally = Tally::new(Taxonomy::standard());
    let women = path(&tally, &["Women"]);
    for _ in 0..3 {
        tally.increment(women).unwrap();
    }
    tally.decrement(women).unwrap();

    assert_eq!(tally.sum(women), 2);
    assert_eq!(leaf(&tally, ["Women", "Not Injured", "Evacuated"]), 2);
}

#[test]
fn scenario_c_decrement_on_empty_table_is_noop() {
    let mut tally = Tally::new(Taxonomy::standard());
    let before = tally.clone();
    let children = path(&tally, &["Children (<18)"]);

    assert_eq!(tally.decrement(children), Ok(None));
    assert_eq!(tally, before);
    assert_eq!(tally.grand_total(), 0);
}

#[test]
fn scenario_d_health_level_increment_twice() {
    let mut tally = Tally::new(Taxonomy::standard());
    let men_dead = path(&tally, &["Men", "Dead"]);
    tally.increment(men_dead).unwrap();
    tally.increment(men_dead).unwrap();

    assert_eq!(leaf(&tally, ["Men", "Dead", "Evacuated"]), 2);
    assert_eq!(tally.sum(path(&tally, &["Men"])), 2);
    assert_eq!(tally.grand_total(), 2);
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

#[test]
fn category_increment_always_lands_on_default_bucket() {
    let mut tally = Tally::new(Taxonomy::standard());
    let men = path(&tally, &["Men"]);
    let expected = path(&tally, &["Men", "Not Injured", "Evacuated"]);
    for _ in 0..5 {
        let landed = tally.increment(men).unwrap();
        assert_eq!(NodePath::Leaf(landed), expected);
    }
}

#[test]
fn decrement_is_deterministic_from_identical_state() {
    let mut base = Tally::new(Taxonomy::standard());
    base.set_leaf(LeafKey::new(2, 3, 1), 4).unwrap();
    base.set_leaf(LeafKey::new(2, 1, 3), 1).unwrap();
    base.set_leaf(LeafKey::new(0, 0, 0), 2).unwrap();

    let paths = [
        NodePath::Root,
        path(&base, &["Transgender"]),
        path(&base, &["Transgender", "Not Injured"]),
    ];
    for p in paths {
        let mut first = base.clone();
        let mut second = base.clone();
        assert_eq!(first.decrement(p), second.decrement(p));
        assert_eq!(first, second);
    }

    let mut tally = base.clone();
    let transgender = path(&base, &["Transgender"]);
    assert_eq!(
        tally.decrement(transgender),
        Ok(Some(LeafKey::new(2, 1, 3)))
    );
    assert_eq!(
        tally.decrement(transgender),
        Ok(Some(LeafKey::new(2, 3, 1)))
    );
}

#[test]
fn synthetic_taxonomy_uses_its_own_defaults() {
    let taxonomy = Taxonomy::new(
        vec!["Staff".to_owned(), "Visitors".to_owned()],
        vec!["Hurt".to_owned(), "Fine".to_owned()],
        vec!["Out".to_owned(), "Inside".to_owned(), "Lost".to_owned()],
    )
    .unwrap();
    let mut tally = Tally::new(taxonomy);
    assert_eq!(tally.counts().len(), 12);

    let visitors = path(&tally, &["Visitors"]);
    let landed = tally.increment(visitors).unwrap();
    assert_eq!(
        NodePath::Leaf(landed),
        path(&tally, &["Visitors", "Fine", "Out"])
    );
}

// ---------------------------------------------------------------------------
// Conservation
// ---------------------------------------------------------------------------

#[test]
fn increment_touches_only_ancestors_of_the_target() {
    let taxonomy = Taxonomy::standard();
    let paths = all_paths(&taxonomy);
    for target in paths.iter().copied().filter(|p| *p != NodePath::Root) {
        let mut tally = Tally::new(taxonomy.clone());
        let before = tally.clone();
        let landed = NodePath::Leaf(tally.increment(target).unwrap());

        assert_eq!(tally.grand_total(), before.grand_total() + 1);
        for node in &paths {
            let expected = u64::from(node.is_prefix_of(landed));
            assert_eq!(
                tally.sum(*node),
                before.sum(*node) + expected,
                "node {node:?} after increment of {target:?}"
            );
        }
        let delta = TallyDelta::between(before.counts(), tally.counts());
        assert_eq!(delta.net(), 1);
    }
}

#[test]
fn decrement_removes_exactly_one_unit_when_subtree_nonempty() {
    let taxonomy = Taxonomy::standard();
    let mut tally = Tally::new(taxonomy.clone());
    for (i, key) in taxonomy.leaves().enumerate() {
        if i % 3 == 0 {
            tally.set_leaf(key, 2).unwrap();
        }
    }

    for target in all_paths(&taxonomy) {
        let mut work = tally.clone();
        let before_sum = work.sum(target);
        let taken = work.decrement(target).unwrap();
        let delta = TallyDelta::between(tally.counts(), work.counts());

        if before_sum == 0 {
            assert_eq!(taken, None);
            assert!(delta.is_empty());
            assert_eq!(work, tally);
        } else {
            assert_eq!(delta.net(), -1);
            assert_eq!(delta.single_leaf(), taken);
            assert_eq!(work.grand_total() + 1, tally.grand_total());
            assert_eq!(work.sum(target) + 1, before_sum);
        }
    }
}

// ---------------------------------------------------------------------------
// Random walk
// ---------------------------------------------------------------------------

#[test]
fn random_operation_sequences_preserve_invariants() {
    let taxonomy = Taxonomy::standard();
    let paths = all_paths(&taxonomy);
    let leaves: Vec<LeafKey> = taxonomy.leaves().collect();
    let mut rng = SmallRng::seed_from_u64(0x4d55_5354);
    let mut tally = Tally::new(taxonomy);

    for step in 0..5_000 {
        let before = tally.clone();
        match rng.random_range(0..10) {
            0..=4 => {
                let target = paths[rng.random_range(1..paths.len())];
                tally.increment(target).unwrap();
                assert_eq!(tally.grand_total(), before.grand_total() + 1);
            }
            5..=8 => {
                let target = paths[rng.random_range(0..paths.len())];
                let taken = tally.decrement(target).unwrap();
                if before.sum(target) == 0 {
                    assert_eq!(taken, None);
                    assert_eq!(tally, before);
                } else {
                    assert_eq!(tally.grand_total() + 1, before.grand_total());
                }
            }
            _ => {
                let key = leaves[rng.random_range(0..leaves.len())];
                let value: i64 = rng.random_range(-3..6);
                let result = tally.set_leaf(key, value);
                if value < 0 {
                    assert!(result.is_err());
                    assert_eq!(tally, before);
                } else {
                    assert_eq!(tally.leaf(key), Some(u32::try_from(value).unwrap()));
                }
            }
        }

        assert_eq!(
            tally.grand_total(),
            independent_total(tally.counts()),
            "grand total drifted at step {step}"
        );
        assert_eq!(verify_tally(&tally), TallyCheck::Consistent);
    }
}
