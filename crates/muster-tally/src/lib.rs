//! Hierarchical headcount tally engine for the Muster toolkit.
//!
//! People accounted for during an emergency are classified on three levels:
//! category, health status and evacuation status. The engine keeps one
//! count per (category, health, evacuation) leaf and answers subtree sums
//! for any prefix of a leaf key.
//!
//! # Architecture
//!
//! - [`tally`] -- The [`Tally`] store: initialization, sums, leaf writes and
//!   the cascading increment/decrement entry points.
//! - [`cascade`] -- Which leaf a coarse increment or decrement lands on.
//! - [`conservation`] -- Table integrity checks and before/after deltas.
//! - [`view`] -- Read-only aggregate tree for presentation.
//!
//! # Cascade policy
//!
//! | Path depth | Increment lands on | Decrement takes from |
//! |------------|--------------------|----------------------|
//! | 0 (root) | rejected | first positive leaf |
//! | 1 (category) | (category, last health, first evacuation) | first positive leaf under the category |
//! | 2 (category, health) | (category, health, first evacuation) | first positive leaf under the pair |
//! | 3 (leaf) | the leaf | the leaf |
//!
//! "First" is canonical enumeration order: category-major, health next,
//! evacuation minor. Decrementing an empty subtree is a no-op.
//!
//! # Usage
//!
//! ```
//! use muster_tally::Tally;
//! use muster_types::{LeafKey, NodePath, Taxonomy};
//!
//! let mut tally = Tally::new(Taxonomy::standard());
//! let men = tally.resolve(&["Men"]).unwrap_or(NodePath::Root);
//!
//! // A coarse increment lands in the best-case bucket.
//! let landed = tally.increment(men).ok();
//! assert_eq!(landed, Some(LeafKey::new(0, 3, 0)));
//! assert_eq!(tally.sum(men), 1);
//! assert_eq!(tally.grand_total(), 1);
//! ```

pub mod cascade;
pub mod conservation;
pub mod tally;
pub mod view;

// Re-export primary types at crate root.
pub use conservation::{TallyCheck, TallyDelta};
pub use tally::Tally;
pub use view::TallyNode;

use muster_types::{LeafKey, NodePath, TaxonomyError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when querying or mutating a tally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// A leaf was set to a value a count cannot hold.
    #[error("leaf count must be a non-negative 32-bit value, got {value}")]
    InvalidValue {
        /// The rejected value.
        value: i64,
    },

    /// The path does not belong to this tally's taxonomy.
    #[error("node {path:?} is outside the taxonomy")]
    UnknownNode {
        /// The foreign path.
        path: NodePath,
    },

    /// Increment needs at least a category to pick a leaf.
    #[error("increment requires at least a category")]
    RootNotAddressable,

    /// A leaf count reached its maximum.
    #[error("leaf {key:?} is at its maximum count")]
    Overflow {
        /// The saturated leaf.
        key: LeafKey,
    },

    /// A label could not be resolved against the taxonomy.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
}
