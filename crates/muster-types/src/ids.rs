//! Type-safe identifier and index wrappers.
//!
//! Generated records (incident reports) carry UUID v7 identifiers. Taxonomy
//! positions are wrapped in per-level index newtypes so a health index can
//! never be passed where a category index is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around a zero-based taxonomy position.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub usize);

        impl $name {
            /// Return the zero-based position within its taxonomy level.
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a submitted incident report.
    ReportId
}

define_index! {
    /// Position of a label in the category level (level 0).
    CategoryIx
}

define_index! {
    /// Position of a label in the health status level (level 1).
    HealthIx
}

define_index! {
    /// Position of a label in the evacuation status level (level 2).
    EvacuationIx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ids_are_unique() {
        let a = ReportId::new();
        let b = ReportId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn report_id_display_matches_uuid() {
        let id = ReportId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn index_serializes_as_bare_number() {
        let json = serde_json::to_string(&HealthIx(3)).ok();
        assert_eq!(json.as_deref(), Some("3"));
    }

    #[test]
    fn indices_order_by_position() {
        assert!(CategoryIx(0) < CategoryIx(1));
        assert_eq!(EvacuationIx(2).get(), 2);
    }
}
