//! Shared type definitions for the Muster emergency headcount toolkit.
//!
//! This crate is the single source of truth for types used across the
//! workspace. Types flow downstream to `TypeScript` via `ts-rs` for the
//! mobile front-end.
//!
//! # Modules
//!
//! - [`ids`] -- Report identifiers and per-level taxonomy indices
//! - [`taxonomy`] -- The three-level taxonomy, leaf keys and node paths
//! - [`enums`] -- Navigation, catalog, recorder and chat enumerations
//! - [`structs`] -- Catalog, roster, transcript and report records

pub mod enums;
pub mod ids;
pub mod structs;
pub mod taxonomy;

// Re-export all public types at crate root for convenience.
pub use enums::{ChatRole, EvacuationView, ProcedureKind, RecordingMode, Tab};
pub use ids::{CategoryIx, EvacuationIx, HealthIx, ReportId};
pub use structs::{ChatMessage, EmergencyChecklist, IncidentReport, Person, ProcedureCard};
pub use taxonomy::{LeafKey, NodePath, Taxonomy, TaxonomyError, TaxonomyLevel};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ReportId::export_all();
        let _ = crate::ids::CategoryIx::export_all();
        let _ = crate::ids::HealthIx::export_all();
        let _ = crate::ids::EvacuationIx::export_all();

        // Taxonomy
        let _ = crate::taxonomy::TaxonomyLevel::export_all();
        let _ = crate::taxonomy::LeafKey::export_all();
        let _ = crate::taxonomy::NodePath::export_all();
        let _ = crate::taxonomy::Taxonomy::export_all();

        // Enums
        let _ = crate::enums::Tab::export_all();
        let _ = crate::enums::EvacuationView::export_all();
        let _ = crate::enums::ProcedureKind::export_all();
        let _ = crate::enums::RecordingMode::export_all();
        let _ = crate::enums::ChatRole::export_all();

        // Structs
        let _ = crate::structs::ProcedureCard::export_all();
        let _ = crate::structs::EmergencyChecklist::export_all();
        let _ = crate::structs::Person::export_all();
        let _ = crate::structs::ChatMessage::export_all();
        let _ = crate::structs::IncidentReport::export_all();
    }
}
