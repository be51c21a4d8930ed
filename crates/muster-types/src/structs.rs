//! Catalog, roster, transcript and report records.
//!
//! These are plain data carriers; the behavior that operates on them lives
//! in `muster-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChatRole, ProcedureKind};
use crate::ids::ReportId;

/// One evacuation procedure card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProcedureCard {
    /// Catalog identifier.
    pub id: String,
    /// Card heading.
    pub title: String,
    /// The kind of site the card applies to.
    #[serde(rename = "type")]
    pub kind: ProcedureKind,
    /// Ordered steps.
    pub steps: Vec<String>,
}

/// Do/don't guidance for one type of emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmergencyChecklist {
    /// Catalog identifier.
    pub id: String,
    /// Emergency type (e.g. "Fire", "Earthquake").
    pub category: String,
    /// Checklist heading.
    pub title: String,
    /// Things to do.
    pub dos: Vec<String>,
    /// Things not to do.
    pub donts: Vec<String>,
}

/// A named member of staff on the roll call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Person {
    /// Roster identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the person has checked in at the assembly point.
    #[serde(default)]
    pub present: bool,
}

/// One line of the assistant chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChatMessage {
    /// Who wrote the line.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
}

/// An urgent incident report ready to hand to a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IncidentReport {
    /// Unique report identifier.
    pub id: ReportId,
    /// Free-text description of the situation (trimmed).
    pub description: String,
    /// Where the reporter is.
    pub location: String,
    /// Whether the emergency response team should be notified.
    pub notify_team: bool,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
}
