//! Enumeration types shared between the engine, the console and the
//! mobile front-end.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// A top-level tab of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Tab {
    /// Evacuation procedures, roll call and headcount tally.
    Evacuation,
    /// Emergency do/don't checklists.
    Emergency,
    /// Alarms, media capture and incident reporting.
    Incident,
    /// Chat transcript with the assistant.
    Assistant,
}

impl Tab {
    /// Every tab, in display order.
    pub const ALL: [Self; 4] = [Self::Evacuation, Self::Emergency, Self::Incident, Self::Assistant];

    /// Parse a tab from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "evacuation" => Some(Self::Evacuation),
            "emergency" => Some(Self::Emergency),
            "incident" => Some(Self::Incident),
            "assistant" | "ai" | "ai_assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

impl core::fmt::Display for Tab {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Evacuation => "evacuation",
            Self::Emergency => "emergency",
            Self::Incident => "incident",
            Self::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// Sub-view of the evacuation tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EvacuationView {
    /// Procedure card carousel.
    #[default]
    Procedures,
    /// Named roll call of personnel.
    Headcount,
    /// Hierarchical headcount tally.
    Tally,
}

impl EvacuationView {
    /// Parse a view from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "procedures" | "cards" => Some(Self::Procedures),
            "headcount" | "rollcall" => Some(Self::Headcount),
            "tally" => Some(Self::Tally),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The kind of site an evacuation procedure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ProcedureKind {
    /// Office buildings.
    Office,
    /// Warehouses and logistics floors.
    Warehouse,
    /// Plants and industrial sites.
    Industrial,
}

impl core::fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Office => "office",
            Self::Warehouse => "warehouse",
            Self::Industrial => "industrial",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

/// What the media recorder is currently capturing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RecordingMode {
    /// Not recording.
    #[default]
    None,
    /// Capturing audio only.
    Audio,
    /// Capturing video.
    Video,
}

impl core::fmt::Display for RecordingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Audio => "audio",
            Self::Video => "video",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Author of a chat transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ChatRole {
    /// The person using the app.
    User,
    /// The assistant.
    Model,
}
