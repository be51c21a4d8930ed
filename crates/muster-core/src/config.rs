//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `muster-config.yaml` at the project
//! root. Every section is optional; anything left out falls back to the
//! built-in taxonomy and catalogs.

use std::path::Path;

use serde::Deserialize;

use muster_types::taxonomy::{
    DEFAULT_CATEGORIES, DEFAULT_EVACUATION_STATUSES, DEFAULT_HEALTH_STATUSES,
};
use muster_types::{EmergencyChecklist, Person, ProcedureCard, Taxonomy, TaxonomyError};

use crate::builtin;

/// Environment variable overriding `incident.location`.
pub const ENV_SITE_LOCATION: &str = "MUSTER_SITE_LOCATION";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "MUSTER_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The taxonomy section is not a valid taxonomy.
    #[error("invalid taxonomy: {source}")]
    Taxonomy {
        /// The underlying validation error.
        #[from]
        source: TaxonomyError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `muster-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MusterConfig {
    /// Headcount taxonomy labels.
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Evacuation procedure cards.
    #[serde(default = "builtin::procedures")]
    pub procedures: Vec<ProcedureCard>,

    /// Emergency do/don't checklists.
    #[serde(default = "builtin::checklists")]
    pub checklists: Vec<EmergencyChecklist>,

    /// Named roll call.
    #[serde(default = "builtin::roster")]
    pub roster: Vec<Person>,

    /// Incident reporting defaults.
    #[serde(default)]
    pub incident: IncidentConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for MusterConfig {
    fn default() -> Self {
        Self {
            taxonomy: TaxonomyConfig::default(),
            procedures: builtin::procedures(),
            checklists: builtin::checklists(),
            roster: builtin::roster(),
            incident: IncidentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MusterConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `MUSTER_SITE_LOCATION` overrides `incident.location`
    /// - `MUSTER_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Taxonomy`] if the taxonomy section is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or
    /// [`ConfigError::Taxonomy`] if the taxonomy section is invalid.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_with(yaml, |key| std::env::var(key).ok())?;
        config.taxonomy.build()?;
        Ok(config)
    }

    /// Parse configuration, resolving overrides through `lookup` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_with(
        yaml: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a struct.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Apply overrides resolved through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(ENV_SITE_LOCATION) {
            self.incident.location = val;
        }
        if let Some(val) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = val;
        }
    }
}

/// Ordered label lists for the headcount tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxonomyConfig {
    /// Level 0 labels.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Level 1 labels, worst to best.
    #[serde(default = "default_health_statuses")]
    pub health_statuses: Vec<String>,

    /// Level 2 labels, best to worst.
    #[serde(default = "default_evacuation_statuses")]
    pub evacuation_statuses: Vec<String>,
}

impl TaxonomyConfig {
    /// Validate the labels and build the taxonomy descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if a level is empty or has blank or
    /// duplicate labels.
    pub fn build(&self) -> Result<Taxonomy, TaxonomyError> {
        Taxonomy::new(
            self.categories.clone(),
            self.health_statuses.clone(),
            self.evacuation_statuses.clone(),
        )
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            health_statuses: default_health_statuses(),
            evacuation_statuses: default_evacuation_statuses(),
        }
    }
}

/// Incident reporting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncidentConfig {
    /// Location printed on every report.
    #[serde(default = "default_location")]
    pub location: String,

    /// Whether "notify ERT team / admin" starts checked.
    #[serde(default = "default_true")]
    pub notify_team: bool,

    /// A description must be longer than this many characters (after
    /// trimming) to be submitted.
    #[serde(default = "default_min_description_len")]
    pub min_description_len: usize,
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            notify_team: true,
            min_description_len: default_min_description_len(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn default_categories() -> Vec<String> {
    to_strings(&DEFAULT_CATEGORIES)
}

fn default_health_statuses() -> Vec<String> {
    to_strings(&DEFAULT_HEALTH_STATUSES)
}

fn default_evacuation_statuses() -> Vec<String> {
    to_strings(&DEFAULT_EVACUATION_STATUSES)
}

fn default_location() -> String {
    builtin::DEFAULT_LOCATION.to_owned()
}

const fn default_min_description_len() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
