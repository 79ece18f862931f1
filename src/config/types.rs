//! Configuration types for the variance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

/// Metadata about the engine build a report was produced with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable engine name.
    pub name: String,
    /// Version stamped onto every report.
    pub version: String,
}

/// Settings that shape report presentation and request limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportSettings {
    /// Label shown for rows that carry neither an account id nor a PIN.
    ///
    /// When absent, the raw key is shown instead.
    #[serde(default)]
    pub unknown_staff_label: Option<String>,
    /// Longest reporting window, in days, the HTTP surface accepts.
    #[serde(default = "default_max_window_days")]
    pub max_window_days: u32,
}

fn default_max_window_days() -> u32 {
    31
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            unknown_staff_label: None,
            max_window_days: default_max_window_days(),
        }
    }
}

/// The complete engine configuration, as laid out in `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Engine metadata.
    pub engine: EngineMetadata,
    /// Report settings.
    #[serde(default)]
    pub report: ReportSettings,
}
