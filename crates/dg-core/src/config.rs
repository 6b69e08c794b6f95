//! Build settings
//!
//! Retry budgets and graph limits for the dungeon builder.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Limits the builder works within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// How many times a layout graph is picked before giving up
    pub max_build_attempts: u32,
    /// How many times one graph is rebuilt from an empty room table
    pub max_rebuild_attempts_per_graph: u32,
    /// Corridors a single room may lead to
    pub max_child_corridors: usize,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            max_build_attempts: 10,
            max_rebuild_attempts_per_graph: 1000,
            max_child_corridors: 3,
        }
    }
}

impl BuildSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}
