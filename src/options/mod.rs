//! Centralized part-manager options with TOML preset support.
//!
//! All tweakable settings (explode motion, highlight marker, registration
//! colouring) are consolidated here. Options serialize to/from TOML for
//! presets; the JSON schema drives a control panel.

mod explode;
mod highlight;
mod registration;

use std::path::Path;

pub use explode::{ConflictPolicy, ExplodeOptions, MotionOptions, SplitPolicy};
pub use highlight::HighlightOptions;
pub use registration::{ColorMode, RegistrationOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SplayError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[explode]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Explode and reset parameters.
    pub explode: ExplodeOptions,
    /// Selection marker appearance.
    pub highlight: HighlightOptions,
    /// Part registration parameters.
    pub registration: RegistrationOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, SplayError> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SplayError> {
        let content = std::fs::read_to_string(path).map_err(SplayError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SplayError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SplayError::Io)?;
        }
        std::fs::write(path, content).map_err(SplayError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
