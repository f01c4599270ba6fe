//! Core configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// npm scope used when a caller does not supply one
pub const DEFAULT_SCOPE: &str = "@myorg";

/// Library type used when a caller does not supply one
pub const DEFAULT_LIBRARY_TYPE: &str = "data-access";

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// npm scope prefixed to generated package names (e.g. `@myorg`)
    pub scope: String,
    /// Library flavour (e.g. `data-access`, `feature`, `infra`)
    pub library_type: String,
    /// Root that relative output paths resolve against
    pub workspace_root: Option<PathBuf>,
    /// Render and validate but never write
    pub dry_run: bool,
    /// Post-render validation switches
    pub validation: ValidationSettings,
}

/// Validation switches applied to generated TypeScript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    /// Validate generated `.ts` files before writing them
    pub enabled: bool,
    /// Run the single-file semantic pass in addition to parsing
    pub check_semantics: bool,
    /// Run the Effect idiom scan
    pub enforce_effect_patterns: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            library_type: DEFAULT_LIBRARY_TYPE.to_string(),
            workspace_root: None,
            dry_run: false,
            validation: ValidationSettings::default(),
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            check_semantics: false,
            enforce_effect_patterns: true,
        }
    }
}

impl GeneratorConfig {
    /// Check invariants that deserialization alone cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.scope.starts_with('@') || self.scope.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "scope must look like '@name', got '{}'",
                self.scope
            )));
        }
        if self.scope.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "scope must not contain whitespace: '{}'",
                self.scope
            )));
        }
        if self.library_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "library_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
