//! Validation of generated files before they are written
//!
//! Applies the configured checks to TypeScript outputs:
//! - syntax, and optionally the single-file semantic pass
//! - the Effect idiom scan, whose warnings are returned to the caller
//!
//! All checks run even when an earlier one fails; failures are combined into
//! one [`ValidationError`] carrying the file path.

use codeforge_config::ValidationSettings;
use tracing::debug;

use crate::models::GeneratedFile;
use crate::validation::{
    validate_all, validate_effect_patterns, validate_typescript, ValidateOptions, ValidationError,
    Validator,
};

/// Validates generated code before writing
#[derive(Debug, Clone)]
pub struct CodeValidator {
    settings: ValidationSettings,
}

impl CodeValidator {
    /// Creates a validator with default settings
    pub fn new() -> Self {
        Self::with_settings(ValidationSettings::default())
    }

    /// Creates a validator with custom settings
    pub fn with_settings(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    /// Settings in use
    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Validates a single generated file
    ///
    /// Files without a TypeScript extension, or any file when validation is
    /// disabled, pass untouched.
    ///
    /// # Returns
    /// Idiom warnings for the file, possibly empty
    ///
    /// # Errors
    /// Returns the combined `ValidationError` when any check fails
    pub fn validate_file(&self, file: &GeneratedFile) -> Result<Vec<String>, ValidationError> {
        if !self.settings.enabled || !file.is_typescript() {
            return Ok(Vec::new());
        }
        debug!(path = %file.path.display(), "Validating generated file");

        let options = ValidateOptions {
            check_semantics: self.settings.check_semantics,
            ..ValidateOptions::default()
        }
        .for_file(&file.path);
        let mut warnings = Vec::new();

        let mut validators: Vec<Validator<'_>> =
            vec![Box::new(|| validate_typescript(&file.content, &options))];
        if self.settings.enforce_effect_patterns {
            validators.push(Box::new(|| {
                let report = validate_effect_patterns(&file.content)?;
                warnings = report.warnings;
                Ok(())
            }));
        }

        validate_all(validators).map_err(|e| e.with_path(&file.path))?;
        Ok(warnings)
    }

    /// Validates several files, stopping at the first failing one
    pub fn validate(&self, files: &[GeneratedFile]) -> Result<Vec<String>, ValidationError> {
        let mut warnings = Vec::new();
        for file in files {
            warnings.extend(self.validate_file(file)?);
        }
        Ok(warnings)
    }
}

impl Default for CodeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationSettings> for CodeValidator {
    fn from(settings: ValidationSettings) -> Self {
        Self::with_settings(settings)
    }
}
