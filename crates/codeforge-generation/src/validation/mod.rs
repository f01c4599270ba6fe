//! Validation of synthesized TypeScript
//!
//! Validators are plain functions returning `Result<_, ValidationError>`.
//! [`validate_all`] runs a batch of them without stopping at the first
//! failure and folds every failure into one error.

pub mod patterns;
pub mod semantic;
pub mod typescript;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use patterns::{validate_effect_patterns, validate_not_pattern, validate_pattern, EffectPatternReport};
pub use semantic::check_semantics;
pub use typescript::{validate_typescript, ValidateOptions};

/// A failed validation
///
/// Diagnostics are kept in the order the validator produced them, each
/// formatted as `Line N, Col M: message`. The value is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    diagnostics: Vec<String>,
    path: Option<PathBuf>,
}

impl ValidationError {
    /// Failure without positional diagnostics
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostics: Vec::new(),
            path: None,
        }
    }

    /// Failure carrying diagnostics
    pub fn with_diagnostics(message: impl Into<String>, diagnostics: Vec<String>) -> Self {
        Self {
            message: message.into(),
            diagnostics,
            path: None,
        }
    }

    /// Attach the file the failure belongs to
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Summary message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostics in report order
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// File the failure belongs to, if known
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// A positioned finding; lines and columns are 1-based
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Diagnostic {
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// Finding text
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic at the character at `byte_offset` of `source`
    pub fn at_offset(source: &str, byte_offset: usize, message: impl Into<String>) -> Self {
        let offset = byte_offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Col {}: {}", self.line, self.column, self.message)
    }
}

/// A deferred validation step for [`validate_all`]
pub type Validator<'a> = Box<dyn FnOnce() -> Result<(), ValidationError> + 'a>;

/// Run every validator and combine the failures
///
/// Validators always all run. Failures are folded into one error whose
/// message counts and lists them and whose diagnostics are every failure's
/// diagnostics in order (a failure without diagnostics contributes its
/// message). The first known path is kept.
pub fn validate_all<'a, I>(validators: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = Validator<'a>>,
{
    let mut total = 0;
    let mut failures = Vec::new();
    for validator in validators {
        total += 1;
        if let Err(e) = validator() {
            failures.push(e);
        }
    }

    if failures.is_empty() {
        return Ok(());
    }

    let summary: Vec<&str> = failures.iter().map(|f| f.message()).collect();
    let message = format!(
        "{} of {} validations failed: {}",
        failures.len(),
        total,
        summary.join("; ")
    );
    let path = failures.iter().find_map(|f| f.path.clone());
    let diagnostics = failures
        .into_iter()
        .flat_map(|f| {
            if f.diagnostics.is_empty() {
                vec![f.message]
            } else {
                f.diagnostics
            }
        })
        .collect();

    Err(ValidationError {
        message,
        diagnostics,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(message: &'static str, diagnostics: &[&str]) -> Validator<'static> {
        let diagnostics: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        Box::new(move || Err(ValidationError::with_diagnostics(message, diagnostics)))
    }

    #[test]
    fn test_diagnostic_position() {
        let source = "line one\nconst é = 1;\n";
        let offset = source.find('=').unwrap();
        let diagnostic = Diagnostic::at_offset(source, offset, "here");
        assert_eq!(diagnostic.to_string(), "Line 2, Col 9: here");
    }

    #[test]
    fn test_validate_all_passes_when_every_validator_passes() {
        let validators: Vec<Validator<'_>> = vec![Box::new(|| Ok(())), Box::new(|| Ok(()))];
        assert!(validate_all(validators).is_ok());
    }

    #[test]
    fn test_validate_all_reports_every_failure() {
        let mut ran_last = false;
        let validators: Vec<Validator<'_>> = vec![
            failing("syntax", &["Line 1, Col 1: a"]),
            Box::new(|| Ok(())),
            failing("pattern", &[]),
            Box::new(|| {
                ran_last = true;
                Ok(())
            }),
        ];

        let err = validate_all(validators).unwrap_err();
        assert!(ran_last);
        assert_eq!(err.message(), "2 of 4 validations failed: syntax; pattern");
        assert_eq!(err.diagnostics(), ["Line 1, Col 1: a", "pattern"]);
    }

    #[test]
    fn test_validate_all_keeps_first_path() {
        let validators: Vec<Validator<'_>> = vec![
            Box::new(|| Err(ValidationError::new("a"))),
            Box::new(|| Err(ValidationError::new("b").with_path("/w/b.ts"))),
        ];
        let err = validate_all(validators).unwrap_err();
        assert_eq!(err.path(), Some(Path::new("/w/b.ts")));
    }
}
