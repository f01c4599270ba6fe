//! Regex assertions and the Effect idiom scan

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::validation::{Diagnostic, ValidationError};

/// Fail unless `pattern` matches somewhere in `content`
pub fn validate_pattern(content: &str, pattern: &Regex, message: &str) -> Result<(), ValidationError> {
    if pattern.is_match(content) {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}

/// Fail if `pattern` matches anywhere in `content`
///
/// The diagnostic points at the first match.
pub fn validate_not_pattern(
    content: &str,
    pattern: &Regex,
    message: &str,
) -> Result<(), ValidationError> {
    match pattern.find(content) {
        None => Ok(()),
        Some(found) => Err(ValidationError::with_diagnostics(
            message,
            vec![Diagnostic::at_offset(content, found.start(), message).to_string()],
        )),
    }
}

/// Non-fatal findings of [`validate_effect_patterns`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectPatternReport {
    /// Warnings as `Line N, Col M: message`, in file order
    pub warnings: Vec<String>,
}

impl EffectPatternReport {
    /// Whether the scan found nothing to warn about
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn tag_class_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"class\s+([A-Za-z_$][\w$]*)\s+extends\s+Context\.Tag\s*\(").expect("Invalid regex")
    })
}

fn interface_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\binterface\s+([A-Za-z_$][\w$]*)").expect("Invalid regex"))
}

fn error_class_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*Error)\b(?:\s*<(?:[^<>{}()]|<[^<>{}()]*>)*>)?(?:\s+extends\s+([\w$.]+))?")
            .expect("Invalid regex")
    })
}

fn layer_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\bLayer\.(?:succeed|effect|scoped|sync)\s*\(").expect("Invalid regex")
    })
}

fn tag_definition_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\bContext\.(?:Tag|GenericTag)\s*[(<]|\bEffect\.Service\s*[(<]")
            .expect("Invalid regex")
    })
}

const TAGGED_ERROR_BASES: &[&str] = &["Data.TaggedError", "Schema.TaggedError"];

/// Scan `content` for Effect anti-patterns
///
/// A named interface duplicating a tag's inline service shape (`S`,
/// `SService`, `SShape` or `SInterface` next to `class S extends
/// Context.Tag`) fails validation. Error classes not built on a tagged error
/// base and layers constructed without any tag definition in the same
/// content are returned as warnings and logged.
pub fn validate_effect_patterns(content: &str) -> Result<EffectPatternReport, ValidationError> {
    let services: Vec<&str> = tag_class_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let mut failures = Vec::new();
    for caps in interface_regex().captures_iter(content) {
        let Some(interface) = caps.get(1) else {
            continue;
        };
        let duplicated = services.iter().find(|service| {
            ["", "Service", "Shape", "Interface"]
                .iter()
                .any(|suffix| interface.as_str() == format!("{service}{suffix}"))
        });
        if let Some(service) = duplicated {
            failures.push(
                Diagnostic::at_offset(
                    content,
                    interface.start(),
                    format!(
                        "Interface '{}' duplicates the service shape of '{service}'; keep the shape inline in Context.Tag",
                        interface.as_str()
                    ),
                )
                .to_string(),
            );
        }
    }
    if !failures.is_empty() {
        return Err(ValidationError::with_diagnostics(
            "Effect pattern validation failed",
            failures,
        ));
    }

    let mut warnings = Vec::new();
    for caps in error_class_regex().captures_iter(content) {
        let (Some(name), base) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let tagged = base.is_some_and(|b| TAGGED_ERROR_BASES.contains(&b.as_str()));
        if !tagged {
            warnings.push(Diagnostic::at_offset(
                content,
                name.start(),
                format!(
                    "Error class '{}' should extend Data.TaggedError",
                    name.as_str()
                ),
            ));
        }
    }

    if !tag_definition_regex().is_match(content) {
        if let Some(layer) = layer_regex().find(content) {
            warnings.push(Diagnostic::at_offset(
                content,
                layer.start(),
                "Layer constructed without a Context.Tag in the same file",
            ));
        }
    }

    warnings.sort();
    let warnings: Vec<String> = warnings.iter().map(ToString::to_string).collect();
    for warning in &warnings {
        warn!(warning = %warning, "Effect pattern warning");
    }
    Ok(EffectPatternReport { warnings })
}
