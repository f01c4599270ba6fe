//! Naming variants derived from a single base name

use codeforge_config::{GeneratorConfig, DEFAULT_LIBRARY_TYPE, DEFAULT_SCOPE};
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

use crate::templates::{NamingError, TemplateContext};

/// A casing applied to a word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    /// PascalCase (e.g., UserProfile)
    PascalCase,
    /// camelCase (e.g., userProfile)
    CamelCase,
    /// snake_case (e.g., user_profile)
    SnakeCase,
    /// kebab-case (e.g., user-profile)
    KebabCase,
    /// SCREAMING_SNAKE_CASE (e.g., USER_PROFILE)
    ScreamingSnakeCase,
}

impl CaseTransform {
    /// Apply case transformation to a string
    ///
    /// Words are split on non-alphanumeric characters and on lower-to-upper
    /// case transitions.
    pub fn apply(&self, input: &str) -> String {
        match self {
            CaseTransform::PascalCase => input.to_pascal_case(),
            CaseTransform::CamelCase => input.to_lower_camel_case(),
            CaseTransform::SnakeCase => input.to_snake_case(),
            CaseTransform::KebabCase => input.to_kebab_case(),
            CaseTransform::ScreamingSnakeCase => input.to_shouty_snake_case(),
        }
    }
}

/// Scope and library type used when deriving a context
///
/// `None` falls back to the workspace defaults (`@myorg`, `data-access`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOptions {
    /// npm scope, including the leading `@`
    pub scope: Option<String>,
    /// Library kind, used as the project name prefix
    pub library_type: Option<String>,
}

impl NamingOptions {
    /// Options carrying the configured scope and library type
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            scope: Some(config.scope.clone()),
            library_type: Some(config.library_type.clone()),
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the library type
    pub fn with_library_type(mut self, library_type: impl Into<String>) -> Self {
        self.library_type = Some(library_type.into());
        self
    }
}

/// Derive a [`TemplateContext`] from one base name
///
/// The kebab-case file name is computed first and every other casing is
/// derived from it, so feeding a previous `fileName` back in reproduces the
/// same four variants.
///
/// # Errors
///
/// Returns [`NamingError`] when `name` is empty or has no letters or digits.
///
/// # Example
///
/// ```
/// use codeforge_generation::naming::{create_context_from_name, NamingOptions};
///
/// let ctx = create_context_from_name("user-profile", &NamingOptions::default()).unwrap();
/// assert_eq!(ctx.get_str("className"), Some("UserProfile"));
/// assert_eq!(ctx.get_str("constantName"), Some("USER_PROFILE"));
/// ```
pub fn create_context_from_name(
    name: &str,
    options: &NamingOptions,
) -> Result<TemplateContext, NamingError> {
    if name.is_empty() {
        return Err(NamingError::EmptyName);
    }
    if !name.chars().any(char::is_alphanumeric) {
        return Err(NamingError::NoWords(name.to_string()));
    }

    let file_name = CaseTransform::KebabCase.apply(name);
    let scope = options.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
    let library_type = options.library_type.as_deref().unwrap_or(DEFAULT_LIBRARY_TYPE);

    Ok(TemplateContext::new()
        .with("name", name)
        .with("className", CaseTransform::PascalCase.apply(&file_name))
        .with("propertyName", CaseTransform::CamelCase.apply(&file_name))
        .with("constantName", CaseTransform::ScreamingSnakeCase.apply(&file_name))
        .with("scope", scope)
        .with("libraryType", library_type)
        .with("packageName", format!("{scope}/{file_name}"))
        .with("projectName", format!("{library_type}-{file_name}"))
        .with("fileName", file_name))
}
