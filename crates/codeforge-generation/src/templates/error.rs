//! Template and naming errors

use thiserror::Error;

/// A template referenced a variable the context does not define
///
/// Always fatal: substituting an empty string would produce plausible but
/// wrong generated code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown template variable '{variable}'")]
pub struct UnknownVariableError {
    /// Name of the missing variable
    pub variable: String,
}

impl UnknownVariableError {
    /// Create an error for `variable`
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

/// Errors raised while deriving a context from a base name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The base name was empty
    #[error("Base name must not be empty")]
    EmptyName,

    /// The base name contained no letters or digits
    #[error("Base name '{0}' contains no letters or digits")]
    NoWords(String),
}
