//! Descriptor validation errors

use thiserror::Error;

/// A pattern descriptor that cannot be turned into declarations
///
/// Builders check the whole descriptor before touching the source file, so
/// an error leaves the file unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A name that must be emitted as an identifier is not one
    #[error("Invalid {role} '{name}': not a valid identifier")]
    InvalidIdentifier {
        /// What the name is used as (e.g. "method name")
        role: &'static str,
        /// The rejected name
        name: String,
    },

    /// Two entries of one list share a name
    #[error("Duplicate {role} '{name}'")]
    DuplicateName {
        /// What the names are used as
        role: &'static str,
        /// The repeated name
        name: String,
    },

    /// A required text value is empty
    #[error("{role} must not be empty")]
    EmptyValue {
        /// What the value is used as
        role: &'static str,
    },

    /// A descriptor document could not be decoded
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}
