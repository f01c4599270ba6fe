//! Error types for code generation

use std::path::PathBuf;

use codeforge_config::ConfigError;
use codeforge_files::{FileError, FileWriteError};
use thiserror::Error;

use crate::ast::AstError;
use crate::templates::{NamingError, UnknownVariableError};
use crate::validation::ValidationError;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A template referenced an undefined variable
    #[error(transparent)]
    UnknownVariable(#[from] UnknownVariableError),

    /// A base name could not be split into words
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A descriptor was rejected by an AST builder
    #[error(transparent)]
    Ast(#[from] AstError),

    /// Generated content failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing a generated file failed
    #[error(transparent)]
    FileWrite(#[from] FileWriteError),

    /// Another file-system operation failed
    #[error(transparent)]
    File(#[from] FileError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A failure while generating one file
    #[error("Failed to generate {} from template '{template}': {source}", path.display())]
    Template {
        /// Template identifier
        template: String,
        /// Target path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Wrap `self` with the template and path it happened for
    pub fn in_template(self, template: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        GenerationError::Template {
            template: template.into(),
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping template context
    pub fn root(&self) -> &GenerationError {
        match self {
            GenerationError::Template { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result alias for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;
