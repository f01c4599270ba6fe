//! Template context and `{variable}` resolution
//!
//! A [`TemplateContext`] maps variable names to JSON values. The resolver
//! substitutes `{identifier}` tokens in strings and in nested JSON data,
//! failing loudly on any variable the context does not define.

pub mod context;
pub mod error;
pub mod resolver;

pub use context::TemplateContext;
pub use error::{NamingError, UnknownVariableError};
pub use resolver::{
    extract_variables, has_interpolation, interpolate, interpolate_deep, interpolate_sync,
};
