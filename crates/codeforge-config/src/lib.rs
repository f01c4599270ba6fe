//! codeforge configuration
//!
//! Loads the generator defaults (npm scope, library type, validation switches)
//! from an optional TOML file layered with `CODEFORGE_*` environment variables.
//! Everything downstream receives an explicit [`GeneratorConfig`]; there is no
//! process-wide default.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{GeneratorConfig, ValidationSettings, DEFAULT_LIBRARY_TYPE, DEFAULT_SCOPE};
