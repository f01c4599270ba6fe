#![warn(missing_docs)]

//! Code generation core for codeforge
//!
//! Derives naming variants from a base name, resolves `{variable}`
//! templates, synthesizes TypeScript for Effect idioms through an owned
//! syntax tree, validates the result with tree-sitter, and orchestrates
//! rendering and writing through an injected file system.

pub mod ast;
pub mod code_validator;
pub mod error;
pub mod generation_manager;
pub mod models;
pub mod naming;
pub mod templates;
pub mod validation;

// Re-export public API
pub use ast::{
    add_barrel_export, add_const_export, add_context_tag_class, add_effect_imports, add_import,
    add_interface, add_schema_definition, add_section_comment, add_tagged_error_class,
    add_type_alias, add_type_import, parse_descriptors, print_source_file, render_descriptors,
    AstError, ContextTagClassOptions, ErrorField, InterfaceOptions, InterfaceProperty,
    MethodSignature, ParamSpec, PatternDescriptor, SchemaAnnotations, SchemaDefinitionOptions,
    SchemaField, SchemaType, SourceFile, StaticLayer, TaggedErrorClassOptions,
};
pub use code_validator::CodeValidator;
pub use error::{GenerationError, Result};
pub use generation_manager::{GenerationManager, GenerationManagerConfig, GenerationTask};
pub use models::GeneratedFile;
pub use naming::{create_context_from_name, CaseTransform, NamingOptions};
pub use templates::{
    extract_variables, has_interpolation, interpolate, interpolate_deep, interpolate_sync,
    NamingError, TemplateContext, UnknownVariableError,
};
pub use validation::{
    validate_all, validate_effect_patterns, validate_not_pattern, validate_pattern,
    validate_typescript, Diagnostic, EffectPatternReport, ValidateOptions, ValidationError,
    Validator,
};
