//! TypeScript synthesis through an owned syntax tree
//!
//! Builders append declarations for recurring Effect idioms (context tags,
//! tagged errors, schemas, interfaces, imports) to a [`SourceFile`], which is
//! then printed with [`print_source_file`]. Output is never produced by
//! concatenating template fragments.

pub mod builders;
pub mod descriptors;
pub mod error;
pub mod identifier;
pub mod nodes;
pub mod printer;

pub use builders::{
    add_barrel_export, add_const_export, add_context_tag_class, add_effect_imports, add_import,
    add_interface, add_schema_definition, add_section_comment, add_tagged_error_class,
    add_type_alias, add_type_import, render_descriptors,
};
pub use descriptors::{
    parse_descriptors, ContextTagClassOptions, ErrorField, InterfaceOptions, InterfaceProperty,
    MethodSignature, ParamSpec, PatternDescriptor, SchemaAnnotations, SchemaDefinitionOptions,
    SchemaField, SchemaType, StaticLayer, TaggedErrorClassOptions,
};
pub use error::AstError;
pub use identifier::is_valid_identifier;
pub use nodes::SourceFile;
pub use printer::print_source_file;
