//! Declarative descriptions of the code shapes the builders know
//!
//! Descriptors deserialize from YAML or JSON with camelCase keys. A list of
//! descriptors is a [`PatternDescriptor`] sequence dispatched on `kind`:
//!
//! ```yaml
//! - kind: taggedErrorClass
//!   className: UserNotFound
//!   tagName: UserNotFound
//!   fields:
//!     - { name: id, type: string }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::builders;
use crate::ast::error::AstError;
use crate::ast::nodes::SourceFile;

/// A service class built on `Context.Tag` with an inline service shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextTagClassOptions {
    /// Class name, also the first type argument of the tag
    pub service_name: String,
    /// Tag string passed to `Context.Tag`
    pub tag_identifier: String,
    /// Service methods, emitted as readonly function-typed properties
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    /// `static readonly` layer members, in order
    #[serde(default)]
    pub static_layers: Vec<StaticLayer>,
    /// Doc comment placed above the class
    #[serde(default)]
    pub jsdoc: Option<String>,
}

/// One method of a service shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    /// Method name
    pub name: String,
    /// Parameters in order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Return type text
    pub return_type: String,
}

/// A named, typed parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name
    pub name: String,
    /// Type text
    #[serde(rename = "type")]
    pub ty: String,
}

/// A `static readonly` member holding a layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticLayer {
    /// Member name (e.g. `Live`, `Test`)
    pub name: String,
    /// Initializer expression text
    pub implementation: String,
}

/// An error class built on `Data.TaggedError`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedErrorClassOptions {
    /// Class name
    pub class_name: String,
    /// Tag string passed to `Data.TaggedError`
    pub tag_name: String,
    /// Payload fields, in order
    #[serde(default)]
    pub fields: Vec<ErrorField>,
    /// Doc comment placed above the class
    #[serde(default)]
    pub jsdoc: Option<String>,
}

/// A payload field of a tagged error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorField {
    /// Field name
    pub name: String,
    /// Type text
    #[serde(rename = "type")]
    pub ty: String,
    /// Rendered as `name?: T`
    #[serde(default)]
    pub optional: bool,
}

/// Base schema of a schema definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    /// `Schema.Struct({ .. })`
    #[default]
    Struct,
    /// `Schema.String`
    String,
    /// `Schema.Number`
    Number,
    /// `Schema.Boolean`
    Boolean,
    /// `Schema.BigInt`
    BigInt,
    /// `Schema.Date`
    Date,
    /// `Schema.Unknown`
    Unknown,
}

impl SchemaType {
    /// Member name on the `Schema` namespace
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Struct => "Struct",
            SchemaType::String => "String",
            SchemaType::Number => "Number",
            SchemaType::Boolean => "Boolean",
            SchemaType::BigInt => "BigInt",
            SchemaType::Date => "Date",
            SchemaType::Unknown => "Unknown",
        }
    }
}

/// A `const` schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinitionOptions {
    /// Constant name
    pub name: String,
    /// Base schema
    #[serde(default)]
    pub schema_type: SchemaType,
    /// Struct fields; only valid with [`SchemaType::Struct`]
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    /// Brand applied with `Schema.brand`
    #[serde(default)]
    pub brand: Option<String>,
    /// Annotations applied with `.annotations({ .. })`
    #[serde(default)]
    pub annotations: Option<SchemaAnnotations>,
    /// Also emit `export type N = typeof N.Type`
    #[serde(default)]
    pub export_type: bool,
    /// Doc comment placed above the constant
    #[serde(default)]
    pub jsdoc: Option<String>,
}

/// A struct field of a schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Schema expression text (e.g. `Schema.String`)
    pub schema: String,
    /// Wrapped in `Schema.optional(..)`
    #[serde(default)]
    pub optional: bool,
}

/// Schema annotations; unknown keys are kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaAnnotations {
    /// `identifier` annotation
    #[serde(default)]
    pub identifier: Option<String>,
    /// `title` annotation
    #[serde(default)]
    pub title: Option<String>,
    /// `description` annotation
    #[serde(default)]
    pub description: Option<String>,
    /// Any other string-valued annotations
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

/// An exported interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceOptions {
    /// Interface name
    pub name: String,
    /// Property signatures, in order
    #[serde(default)]
    pub properties: Vec<InterfaceProperty>,
    /// Doc comment placed above the interface
    #[serde(default)]
    pub jsdoc: Option<String>,
}

/// A property signature of an interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceProperty {
    /// Property name
    pub name: String,
    /// Type text
    #[serde(rename = "type")]
    pub ty: String,
    /// Rendered as `name?: T`
    #[serde(default)]
    pub optional: bool,
    /// Rendered with `readonly`
    #[serde(default = "default_readonly")]
    pub readonly: bool,
}

fn default_readonly() -> bool {
    true
}

/// Any descriptor, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PatternDescriptor {
    /// `kind: contextTagClass`
    ContextTagClass(ContextTagClassOptions),
    /// `kind: taggedErrorClass`
    TaggedErrorClass(TaggedErrorClassOptions),
    /// `kind: schemaDefinition`
    SchemaDefinition(SchemaDefinitionOptions),
    /// `kind: interface`
    Interface(InterfaceOptions),
}

impl PatternDescriptor {
    /// Append this descriptor's declarations to `file`
    pub fn apply(&self, file: &mut SourceFile) -> Result<(), AstError> {
        match self {
            PatternDescriptor::ContextTagClass(options) => {
                builders::add_context_tag_class(file, options)
            }
            PatternDescriptor::TaggedErrorClass(options) => {
                builders::add_tagged_error_class(file, options)
            }
            PatternDescriptor::SchemaDefinition(options) => {
                builders::add_schema_definition(file, options)
            }
            PatternDescriptor::Interface(options) => builders::add_interface(file, options),
        }
    }

    /// Name of the declaration this descriptor produces
    pub fn name(&self) -> &str {
        match self {
            PatternDescriptor::ContextTagClass(options) => &options.service_name,
            PatternDescriptor::TaggedErrorClass(options) => &options.class_name,
            PatternDescriptor::SchemaDefinition(options) => &options.name,
            PatternDescriptor::Interface(options) => &options.name,
        }
    }

    /// Namespaces from `effect` the emitted code refers to
    ///
    /// Includes the namespace the construct itself needs plus every known
    /// namespace mentioned in caller-supplied type and expression text.
    pub fn effect_imports(&self) -> Vec<&'static str> {
        let mut texts: Vec<&str> = Vec::new();
        let mut found: Vec<&'static str> = Vec::new();

        match self {
            PatternDescriptor::ContextTagClass(options) => {
                found.push("Context");
                for method in &options.methods {
                    texts.push(&method.return_type);
                    texts.extend(method.params.iter().map(|p| p.ty.as_str()));
                }
                texts.extend(options.static_layers.iter().map(|l| l.implementation.as_str()));
            }
            PatternDescriptor::TaggedErrorClass(options) => {
                found.push("Data");
                texts.extend(options.fields.iter().map(|f| f.ty.as_str()));
            }
            PatternDescriptor::SchemaDefinition(options) => {
                found.push("Schema");
                texts.extend(options.fields.iter().map(|f| f.schema.as_str()));
            }
            PatternDescriptor::Interface(options) => {
                texts.extend(options.properties.iter().map(|p| p.ty.as_str()));
            }
        }

        for text in texts {
            for namespace in builders::referenced_effect_namespaces(text) {
                if !found.contains(&namespace) {
                    found.push(namespace);
                }
            }
        }
        found
    }
}

/// Decode a descriptor list from YAML or JSON text
pub fn parse_descriptors(text: &str) -> Result<Vec<PatternDescriptor>, AstError> {
    serde_yaml::from_str(text).map_err(|e| AstError::InvalidDescriptor(e.to_string()))
}
