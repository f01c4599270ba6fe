//! Builders that append Effect idioms to a [`SourceFile`]
//!
//! Every builder checks its whole input first and only then mutates the
//! file, so a rejected descriptor leaves the file exactly as it was. Builders
//! only append; existing statements are never replaced.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::ast::descriptors::{
    ContextTagClassOptions, InterfaceOptions, PatternDescriptor, SchemaDefinitionOptions,
    SchemaType, TaggedErrorClassOptions,
};
use crate::ast::error::AstError;
use crate::ast::identifier::is_valid_identifier;
use crate::ast::nodes::{
    split_lines, ClassDeclaration, CommentBlock, ExportAllDeclaration, Expr, Heritage, ImportDeclaration,
    InterfaceDeclaration, JsDoc, ObjectProperty, Parameter, PropertyDeclaration, SourceFile,
    Statement, TypeAliasDeclaration, TypeMember, TypeNode, VariableStatement,
};
use crate::ast::printer::print_source_file;

/// Module the Effect namespaces are imported from
pub const EFFECT_MODULE: &str = "effect";

/// Width of the `=` rule drawn by [`add_section_comment`]
pub const SECTION_RULE_WIDTH: usize = 76;

const EFFECT_NAMESPACES: &[&str] = &[
    "Cause", "Chunk", "Context", "Data", "Duration", "Effect", "Either", "Exit", "Layer", "Option",
    "Ref", "Schedule", "Schema", "Scope", "Stream",
];

fn namespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?:^|[^\w$.])([A-Z][A-Za-z]*)\.").expect("Invalid regex"))
}

/// Known `effect` namespaces used as `Namespace.member` in `text`, in order
pub fn referenced_effect_namespaces(text: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    for caps in namespace_regex().captures_iter(text) {
        if let Some(namespace) = EFFECT_NAMESPACES.iter().find(|n| **n == &caps[1]) {
            if !found.contains(namespace) {
                found.push(*namespace);
            }
        }
    }
    found
}

fn require_identifier(role: &'static str, name: &str) -> Result<(), AstError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(AstError::InvalidIdentifier {
            role,
            name: name.to_string(),
        })
    }
}

fn require_text(role: &'static str, text: &str) -> Result<(), AstError> {
    if text.trim().is_empty() {
        Err(AstError::EmptyValue { role })
    } else {
        Ok(())
    }
}

/// Check that every name is a valid identifier and appears once
fn require_unique_identifiers<'a>(
    role: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), AstError> {
    let mut seen = HashSet::new();
    for name in names {
        require_identifier(role, name)?;
        if !seen.insert(name) {
            return Err(AstError::DuplicateName {
                role,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn docs(text: Option<&str>) -> Option<JsDoc> {
    text.filter(|t| !t.trim().is_empty()).map(JsDoc::new)
}

/// Append `export class S extends Context.Tag("tag")<S, { .. }>() { .. }`
///
/// The service shape is always an inline object type; each method becomes a
/// readonly function-typed property. Static layers keep their order.
pub fn add_context_tag_class(
    file: &mut SourceFile,
    options: &ContextTagClassOptions,
) -> Result<(), AstError> {
    require_identifier("service name", &options.service_name)?;
    require_identifier("tag identifier", &options.tag_identifier)?;
    require_unique_identifiers("method name", options.methods.iter().map(|m| m.name.as_str()))?;
    for method in &options.methods {
        require_unique_identifiers("parameter name", method.params.iter().map(|p| p.name.as_str()))?;
        for param in &method.params {
            require_text("parameter type", &param.ty)?;
        }
        require_text("return type", &method.return_type)?;
    }
    require_unique_identifiers(
        "layer name",
        options.static_layers.iter().map(|l| l.name.as_str()),
    )?;
    for layer in &options.static_layers {
        require_text("layer implementation", &layer.implementation)?;
    }

    let shape = options
        .methods
        .iter()
        .map(|method| TypeMember {
            name: method.name.clone(),
            readonly: true,
            optional: false,
            ty: TypeNode::Function {
                parameters: method
                    .params
                    .iter()
                    .map(|p| Parameter {
                        name: p.name.clone(),
                        ty: TypeNode::raw(p.ty.trim()),
                    })
                    .collect(),
                return_type: Box::new(TypeNode::raw(method.return_type.trim())),
            },
        })
        .collect();

    let tag = Expr::path("Context.Tag")
        .call(vec![Expr::String(options.tag_identifier.clone())])
        .call_generic(
            vec![
                TypeNode::reference(&options.service_name),
                TypeNode::Literal(shape),
            ],
            Vec::new(),
        );

    let members = options
        .static_layers
        .iter()
        .map(|layer| PropertyDeclaration {
            name: layer.name.clone(),
            is_static: true,
            readonly: true,
            ty: None,
            initializer: Some(Expr::Raw(layer.implementation.trim().to_string())),
        })
        .collect();

    file.push(Statement::Class(ClassDeclaration {
        name: options.service_name.clone(),
        exported: true,
        docs: docs(options.jsdoc.as_deref()),
        heritage: Some(Heritage {
            expression: tag,
            type_arguments: Vec::new(),
        }),
        members,
    }));
    debug!(service = %options.service_name, methods = options.methods.len(), "Added context tag class");
    Ok(())
}

/// Append `export class E extends Data.TaggedError("tag")<{ .. }> {}`
pub fn add_tagged_error_class(
    file: &mut SourceFile,
    options: &TaggedErrorClassOptions,
) -> Result<(), AstError> {
    require_identifier("class name", &options.class_name)?;
    require_identifier("tag name", &options.tag_name)?;
    require_unique_identifiers("field name", options.fields.iter().map(|f| f.name.as_str()))?;
    for field in &options.fields {
        require_text("field type", &field.ty)?;
    }

    let payload = options
        .fields
        .iter()
        .map(|field| TypeMember {
            name: field.name.clone(),
            readonly: true,
            optional: field.optional,
            ty: TypeNode::raw(field.ty.trim()),
        })
        .collect();

    file.push(Statement::Class(ClassDeclaration {
        name: options.class_name.clone(),
        exported: true,
        docs: docs(options.jsdoc.as_deref()),
        heritage: Some(Heritage {
            expression: Expr::path("Data.TaggedError")
                .call(vec![Expr::String(options.tag_name.clone())]),
            type_arguments: vec![TypeNode::Literal(payload)],
        }),
        members: Vec::new(),
    }));
    debug!(class = %options.class_name, fields = options.fields.len(), "Added tagged error class");
    Ok(())
}

/// Append `export const N = Schema.X ..` and optionally `export type N`
///
/// Modifiers chain in a fixed order: base schema, then `.pipe(Schema.brand(..))`,
/// then `.annotations({ .. })`.
pub fn add_schema_definition(
    file: &mut SourceFile,
    options: &SchemaDefinitionOptions,
) -> Result<(), AstError> {
    require_identifier("schema name", &options.name)?;
    if options.schema_type != SchemaType::Struct && !options.fields.is_empty() {
        return Err(AstError::InvalidDescriptor(format!(
            "schema '{}' has fields but is a {} schema",
            options.name,
            options.schema_type.as_str()
        )));
    }
    require_unique_identifiers("field name", options.fields.iter().map(|f| f.name.as_str()))?;
    for field in &options.fields {
        require_text("field schema", &field.schema)?;
    }
    if let Some(brand) = &options.brand {
        require_text("brand", brand)?;
    }

    let mut schema = match options.schema_type {
        SchemaType::Struct => {
            let fields = options
                .fields
                .iter()
                .map(|field| {
                    let value = Expr::Raw(field.schema.trim().to_string());
                    let value = if field.optional {
                        Expr::path("Schema.optional").call(vec![value])
                    } else {
                        value
                    };
                    ObjectProperty::new(&field.name, value)
                })
                .collect();
            Expr::path("Schema.Struct").call(vec![Expr::Object(fields)])
        }
        primitive => Expr::ident("Schema").prop(primitive.as_str()),
    };

    if let Some(brand) = &options.brand {
        let branded = Expr::path("Schema.brand").call(vec![Expr::String(brand.clone())]);
        schema = schema.prop("pipe").call(vec![branded]);
    }

    if let Some(annotations) = &options.annotations {
        let mut properties = Vec::new();
        let known = [
            ("identifier", &annotations.identifier),
            ("title", &annotations.title),
            ("description", &annotations.description),
        ];
        for (key, value) in known {
            if let Some(value) = value {
                properties.push(ObjectProperty::new(key, Expr::String(value.clone())));
            }
        }
        for (key, value) in &annotations.extra {
            properties.push(ObjectProperty::new(key, Expr::String(value.clone())));
        }
        schema = schema.prop("annotations").call(vec![Expr::Object(properties)]);
    }

    file.push(Statement::Variable(VariableStatement {
        name: options.name.clone(),
        exported: true,
        docs: docs(options.jsdoc.as_deref()),
        ty: None,
        initializer: schema,
    }));

    if options.export_type {
        file.push(Statement::TypeAlias(TypeAliasDeclaration {
            name: options.name.clone(),
            exported: true,
            docs: None,
            ty: TypeNode::Query(format!("{}.Type", options.name)),
        }));
    }
    debug!(schema = %options.name, kind = options.schema_type.as_str(), "Added schema definition");
    Ok(())
}

/// Append `export interface N { .. }`
pub fn add_interface(file: &mut SourceFile, options: &InterfaceOptions) -> Result<(), AstError> {
    require_identifier("interface name", &options.name)?;
    require_unique_identifiers(
        "property name",
        options.properties.iter().map(|p| p.name.as_str()),
    )?;
    for property in &options.properties {
        require_text("property type", &property.ty)?;
    }

    file.push(Statement::Interface(InterfaceDeclaration {
        name: options.name.clone(),
        exported: true,
        docs: docs(options.jsdoc.as_deref()),
        members: options
            .properties
            .iter()
            .map(|p| TypeMember {
                name: p.name.clone(),
                readonly: p.readonly,
                optional: p.optional,
                ty: TypeNode::raw(p.ty.trim()),
            })
            .collect(),
    }));
    Ok(())
}

/// Merge `names` into the value import from `"effect"`
///
/// Names already imported are skipped. When the file has no value import
/// from `"effect"`, a new one is inserted after the last import.
pub fn add_effect_imports(file: &mut SourceFile, names: &[&str]) -> Result<(), AstError> {
    for name in names {
        require_identifier("import name", name)?;
    }

    let existing = file.statements.iter_mut().find_map(|s| match s {
        Statement::Import(import)
            if import.module_specifier == EFFECT_MODULE && !import.type_only =>
        {
            Some(import)
        }
        _ => None,
    });

    match existing {
        Some(import) => {
            for name in names {
                if !import.named.iter().any(|n| n == name) {
                    import.named.push(name.to_string());
                }
            }
        }
        None => {
            let mut named: Vec<String> = Vec::new();
            for name in names {
                if !named.iter().any(|n| n == name) {
                    named.push(name.to_string());
                }
            }
            if !named.is_empty() {
                file.insert_import(ImportDeclaration::new(EFFECT_MODULE, named));
            }
        }
    }
    Ok(())
}

fn import_names(module: &str, names: &[&str]) -> Result<Vec<String>, AstError> {
    require_text("module specifier", module)?;
    if names.is_empty() {
        return Err(AstError::EmptyValue {
            role: "import list",
        });
    }
    require_unique_identifiers("import name", names.iter().copied())?;
    Ok(names.iter().map(|n| n.to_string()).collect())
}

/// Insert a separate `import type { .. } from "module"` after the last import
pub fn add_type_import(file: &mut SourceFile, module: &str, names: &[&str]) -> Result<(), AstError> {
    let named = import_names(module, names)?;
    file.insert_import(ImportDeclaration::type_only(module, named));
    Ok(())
}

/// Insert a separate `import { .. } from "module"` after the last import
pub fn add_import(file: &mut SourceFile, module: &str, names: &[&str]) -> Result<(), AstError> {
    let named = import_names(module, names)?;
    file.insert_import(ImportDeclaration::new(module, named));
    Ok(())
}

/// Append a banner comment: the title between two rules of `=`
pub fn add_section_comment(file: &mut SourceFile, title: &str) {
    let rule = "=".repeat(SECTION_RULE_WIDTH);
    let mut lines = vec![rule.clone()];
    lines.extend(split_lines(title).into_iter().map(|l| l.trim_end().to_string()));
    lines.push(rule);
    file.push(Statement::Comment(CommentBlock { lines }));
}

/// Append `export const name: T = initializer;`
pub fn add_const_export(
    file: &mut SourceFile,
    name: &str,
    initializer: &str,
    type_annotation: Option<&str>,
    doc: Option<&str>,
) -> Result<(), AstError> {
    require_identifier("constant name", name)?;
    require_text("initializer", initializer)?;
    if let Some(ty) = type_annotation {
        require_text("type annotation", ty)?;
    }

    file.push(Statement::Variable(VariableStatement {
        name: name.to_string(),
        exported: true,
        docs: docs(doc),
        ty: type_annotation.map(|t| TypeNode::raw(t.trim())),
        initializer: Expr::Raw(initializer.trim().to_string()),
    }));
    Ok(())
}

/// Append `export type name = ty;`
pub fn add_type_alias(
    file: &mut SourceFile,
    name: &str,
    ty: &str,
    doc: Option<&str>,
) -> Result<(), AstError> {
    require_identifier("type alias name", name)?;
    require_text("aliased type", ty)?;

    file.push(Statement::TypeAlias(TypeAliasDeclaration {
        name: name.to_string(),
        exported: true,
        docs: docs(doc),
        ty: TypeNode::raw(ty.trim()),
    }));
    Ok(())
}

/// Append `export * from "./module"` for index files
///
/// Relative specifiers are kept; bare module names get a `./` prefix.
pub fn add_barrel_export(file: &mut SourceFile, module: &str) -> Result<(), AstError> {
    require_text("module specifier", module)?;
    let module = module.trim();
    let specifier = if module.starts_with("./") || module.starts_with("../") {
        module.to_string()
    } else {
        format!("./{module}")
    };
    file.push(Statement::ExportAll(ExportAllDeclaration {
        module_specifier: specifier,
    }));
    Ok(())
}

/// Print a file holding every descriptor's declarations
///
/// The `effect` import is computed from what the descriptors use and sorted
/// by name; declarations follow in descriptor order.
pub fn render_descriptors(descriptors: &[PatternDescriptor]) -> Result<String, AstError> {
    let mut imports: Vec<&'static str> = descriptors
        .iter()
        .flat_map(PatternDescriptor::effect_imports)
        .collect();
    imports.sort_unstable();
    imports.dedup();

    let mut file = SourceFile::new();
    add_effect_imports(&mut file, &imports)?;
    for descriptor in descriptors {
        descriptor.apply(&mut file)?;
    }
    Ok(print_source_file(&file))
}
