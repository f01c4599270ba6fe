//! Property-based tests for AST builders
//! **Covers: builder output always parses (empty lists included), effect
//! imports never repeat, rejected descriptors leave the file untouched**

use std::collections::BTreeSet;

use proptest::prelude::*;

use codeforge_generation::ast::{
    add_context_tag_class, add_effect_imports, render_descriptors, ContextTagClassOptions,
    ErrorField, InterfaceOptions, InterfaceProperty, MethodSignature, ParamSpec, PatternDescriptor,
    SchemaAnnotations, SchemaDefinitionOptions, SchemaField, SchemaType, SourceFile, StaticLayer,
    TaggedErrorClassOptions,
};
use codeforge_generation::validation::{validate_typescript, ValidateOptions};

const TYPES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "ReadonlyArray<string>",
    "Effect.Effect<number>",
    "Option.Option<string>",
    "Record<string, number>",
    "{ readonly nested: string }",
];

const SCHEMAS: &[&str] = &[
    "Schema.String",
    "Schema.Number",
    "Schema.Boolean",
    "Schema.Array(Schema.String)",
];

const IMPLEMENTATIONS: &[&str] = &["makeLive()", "Layer.empty", "Effect.runSync(build)"];

const NAMESPACES: &[&str] = &["Context", "Data", "Effect", "Layer", "Option", "Schema"];

/// Strategy for member names that can never be keywords
fn member_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,5}[A-Z0-9][a-z0-9]{0,4}"
}

/// Strategy for type names with a fixed prefix
fn type_name_strategy(prefix: &'static str) -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9]{0,6}".prop_map(move |s| format!("{prefix}{s}"))
}

fn unique_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(member_name_strategy(), 0..=max)
        .prop_map(|set| set.into_iter().collect())
}

fn text_from(options: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(options).prop_map(str::to_string)
}

fn method_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    (unique_names(3), text_from(TYPES))
}

fn context_tag_strategy() -> impl Strategy<Value = ContextTagClassOptions> {
    (
        type_name_strategy("Svc"),
        unique_names(4),
        prop::collection::vec(method_strategy(), 4),
        unique_names(3),
        prop::collection::vec(text_from(IMPLEMENTATIONS), 3),
        prop::option::of("[ -~]{0,20}"),
    )
        .prop_map(|(name, method_names, methods, layer_names, impls, jsdoc)| {
            ContextTagClassOptions {
                tag_identifier: name.clone(),
                service_name: name,
                methods: method_names
                    .into_iter()
                    .zip(methods)
                    .map(|(method, (params, ret))| MethodSignature {
                        name: method,
                        params: params
                            .into_iter()
                            .map(|p| ParamSpec {
                                name: p,
                                ty: "string".to_string(),
                            })
                            .collect(),
                        return_type: ret,
                    })
                    .collect(),
                static_layers: layer_names
                    .into_iter()
                    .zip(impls)
                    .map(|(name, implementation)| StaticLayer {
                        name: capitalize(&name),
                        implementation,
                    })
                    .collect(),
                jsdoc,
            }
        })
}

fn tagged_error_strategy() -> impl Strategy<Value = TaggedErrorClassOptions> {
    (
        type_name_strategy("Err"),
        unique_names(4),
        prop::collection::vec((text_from(TYPES), any::<bool>()), 4),
    )
        .prop_map(|(name, field_names, specs)| TaggedErrorClassOptions {
            tag_name: name.clone(),
            class_name: name,
            fields: field_names
                .into_iter()
                .zip(specs)
                .map(|(name, (ty, optional))| ErrorField { name, ty, optional })
                .collect(),
            jsdoc: None,
        })
}

fn schema_strategy() -> impl Strategy<Value = SchemaDefinitionOptions> {
    let schema_type = prop::sample::select(vec![
        SchemaType::Struct,
        SchemaType::String,
        SchemaType::Number,
        SchemaType::Boolean,
        SchemaType::BigInt,
        SchemaType::Date,
        SchemaType::Unknown,
    ]);
    let annotations = prop::option::of(
        (
            prop::option::of("[ -~]{0,12}"),
            prop::option::of("[ -~]{0,12}"),
            prop::collection::vec(("x[A-Z][a-zA-Z-]{0,6}", "[ -~]{0,8}"), 0..3),
        )
            .prop_map(|(identifier, title, extra)| SchemaAnnotations {
                identifier,
                title,
                description: None,
                extra: extra.into_iter().collect(),
            }),
    );
    (
        type_name_strategy("Sch"),
        schema_type,
        unique_names(4),
        prop::collection::vec((text_from(SCHEMAS), any::<bool>()), 4),
        prop::option::of("[A-Za-z][A-Za-z ]{0,9}"),
        annotations,
        any::<bool>(),
    )
        .prop_map(
            |(name, schema_type, field_names, specs, brand, annotations, export_type)| {
                let fields = if schema_type == SchemaType::Struct {
                    field_names
                        .into_iter()
                        .zip(specs)
                        .map(|(name, (schema, optional))| SchemaField {
                            name,
                            schema,
                            optional,
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                SchemaDefinitionOptions {
                    name,
                    schema_type,
                    fields,
                    brand,
                    annotations,
                    export_type,
                    jsdoc: None,
                }
            },
        )
}

fn interface_strategy() -> impl Strategy<Value = InterfaceOptions> {
    (
        type_name_strategy("Ifc"),
        unique_names(4),
        prop::collection::vec((text_from(TYPES), any::<bool>(), any::<bool>()), 4),
    )
        .prop_map(|(name, property_names, specs)| InterfaceOptions {
            name,
            properties: property_names
                .into_iter()
                .zip(specs)
                .map(|(name, (ty, optional, readonly))| InterfaceProperty {
                    name,
                    ty,
                    optional,
                    readonly,
                })
                .collect(),
            jsdoc: Some("Generated\nrow".to_string()),
        })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

proptest! {
    /// Property: any combination of descriptors prints to source that parses
    /// and passes the semantic pass
    #[test]
    fn prop_builder_output_is_valid_typescript(
        tag in context_tag_strategy(),
        error in tagged_error_strategy(),
        schema in schema_strategy(),
        interface in interface_strategy(),
    ) {
        let descriptors = vec![
            PatternDescriptor::SchemaDefinition(schema),
            PatternDescriptor::TaggedErrorClass(error),
            PatternDescriptor::Interface(interface),
            PatternDescriptor::ContextTagClass(tag),
        ];
        let source = render_descriptors(&descriptors).unwrap();

        let result = validate_typescript(&source, &ValidateOptions::with_semantics());
        prop_assert!(result.is_ok(), "{:?}\n{}", result, source);
    }

    /// Property: merging effect imports never repeats a specifier
    #[test]
    fn prop_effect_imports_merge(
        first in prop::sample::subsequence(NAMESPACES, 0..=NAMESPACES.len()),
        second in prop::sample::subsequence(NAMESPACES, 0..=NAMESPACES.len()),
    ) {
        let mut file = SourceFile::new();
        add_effect_imports(&mut file, &first).unwrap();
        add_effect_imports(&mut file, &second).unwrap();

        let imports: Vec<_> = file.imports().collect();
        let expected: BTreeSet<&str> = first.iter().chain(&second).copied().collect();
        if expected.is_empty() {
            prop_assert!(imports.is_empty());
        } else {
            prop_assert_eq!(imports.len(), 1);
            let named: BTreeSet<&str> = imports[0].named.iter().map(String::as_str).collect();
            prop_assert_eq!(named.len(), imports[0].named.len());
            prop_assert_eq!(named, expected);
        }
    }

    /// Property: a descriptor with an invalid name changes nothing
    #[test]
    fn prop_rejected_descriptor_leaves_file_untouched(
        tag in context_tag_strategy(),
        bad in "[a-z]{1,4}-[a-z]{1,4}",
    ) {
        let mut file = SourceFile::new();
        add_effect_imports(&mut file, &["Context"]).unwrap();
        let before = file.clone();

        let mut broken = tag;
        broken.service_name = bad;
        prop_assert!(add_context_tag_class(&mut file, &broken).is_err());
        prop_assert_eq!(file, before);
    }
}
