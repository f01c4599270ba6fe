//! Single-file semantic pass
//!
//! Works on one file's syntax tree with no module resolution. Imported names
//! are taken as declared and never inspected further. The pass reports:
//!
//! - duplicate top-level declarations, per value and type space, allowing
//!   the merges TypeScript allows (interfaces with interfaces or classes,
//!   namespaces with anything, function overload signatures)
//! - duplicate members of a class body, interface body or object type
//! - type references and class `extends` roots that name nothing declared
//!   in the file, imported, or built in

use std::collections::{HashMap, HashSet};

use tree_sitter::{Node, Tree};

use crate::validation::Diagnostic;

const BUILTIN_TYPES: &[&str] = &[
    "Array", "ArrayBuffer", "ArrayLike", "AsyncGenerator", "AsyncIterable", "AsyncIterableIterator",
    "AsyncIterator", "Awaited", "BigInt", "Boolean", "Capitalize", "ConstructorParameters", "DataView",
    "Date", "Error", "Exclude", "Extract", "Function", "Generator", "InstanceType", "Iterable",
    "IterableIterator", "Iterator", "Lowercase", "Map", "NoInfer", "NonNullable", "Number", "Object",
    "Omit", "OmitThisParameter", "Parameters", "Partial", "Pick", "Promise", "PromiseLike",
    "PropertyKey", "Readonly", "ReadonlyArray", "ReadonlyMap", "ReadonlySet", "Record", "RegExp",
    "Required", "ReturnType", "Set", "String", "Symbol", "TemplateStringsArray", "ThisParameterType",
    "ThisType", "Uint8Array", "Uncapitalize", "Uppercase", "URL", "WeakMap", "WeakSet", "any",
    "bigint", "never", "null", "object", "symbol", "undefined", "unknown",
];

const BUILTIN_VALUES: &[&str] = &[
    "AggregateError", "Array", "ArrayBuffer", "BigInt", "Boolean", "DataView", "Date", "Error",
    "EvalError", "Function", "Infinity", "Intl", "JSON", "Map", "Math", "NaN", "Number", "Object",
    "Promise", "Proxy", "RangeError", "ReferenceError", "Reflect", "RegExp", "Set", "String",
    "Symbol", "SyntaxError", "TypeError", "URIError", "URL", "Uint8Array", "WeakMap", "WeakSet",
    "console", "globalThis", "undefined",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Import,
    Class,
    Interface,
    TypeAlias,
    Enum,
    Function,
    FunctionSignature,
    Variable,
    Namespace,
}

impl DeclKind {
    fn declares_value(self) -> bool {
        !matches!(self, DeclKind::Interface | DeclKind::TypeAlias)
    }

    fn declares_type(self) -> bool {
        matches!(
            self,
            DeclKind::Import
                | DeclKind::Class
                | DeclKind::Interface
                | DeclKind::TypeAlias
                | DeclKind::Enum
                | DeclKind::Namespace
        )
    }
}

fn merges_in_value_space(a: DeclKind, b: DeclKind) -> bool {
    use DeclKind::*;
    matches!(
        (a, b),
        (Namespace, _)
            | (_, Namespace)
            | (Function, FunctionSignature)
            | (FunctionSignature, Function)
            | (FunctionSignature, FunctionSignature)
    )
}

fn merges_in_type_space(a: DeclKind, b: DeclKind) -> bool {
    use DeclKind::*;
    matches!(
        (a, b),
        (Namespace, _) | (_, Namespace) | (Interface, Interface) | (Interface, Class) | (Class, Interface)
    )
}

struct Declaration<'t> {
    name: String,
    kind: DeclKind,
    node: Node<'t>,
}

/// Run the semantic pass over a parsed file
///
/// Diagnostics come back sorted by position.
pub fn check_semantics(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let root = tree.root_node();
    let mut pass = SemanticPass {
        source,
        diagnostics: Vec::new(),
        values: BUILTIN_VALUES.iter().map(|s| s.to_string()).collect(),
        types: BUILTIN_TYPES.iter().map(|s| s.to_string()).collect(),
    };

    pass.check_top_level(root);
    pass.collect_bindings(root);
    pass.check_references(root);

    let mut diagnostics = pass.diagnostics;
    diagnostics.sort();
    diagnostics.dedup();
    diagnostics
}

struct SemanticPass<'s> {
    source: &'s str,
    diagnostics: Vec<Diagnostic>,
    values: HashSet<String>,
    types: HashSet<String>,
}

impl<'s> SemanticPass<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn report(&mut self, node: Node<'_>, message: String) {
        self.diagnostics
            .push(Diagnostic::at_offset(self.source, node.start_byte(), message));
    }

    /// Duplicate top-level declarations
    fn check_top_level(&mut self, root: Node<'_>) {
        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            self.declarations_of(statement, &mut declarations);
        }

        let mut value_space: HashMap<&str, Vec<DeclKind>> = HashMap::new();
        let mut type_space: HashMap<&str, Vec<DeclKind>> = HashMap::new();
        let mut duplicates = Vec::new();

        for decl in &declarations {
            let mut clash = false;
            if decl.kind.declares_value() {
                let seen = value_space.entry(decl.name.as_str()).or_default();
                clash |= seen.iter().any(|k| !merges_in_value_space(*k, decl.kind));
                seen.push(decl.kind);
            }
            if decl.kind.declares_type() {
                let seen = type_space.entry(decl.name.as_str()).or_default();
                clash |= seen.iter().any(|k| !merges_in_type_space(*k, decl.kind));
                seen.push(decl.kind);
            }
            if clash {
                duplicates.push((decl.node, decl.name.clone()));
            }
        }

        for (node, name) in duplicates {
            self.report(node, format!("Duplicate identifier '{name}'."));
        }
    }

    fn declarations_of<'t>(&self, statement: Node<'t>, out: &mut Vec<Declaration<'t>>) {
        let kind = match statement.kind() {
            "export_statement" | "ambient_declaration" => {
                if let Some(declaration) = statement.child_by_field_name("declaration") {
                    self.declarations_of(declaration, out);
                } else {
                    let mut cursor = statement.walk();
                    for child in statement.named_children(&mut cursor) {
                        if child.kind().ends_with("declaration")
                            || matches!(child.kind(), "module" | "function_signature")
                        {
                            self.declarations_of(child, out);
                        }
                    }
                }
                return;
            }
            "import_statement" => {
                for name_node in import_bindings(statement) {
                    out.push(Declaration {
                        name: self.text(name_node).to_string(),
                        kind: DeclKind::Import,
                        node: name_node,
                    });
                }
                return;
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = statement.walk();
                for declarator in statement.named_children(&mut cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name) = declarator.child_by_field_name("name") {
                        for binding in pattern_identifiers(name) {
                            out.push(Declaration {
                                name: self.text(binding).to_string(),
                                kind: DeclKind::Variable,
                                node: binding,
                            });
                        }
                    }
                }
                return;
            }
            "class_declaration" | "abstract_class_declaration" => DeclKind::Class,
            "interface_declaration" => DeclKind::Interface,
            "type_alias_declaration" => DeclKind::TypeAlias,
            "enum_declaration" => DeclKind::Enum,
            "function_declaration" | "generator_function_declaration" => DeclKind::Function,
            "function_signature" => DeclKind::FunctionSignature,
            "module" | "internal_module" => DeclKind::Namespace,
            _ => return,
        };

        if let Some(name) = statement.child_by_field_name("name") {
            out.push(Declaration {
                name: self.text(name).to_string(),
                kind,
                node: name,
            });
        }
    }

    /// Every name bound anywhere in the file, by space
    fn collect_bindings(&mut self, node: Node<'_>) {
        match node.kind() {
            "import_statement" => {
                for binding in import_bindings(node) {
                    let name = self.text(binding).to_string();
                    self.values.insert(name.clone());
                    self.types.insert(name);
                }
                return;
            }
            "class_declaration" | "abstract_class_declaration" | "class" | "enum_declaration"
            | "module" | "internal_module" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let name = self.text(name).to_string();
                    self.values.insert(name.clone());
                    self.types.insert(name);
                }
            }
            "interface_declaration" | "type_alias_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.types.insert(self.text(name).to_string());
                }
            }
            "type_parameter" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.types.insert(self.text(name).to_string());
                }
            }
            "infer_type" | "mapped_type_clause" => {
                if let Some(name) = first_named_child_of_kind(node, &["type_identifier"]) {
                    self.types.insert(self.text(name).to_string());
                }
            }
            "function_declaration" | "generator_function_declaration" | "function_signature"
            | "function_expression" | "generator_function" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.values.insert(self.text(name).to_string());
                }
            }
            "variable_declarator" => {
                if let Some(name) = node.child_by_field_name("name") {
                    for binding in pattern_identifiers(name) {
                        self.values.insert(self.text(binding).to_string());
                    }
                }
            }
            "required_parameter" | "optional_parameter" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    for binding in pattern_identifiers(pattern) {
                        self.values.insert(self.text(binding).to_string());
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect_bindings(child);
        }
    }

    /// Unresolved type references and class `extends` roots
    fn check_references(&mut self, node: Node<'_>) {
        match node.kind() {
            "type_identifier" if is_type_reference(node) => {
                let name = self.text(node);
                if !self.types.contains(name) {
                    self.report(node, format!("Cannot find name '{name}'."));
                }
                return;
            }
            "nested_type_identifier" => {
                if let Some(root) = node
                    .child_by_field_name("module")
                    .and_then(leftmost_identifier)
                {
                    let name = self.text(root);
                    if !self.values.contains(name) && !self.types.contains(name) {
                        self.report(root, format!("Cannot find name '{name}'."));
                    }
                }
                return;
            }
            "extends_clause" => {
                if let Some(root) = node.child_by_field_name("value").and_then(leftmost_identifier) {
                    let name = self.text(root);
                    if !self.values.contains(name) {
                        self.report(root, format!("Cannot find name '{name}'."));
                    }
                }
            }
            "class_body" => self.check_class_members(node),
            "interface_body" | "object_type" => self.check_signature_members(node),
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.check_references(child);
        }
    }

    fn check_class_members(&mut self, body: Node<'_>) {
        let mut seen: HashSet<(bool, String)> = HashSet::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let counted = match member.kind() {
                "public_field_definition" => true,
                "method_definition" => !has_token(member, &["get", "set"]),
                _ => false,
            };
            if !counted {
                continue;
            }
            let Some(name) = member.child_by_field_name("name") else {
                continue;
            };
            if name.kind() == "computed_property_name" {
                continue;
            }
            let key = (has_token(member, &["static"]), property_name(self.text(name)));
            if !seen.insert(key.clone()) {
                self.report(name, format!("Duplicate identifier '{}'.", key.1));
            }
        }
    }

    fn check_signature_members(&mut self, body: Node<'_>) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if member.kind() != "property_signature" {
                continue;
            }
            let Some(name) = member.child_by_field_name("name") else {
                continue;
            };
            if name.kind() == "computed_property_name" {
                continue;
            }
            let name_text = property_name(self.text(name));
            if !seen.insert(name_text.clone()) {
                self.report(name, format!("Duplicate identifier '{name_text}'."));
            }
        }
    }
}

/// Strip quotes from string-literal property names
fn property_name(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'').to_string()
}

fn has_token(node: Node<'_>, tokens: &[&str]) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .take_while(|c| c.kind() != "property_identifier" && c.kind() != "private_property_identifier")
        .any(|c| !c.is_named() && tokens.contains(&c.kind()));
    found
}

fn first_named_child_of_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| kinds.contains(&c.kind()));
    found
}

/// Local names bound by an import statement
fn import_bindings(statement: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let Some(clause) = first_named_child_of_kind(statement, &["import_clause"]) else {
        return out;
    };

    let mut cursor = clause.walk();
    for part in clause.named_children(&mut cursor) {
        match part.kind() {
            "identifier" => out.push(part),
            "namespace_import" => {
                if let Some(name) = first_named_child_of_kind(part, &["identifier"]) {
                    out.push(name);
                }
            }
            "named_imports" => {
                let mut inner = part.walk();
                for specifier in part.named_children(&mut inner) {
                    if specifier.kind() != "import_specifier" {
                        continue;
                    }
                    let local = specifier
                        .child_by_field_name("alias")
                        .or_else(|| specifier.child_by_field_name("name"));
                    if let Some(local) = local {
                        out.push(local);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// Identifiers bound by a binding pattern
fn pattern_identifiers(pattern: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    collect_pattern_identifiers(pattern, &mut out);
    out
}

fn collect_pattern_identifiers<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => out.push(node),
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                collect_pattern_identifiers(value, out);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_pattern_identifiers(left, out);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_pattern_identifiers(child, out);
            }
        }
        _ => {}
    }
}

/// Whether a `type_identifier` is used as a reference rather than declared
fn is_type_reference(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    match parent.kind() {
        "class_declaration" | "abstract_class_declaration" | "class" | "interface_declaration"
        | "type_alias_declaration" | "type_parameter" | "mapped_type_clause" => parent
            .child_by_field_name("name")
            .map_or(true, |name| name.id() != node.id()),
        "infer_type" => first_named_child_of_kind(parent, &["type_identifier"])
            .map_or(true, |name| name.id() != node.id()),
        "nested_type_identifier" => false,
        _ => true,
    }
}

/// The identifier an expression starts with (`a` in `a.b(c).d`)
fn leftmost_identifier(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" => Some(node),
        "member_expression" => node.child_by_field_name("object").and_then(leftmost_identifier),
        "call_expression" => node.child_by_field_name("function").and_then(leftmost_identifier),
        "nested_identifier" | "non_null_expression" | "instantiation_expression" => {
            node.named_child(0).and_then(leftmost_identifier)
        }
        _ => None,
    }
}
