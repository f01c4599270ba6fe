//! Owned TypeScript syntax tree covering the declarations the builders emit

/// One TypeScript module, as an ordered list of top-level statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    /// Top-level statements in file order
    pub statements: Vec<Statement>,
}

impl SourceFile {
    /// Create an empty source file
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement at the end of the file
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Index just past the last import or re-export, 0 when there is none
    pub fn import_insertion_point(&self) -> usize {
        self.statements
            .iter()
            .rposition(|s| matches!(s, Statement::Import(_) | Statement::ExportAll(_)))
            .map_or(0, |i| i + 1)
    }

    /// Insert an import after the last existing import
    pub fn insert_import(&mut self, import: ImportDeclaration) {
        let at = self.import_insertion_point();
        self.statements.insert(at, Statement::Import(import));
    }

    /// Import declarations in file order
    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Whether the file has no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `import { a, b } from "m";`
    Import(ImportDeclaration),
    /// `export * from "m";`
    ExportAll(ExportAllDeclaration),
    /// A class declaration
    Class(ClassDeclaration),
    /// An interface declaration
    Interface(InterfaceDeclaration),
    /// `type N = T;`
    TypeAlias(TypeAliasDeclaration),
    /// `const n = e;`
    Variable(VariableStatement),
    /// One or more `//` comment lines
    Comment(CommentBlock),
    /// Text emitted verbatim, e.g. a rendered template preamble
    Raw(String),
}

/// Import of named bindings from a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Module specifier without quotes
    pub module_specifier: String,
    /// `import type { .. }`
    pub type_only: bool,
    /// Imported binding names, in order
    pub named: Vec<String>,
}

impl ImportDeclaration {
    /// Value import of `named` from `module_specifier`
    pub fn new(module_specifier: impl Into<String>, named: Vec<String>) -> Self {
        Self {
            module_specifier: module_specifier.into(),
            type_only: false,
            named,
        }
    }

    /// Type-only import of `named` from `module_specifier`
    pub fn type_only(module_specifier: impl Into<String>, named: Vec<String>) -> Self {
        Self {
            type_only: true,
            ..Self::new(module_specifier, named)
        }
    }
}

/// `export * from "m";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAllDeclaration {
    /// Module specifier without quotes
    pub module_specifier: String,
}

/// A `/** .. */` block; one entry per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDoc {
    /// Comment lines without leading `*`
    pub lines: Vec<String>,
}

impl JsDoc {
    /// Build a doc comment from free text, one entry per text line
    pub fn new(text: &str) -> Self {
        Self {
            lines: split_lines(text)
                .into_iter()
                .map(|l| l.trim_end().to_string())
                .collect(),
        }
    }
}

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Split `text` on every ECMAScript line terminator
///
/// `\r\n` counts as one break and a trailing terminator adds no empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split("\r\n")
        .flat_map(|chunk| chunk.split(LINE_TERMINATORS))
        .collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Plain `//` comment lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Line contents without the `// ` prefix
    pub lines: Vec<String>,
}

/// A class declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    /// Class name
    pub name: String,
    /// Prefixed with `export`
    pub exported: bool,
    /// Leading doc comment
    pub docs: Option<JsDoc>,
    /// `extends` clause
    pub heritage: Option<Heritage>,
    /// Body members in order
    pub members: Vec<PropertyDeclaration>,
}

/// The `extends` clause of a class: an expression plus optional type arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Heritage {
    /// Base class expression
    pub expression: Expr,
    /// Type arguments applied to the expression
    pub type_arguments: Vec<TypeNode>,
}

/// A class property such as `static readonly Live = impl;`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// Property name
    pub name: String,
    /// `static` modifier
    pub is_static: bool,
    /// `readonly` modifier
    pub readonly: bool,
    /// Optional type annotation
    pub ty: Option<TypeNode>,
    /// Optional initializer
    pub initializer: Option<Expr>,
}

/// An interface declaration
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclaration {
    /// Interface name
    pub name: String,
    /// Prefixed with `export`
    pub exported: bool,
    /// Leading doc comment
    pub docs: Option<JsDoc>,
    /// Property signatures in order
    pub members: Vec<TypeMember>,
}

/// `type N = T;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDeclaration {
    /// Alias name
    pub name: String,
    /// Prefixed with `export`
    pub exported: bool,
    /// Leading doc comment
    pub docs: Option<JsDoc>,
    /// Aliased type
    pub ty: TypeNode,
}

/// `const n: T = e;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    /// Binding name
    pub name: String,
    /// Prefixed with `export`
    pub exported: bool,
    /// Leading doc comment
    pub docs: Option<JsDoc>,
    /// Optional type annotation
    pub ty: Option<TypeNode>,
    /// Initializer expression
    pub initializer: Expr,
}

/// A property signature inside an interface or object type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    /// Property name
    pub name: String,
    /// `readonly` modifier
    pub readonly: bool,
    /// `?` marker
    pub optional: bool,
    /// Property type
    pub ty: TypeNode,
}

/// A named, typed parameter of a function type
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeNode,
}

/// A type expression
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// `Name` or `Name<A, B>`
    Reference {
        /// Possibly qualified type name
        name: String,
        /// Type arguments
        type_arguments: Vec<TypeNode>,
    },
    /// `{ readonly a: T; b?: U; }`
    Literal(Vec<TypeMember>),
    /// `(a: A, b: B) => R`
    Function {
        /// Parameters in order
        parameters: Vec<Parameter>,
        /// Return type
        return_type: Box<TypeNode>,
    },
    /// `typeof expr`
    Query(String),
    /// Type text supplied by the caller, emitted verbatim
    Raw(String),
}

impl TypeNode {
    /// Reference to `name` without type arguments
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    /// Caller-supplied type text
    pub fn raw(text: impl Into<String>) -> Self {
        TypeNode::Raw(text.into())
    }
}

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name`
    Identifier(String),
    /// `object.name`
    Property {
        /// Accessed expression
        object: Box<Expr>,
        /// Property name
        name: String,
    },
    /// `callee<T>(args)`
    Call {
        /// Called expression
        callee: Box<Expr>,
        /// Explicit type arguments
        type_arguments: Vec<TypeNode>,
        /// Call arguments
        arguments: Vec<Expr>,
    },
    /// A double-quoted string literal
    String(String),
    /// `{ key: value, .. }`
    Object(Vec<ObjectProperty>),
    /// Expression text supplied by the caller, emitted verbatim
    Raw(String),
}

impl Expr {
    /// `name`
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    /// `self.name`
    pub fn prop(self, name: impl Into<String>) -> Self {
        Expr::Property {
            object: Box::new(self),
            name: name.into(),
        }
    }

    /// `self(arguments)`
    pub fn call(self, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    /// `self<type_arguments>(arguments)`
    pub fn call_generic(self, type_arguments: Vec<TypeNode>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            type_arguments,
            arguments,
        }
    }

    /// Qualified access such as `Schema.String` from `"Schema.String"`
    pub fn path(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let first = Expr::ident(parts.next().unwrap_or_default());
        parts.fold(first, |object, name| object.prop(name))
    }
}

/// `key: value` inside an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    /// Property key, emitted bare
    pub key: String,
    /// Property value
    pub value: Expr,
}

impl ObjectProperty {
    /// Create a property
    pub fn new(key: impl Into<String>, value: Expr) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}
