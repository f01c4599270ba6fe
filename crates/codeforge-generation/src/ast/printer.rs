//! Renders a [`SourceFile`] as TypeScript text
//!
//! Output uses two-space indentation, double-quoted strings and explicit
//! semicolons. Statements are separated by a blank line, except that runs of
//! imports stay together and a comment sits directly on top of the statement
//! that follows it.

use crate::ast::identifier::is_identifier_name;
use crate::ast::nodes::{
    split_lines, ClassDeclaration, CommentBlock, Expr, Heritage, ImportDeclaration, InterfaceDeclaration,
    JsDoc, ObjectProperty, PropertyDeclaration, SourceFile, Statement, TypeAliasDeclaration,
    TypeMember, TypeNode, VariableStatement,
};

const INDENT: &str = "  ";

/// Print a whole file; the result ends with a single newline unless empty
pub fn print_source_file(file: &SourceFile) -> String {
    let mut out = String::new();
    let mut previous: Option<&Statement> = None;

    for statement in &file.statements {
        if let Some(prev) = previous {
            let keep_together = matches!(prev, Statement::Comment(_))
                || (is_import_like(prev) && is_import_like(statement));
            if !keep_together {
                out.push('\n');
            }
        }
        out.push_str(&print_statement(statement));
        out.push('\n');
        previous = Some(statement);
    }
    out
}

fn is_import_like(statement: &Statement) -> bool {
    matches!(statement, Statement::Import(_) | Statement::ExportAll(_))
}

/// Print one statement without a trailing newline
pub fn print_statement(statement: &Statement) -> String {
    match statement {
        Statement::Import(import) => print_import(import),
        Statement::ExportAll(export) => {
            format!("export * from {};", quote(&export.module_specifier))
        }
        Statement::Class(class) => print_class(class),
        Statement::Interface(interface) => print_interface(interface),
        Statement::TypeAlias(alias) => print_type_alias(alias),
        Statement::Variable(variable) => print_variable(variable),
        Statement::Comment(comment) => print_comment(comment),
        Statement::Raw(text) => text.trim_end_matches('\n').to_string(),
    }
}

fn print_import(import: &ImportDeclaration) -> String {
    let keyword = if import.type_only { "import type" } else { "import" };
    if import.named.is_empty() {
        return format!("{keyword} {{}} from {};", quote(&import.module_specifier));
    }
    format!(
        "{keyword} {{ {} }} from {};",
        import.named.join(", "),
        quote(&import.module_specifier)
    )
}

fn print_comment(comment: &CommentBlock) -> String {
    comment
        .lines
        .iter()
        .flat_map(|line| match split_lines(line).as_slice() {
            [] => vec![String::new()],
            parts => parts.iter().map(|p| p.trim_end().to_string()).collect(),
        })
        .map(|line| {
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_docs(docs: Option<&JsDoc>) -> String {
    let Some(docs) = docs else {
        return String::new();
    };
    let lines: Vec<String> = docs.lines.iter().map(|l| l.replace("*/", "*\\/")).collect();
    match lines.as_slice() {
        [] => String::new(),
        [single] => format!("/** {single} */\n"),
        many => {
            let mut out = String::from("/**\n");
            for line in many {
                if line.is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(&format!(" * {line}\n"));
                }
            }
            out.push_str(" */\n");
            out
        }
    }
}

fn export_prefix(exported: bool) -> &'static str {
    if exported {
        "export "
    } else {
        ""
    }
}

fn print_class(class: &ClassDeclaration) -> String {
    let mut out = print_docs(class.docs.as_ref());
    out.push_str(export_prefix(class.exported));
    out.push_str("class ");
    out.push_str(&class.name);
    if let Some(heritage) = &class.heritage {
        out.push_str(" extends ");
        out.push_str(&print_heritage(heritage));
    }

    if class.members.is_empty() {
        out.push_str(" {}");
        return out;
    }

    out.push_str(" {\n");
    for member in &class.members {
        out.push_str(INDENT);
        out.push_str(&print_property(member, 1));
        out.push('\n');
    }
    out.push('}');
    out
}

fn print_heritage(heritage: &Heritage) -> String {
    let mut out = print_expr(&heritage.expression, 0);
    out.push_str(&print_type_arguments(&heritage.type_arguments, 0));
    out
}

fn print_property(property: &PropertyDeclaration, indent: usize) -> String {
    let mut out = String::new();
    if property.is_static {
        out.push_str("static ");
    }
    if property.readonly {
        out.push_str("readonly ");
    }
    out.push_str(&property.name);
    if let Some(ty) = &property.ty {
        out.push_str(": ");
        out.push_str(&print_type(ty, indent));
    }
    if let Some(initializer) = &property.initializer {
        out.push_str(" = ");
        out.push_str(&print_expr(initializer, indent));
    }
    out.push(';');
    out
}

fn print_interface(interface: &InterfaceDeclaration) -> String {
    let mut out = print_docs(interface.docs.as_ref());
    out.push_str(export_prefix(interface.exported));
    out.push_str("interface ");
    out.push_str(&interface.name);
    out.push(' ');
    out.push_str(&print_members(&interface.members, 0));
    out
}

fn print_type_alias(alias: &TypeAliasDeclaration) -> String {
    format!(
        "{}{}type {} = {};",
        print_docs(alias.docs.as_ref()),
        export_prefix(alias.exported),
        alias.name,
        print_type(&alias.ty, 0)
    )
}

fn print_variable(variable: &VariableStatement) -> String {
    let annotation = variable
        .ty
        .as_ref()
        .map(|ty| format!(": {}", print_type(ty, 0)))
        .unwrap_or_default();
    format!(
        "{}{}const {}{} = {};",
        print_docs(variable.docs.as_ref()),
        export_prefix(variable.exported),
        variable.name,
        annotation,
        print_expr(&variable.initializer, 0)
    )
}

fn pad(indent: usize) -> String {
    INDENT.repeat(indent)
}

/// `{ .. }` body of an interface or object type
fn print_members(members: &[TypeMember], indent: usize) -> String {
    if members.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for member in members {
        out.push_str(&pad(indent + 1));
        if member.readonly {
            out.push_str("readonly ");
        }
        out.push_str(&member.name);
        if member.optional {
            out.push('?');
        }
        out.push_str(": ");
        out.push_str(&print_type(&member.ty, indent + 1));
        out.push_str(";\n");
    }
    out.push_str(&pad(indent));
    out.push('}');
    out
}

fn print_type_arguments(arguments: &[TypeNode], indent: usize) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let printed: Vec<String> = arguments.iter().map(|a| print_type(a, indent)).collect();
    format!("<{}>", printed.join(", "))
}

/// Print a type; nested literals open at `indent`
pub fn print_type(ty: &TypeNode, indent: usize) -> String {
    match ty {
        TypeNode::Reference {
            name,
            type_arguments,
        } => format!("{name}{}", print_type_arguments(type_arguments, indent)),
        TypeNode::Literal(members) => print_members(members, indent),
        TypeNode::Function {
            parameters,
            return_type,
        } => {
            let params: Vec<String> = parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, print_type(&p.ty, indent)))
                .collect();
            format!(
                "({}) => {}",
                params.join(", "),
                print_type(return_type, indent)
            )
        }
        TypeNode::Query(expression) => format!("typeof {expression}"),
        TypeNode::Raw(text) => text.clone(),
    }
}

/// Print an expression; nested object literals open at `indent`
pub fn print_expr(expr: &Expr, indent: usize) -> String {
    match expr {
        Expr::Identifier(name) => name.clone(),
        Expr::Property { object, name } => format!("{}.{name}", print_expr(object, indent)),
        Expr::Call {
            callee,
            type_arguments,
            arguments,
        } => {
            let args: Vec<String> = arguments.iter().map(|a| print_expr(a, indent)).collect();
            format!(
                "{}{}({})",
                print_expr(callee, indent),
                print_type_arguments(type_arguments, indent),
                args.join(", ")
            )
        }
        Expr::String(value) => quote(value),
        Expr::Object(properties) => print_object(properties, indent),
        Expr::Raw(text) => text.clone(),
    }
}

fn print_object(properties: &[ObjectProperty], indent: usize) -> String {
    if properties.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for property in properties {
        out.push_str(&pad(indent + 1));
        if is_identifier_name(&property.key) {
            out.push_str(&property.key);
        } else {
            out.push_str(&quote(&property.key));
        }
        out.push_str(": ");
        out.push_str(&print_expr(&property.value, indent + 1));
        out.push_str(",\n");
    }
    out.push_str(&pad(indent));
    out.push('}');
    out
}

/// Double-quoted string literal with escapes
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
