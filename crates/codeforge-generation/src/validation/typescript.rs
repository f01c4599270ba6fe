//! Syntax validation with the tree-sitter TypeScript grammar

use std::path::PathBuf;

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::validation::semantic::check_semantics;
use crate::validation::{Diagnostic, ValidationError};

const SNIPPET_LIMIT: usize = 40;

/// Switches for [`validate_typescript`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Run the single-file semantic pass after parsing
    pub check_semantics: bool,
    /// Path attached to the error, if any
    pub file_name: Option<PathBuf>,
    /// Parse with the TSX grammar so JSX elements are accepted
    pub jsx: bool,
}

impl ValidateOptions {
    /// Syntax and semantic checks
    pub fn with_semantics() -> Self {
        Self {
            check_semantics: true,
            ..Self::default()
        }
    }

    /// Attach `path` to reported errors; a `.tsx` path selects the TSX grammar
    pub fn for_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.jsx = path.extension().is_some_and(|e| e == "tsx");
        self.file_name = Some(path);
        self
    }
}

/// Parse `content` as TypeScript, or as TSX when `jsx` is set
pub(crate) fn parse(content: &str, jsx: bool) -> Result<Tree, ValidationError> {
    let mut parser = Parser::new();
    let language: tree_sitter::Language = if jsx {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    };
    parser
        .set_language(&language)
        .map_err(|e| ValidationError::new(format!("Failed to load TypeScript grammar: {e}")))?;
    parser
        .parse(content, None)
        .ok_or_else(|| ValidationError::new("TypeScript parser produced no tree"))
}

/// Check that `content` is valid TypeScript
///
/// Any syntax error fails immediately with one diagnostic per error site.
/// With `check_semantics`, the semantic pass then runs and every finding is
/// reported in file order.
pub fn validate_typescript(content: &str, options: &ValidateOptions) -> Result<(), ValidationError> {
    let attach = |e: ValidationError| match &options.file_name {
        Some(path) => e.with_path(path),
        None => e,
    };

    let tree = parse(content, options.jsx).map_err(attach)?;
    let root = tree.root_node();

    if root.has_error() {
        let mut diagnostics = Vec::new();
        collect_syntax_errors(root, content, &mut diagnostics);
        diagnostics.sort();
        diagnostics.dedup();
        debug!(errors = diagnostics.len(), "TypeScript syntax errors");
        return Err(attach(ValidationError::with_diagnostics(
            "TypeScript syntax validation failed",
            diagnostics.iter().map(ToString::to_string).collect(),
        )));
    }

    if options.check_semantics {
        let diagnostics = check_semantics(&tree, content);
        if !diagnostics.is_empty() {
            debug!(errors = diagnostics.len(), "TypeScript semantic errors");
            return Err(attach(ValidationError::with_diagnostics(
                "TypeScript semantic validation failed",
                diagnostics.iter().map(ToString::to_string).collect(),
            )));
        }
    }
    Ok(())
}

fn collect_syntax_errors(node: Node<'_>, source: &str, out: &mut Vec<Diagnostic>) {
    if node.is_error() {
        out.push(Diagnostic::at_offset(
            source,
            node.start_byte(),
            unexpected_message(node, source),
        ));
        return;
    }
    if node.is_missing() {
        out.push(Diagnostic::at_offset(
            source,
            node.start_byte(),
            format!("'{}' expected.", node.kind()),
        ));
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            collect_syntax_errors(child, source, out);
        }
    }
}

fn unexpected_message(node: Node<'_>, source: &str) -> String {
    let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return "Syntax error: unexpected input".to_string();
    }
    let snippet: String = first_line.chars().take(SNIPPET_LIMIT).collect();
    format!("Syntax error: unexpected '{snippet}'")
}
