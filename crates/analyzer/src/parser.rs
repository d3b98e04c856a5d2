use crate::error::{AnalyzerError, Result};
use tree_sitter::{Node, Parser, Tree};

/// A parsed source file: the tree plus the text it was parsed from.
///
/// Tree-sitter nodes only carry byte ranges, so the source has to travel
/// with the tree for identifier extraction.
#[derive(Debug)]
pub struct SourceTree {
    tree: Tree,
    source: String,
}

impl SourceTree {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text covered by a node.
    pub fn text_of(&self, node: Node<'_>) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }
}

/// Parse source text as Python.
///
/// Tree-sitter always produces a tree; invalid input shows up as ERROR or
/// MISSING nodes. Those are rejected here so callers see a syntax error with
/// a position instead of a half-usable tree.
pub fn parse_source(source: &str) -> Result<SourceTree> {
    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| AnalyzerError::Parser(format!("Failed to set language: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalyzerError::Parser("Failed to parse source".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(root);
        return Err(AnalyzerError::Syntax { line, column });
    }

    Ok(SourceTree {
        tree,
        source: source.to_string(),
    })
}

/// Position of the first ERROR or MISSING node, 1-based line.
fn first_error_position(node: Node<'_>) -> (usize, usize) {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return (pos.row + 1, pos.column);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_position(child);
        }
    }

    let pos = node.start_position();
    (pos.row + 1, pos.column)
}
