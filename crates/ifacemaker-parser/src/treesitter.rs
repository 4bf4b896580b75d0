//! Tree-sitter integration for Go parsing.

use tree_sitter::{Node, Tree};

/// Errors that abort a scan. No partial result is produced.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("source is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("failed to load Go grammar: {0}")]
    Language(String),
    #[error("parser produced no tree")]
    NoTree,
    #[error("syntax error at {line}:{column}: {detail}")]
    Syntax {
        line: usize,
        column: usize,
        detail: String,
    },
}

/// The Go grammar.
pub fn go_language() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Parse Go source. Trees containing ERROR or MISSING nodes are rejected.
pub fn parse_go(source: &str) -> Result<Tree, ScanError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&go_language())
        .map_err(|e| ScanError::Language(e.to_string()))?;
    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or(ScanError::NoTree)?;

    if let Some(bad) = first_error(tree.root_node()) {
        let pos = bad.start_position();
        return Err(ScanError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
            detail: describe_error(&bad, source),
        });
    }
    Ok(tree)
}

/// Source text covered by a node.
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(bad) = first_error(child) {
            return Some(bad);
        }
    }
    Some(node)
}

fn describe_error(node: &Node, source: &str) -> String {
    if node.is_missing() {
        return format!("missing {}", node.kind());
    }
    let text = node_text(node, source);
    let line = text.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return "unexpected end of input".to_string();
    }
    let snippet: String = line.chars().take(40).collect();
    format!("unexpected `{}`", snippet)
}
