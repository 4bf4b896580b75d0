//! Classification of top-level Go declarations.
//!
//! Each direct child of `source_file` is either a type declaration (which may
//! contribute embedded members), a method declaration bound to a single
//! receiver, or irrelevant to interface extraction.

use crate::scan::ScanOptions;
use crate::signature::{extract_fields, field_groups, render_signature};
use crate::treesitter::node_text;
use ifacemaker_core::model::Method;
use tree_sitter::Node;

/// A classified top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Type(TypeDecl),
    Method(MethodDecl),
    Other,
}

/// The first spec of a `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Type names of fields declared without a field name.
    pub embedded: Vec<String>,
}

/// An exported, non-excluded method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Receiver type with a leading `*` removed.
    pub owner: String,
    pub name: String,
    pub method: Method,
}

/// Classify one top-level node.
pub fn classify(node: &Node, source: &str, options: &ScanOptions) -> Declaration {
    match node.kind() {
        "type_declaration" => {
            classify_type(node, source).map_or(Declaration::Other, Declaration::Type)
        }
        "method_declaration" => {
            classify_method(node, source, options).map_or(Declaration::Other, Declaration::Method)
        }
        _ => Declaration::Other,
    }
}

fn classify_type(node: &Node, source: &str) -> Option<TypeDecl> {
    // Grouped declarations only surface their first spec.
    let mut cursor = node.walk();
    let spec = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "type_spec" | "type_alias"))?;
    let name = node_text(&spec.child_by_field_name("name")?, source).to_string();

    let embedded = spec
        .child_by_field_name("type")
        .filter(|t| t.kind() == "struct_type")
        .map(|st| embedded_members(&st, source))
        .unwrap_or_default();

    Some(TypeDecl { name, embedded })
}

fn embedded_members(struct_type: &Node, source: &str) -> Vec<String> {
    let mut cursor = struct_type.walk();
    let Some(fields) = struct_type
        .named_children(&mut cursor)
        .find(|c| c.kind() == "field_declaration_list")
    else {
        return Vec::new();
    };

    let mut embedded = Vec::new();
    let mut fc = fields.walk();
    for field in fields.named_children(&mut fc) {
        if field.kind() != "field_declaration" || field.child_by_field_name("name").is_some() {
            continue;
        }
        // The optional `*` of `*Lid` is a sibling token, not part of the type field.
        if let Some(ty) = field.child_by_field_name("type") {
            embedded.push(node_text(&ty, source).to_string());
        }
    }
    embedded
}

fn classify_method(node: &Node, source: &str, options: &ScanOptions) -> Option<MethodDecl> {
    let name = node_text(&node.child_by_field_name("name")?, source);

    let receiver = field_groups(node.child_by_field_name("receiver"), source);
    let arity: usize = receiver.iter().map(|g| g.arity()).sum();
    if arity != 1 {
        tracing::trace!(method = name, arity, "receiver does not bind exactly one type");
        return None;
    }
    let owner = receiver[0].ty.strip_prefix('*').unwrap_or(receiver[0].ty.as_str());

    if !is_exported(name) {
        tracing::trace!(owner, method = name, "skipping unexported method");
        return None;
    }
    if options.excludes.contains(name) {
        tracing::debug!(owner, method = name, "skipping excluded method");
        return None;
    }

    let params = extract_fields(node.child_by_field_name("parameters"), source);
    let results = extract_fields(node.child_by_field_name("result"), source);
    let docs = if options.copy_docs {
        doc_comments(node, source)
    } else {
        Vec::new()
    };

    Some(MethodDecl {
        owner: owner.to_string(),
        name: name.to_string(),
        method: Method::new(render_signature(name, &params, &results), docs),
    })
}

/// Byte-wise exported check: the first byte must not sort after `Z`.
pub fn is_exported(name: &str) -> bool {
    name.as_bytes().first().is_some_and(|b| *b <= b'Z')
}

/// The comment group attached to a declaration: comments directly above it
/// with no blank line in between, ending on the line before the declaration.
/// A comment that trails the previous declaration on its own line is excluded.
pub fn doc_comments(node: &Node, source: &str) -> Vec<String> {
    let mut group: Vec<Node> = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(prev) = current {
        let end_row = prev.end_position().row;
        if prev.kind() != "comment" || end_row + 1 < next_row {
            break;
        }
        // The group must end on the line right above the declaration.
        if group.is_empty() && end_row + 1 != next_row {
            break;
        }
        next_row = prev.start_position().row;
        group.push(prev);
        current = prev.prev_named_sibling();
    }

    if let Some(before) = current.filter(|n| n.kind() != "comment") {
        let row = before.end_position().row;
        while group.last().is_some_and(|c| c.start_position().row == row) {
            group.pop();
        }
    }

    group
        .iter()
        .rev()
        .map(|c| node_text(c, source).to_string())
        .collect()
}
