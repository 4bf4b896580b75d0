//! Import bookkeeping: assumed package names and reference collection.

use ifacemaker_parser::treesitter::node_text;
use std::collections::HashSet;
use tree_sitter::Node;

/// One parsed import spec.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportSpec {
    /// Unquoted import path. Sort key.
    pub path: String,
    /// Explicit name (`_`, `.` or an identifier).
    pub alias: Option<String>,
    /// Path literal as written, quotes included.
    pub literal: String,
}

impl ImportSpec {
    /// Read an `import_spec` node.
    pub fn from_node(node: &Node, source: &str) -> Option<Self> {
        let literal = node_text(&node.child_by_field_name("path")?, source).to_string();
        let alias = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source).to_string());
        Some(Self {
            path: unquote(&literal).to_string(),
            alias,
            literal,
        })
    }

    /// The identifier the import binds in the importing file, if any.
    pub fn local_name(&self) -> Option<String> {
        match self.alias.as_deref() {
            Some("_" | ".") => None,
            Some(alias) => Some(alias.to_string()),
            None => Some(assumed_package_name(&self.path)),
        }
    }

    /// Every name the import could plausibly bind. The real package name is
    /// only known after loading the package, so an unaliased import also
    /// answers to its raw last path element (`v1` in `k8s.io/api/core/v1`).
    pub fn candidate_names(&self) -> Vec<String> {
        if self.alias.is_some() {
            return self.local_name().into_iter().collect();
        }
        let mut names = vec![assumed_package_name(&self.path)];
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        if !last.is_empty() && !names.iter().any(|n| n == last) {
            names.push(last.to_string());
        }
        names
    }

    /// Blank and dot imports have side effects or no qualifier to look for.
    pub fn is_side_effect(&self) -> bool {
        matches!(self.alias.as_deref(), Some("_" | "."))
    }

    /// `alias "path"` or `"path"`.
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {}", alias, self.literal),
            None => self.literal.clone(),
        }
    }
}

fn unquote(literal: &str) -> &str {
    literal.trim_matches(|c| c == '"' || c == '`')
}

/// Package name conventionally bound by an import path: the last element,
/// skipping a `/vN` major-version suffix, minus a `go-` prefix and anything
/// from the first non-identifier character (`yaml.v3` -> `yaml`).
pub fn assumed_package_name(path: &str) -> String {
    let mut elems = path.rsplit('/');
    let mut base = elems.next().unwrap_or(path);
    if is_major_version(base)
        && let Some(parent) = elems.next()
    {
        base = parent;
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    let end = base
        .find(|c: char| !(c == '_' || c.is_alphanumeric()))
        .unwrap_or(base.len());
    base[..end].to_string()
}

fn is_major_version(elem: &str) -> bool {
    elem.strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Package qualifiers used anywhere outside the package clause and imports:
/// `pkg` in `pkg.Type` and in `pkg.Const` selector expressions.
pub fn referenced_packages(root: &Node, source: &str) -> HashSet<String> {
    let mut used = HashSet::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if !matches!(child.kind(), "package_clause" | "import_declaration") {
            collect_qualifiers(&child, source, &mut used);
        }
    }
    used
}

fn collect_qualifiers(node: &Node, source: &str, used: &mut HashSet<String>) {
    let qualifier = match node.kind() {
        "qualified_type" => node.child_by_field_name("package"),
        "selector_expression" => node
            .child_by_field_name("operand")
            .filter(|op| op.kind() == "identifier"),
        _ => None,
    };
    if let Some(q) = qualifier {
        used.insert(node_text(&q, source).to_string());
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_qualifiers(&child, source, used);
    }
}
