//! Single-pass scan of a Go module into a [`StructIndex`].

use crate::decls::{Declaration, classify};
use crate::treesitter::{ScanError, node_text, parse_go};
use ifacemaker_core::index::StructIndex;
use ifacemaker_core::model::ExclusionSet;
use tree_sitter::Node;

/// Caller-controlled scan behaviour.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Attach leading doc comments to extracted methods.
    pub copy_docs: bool,
    /// Method names to skip.
    pub excludes: ExclusionSet,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            copy_docs: true,
            excludes: ExclusionSet::new(),
        }
    }
}

impl ScanOptions {
    pub fn new<I, S>(copy_docs: bool, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            copy_docs,
            excludes: excludes.into_iter().collect(),
        }
    }
}

/// Scan raw module bytes. Invalid UTF-8 is rejected like a syntax error.
pub fn scan_bytes(source: &[u8], options: &ScanOptions) -> Result<StructIndex, ScanError> {
    scan(std::str::from_utf8(source)?, options)
}

/// Parse `source` and aggregate methods and embedded members per owning type.
///
/// Declarations are processed in source order. A parse failure returns the
/// error and nothing else.
pub fn scan(source: &str, options: &ScanOptions) -> Result<StructIndex, ScanError> {
    let tree = parse_go(source)?;
    let root = tree.root_node();
    let imports = collect_imports(&root, source);

    let mut index = StructIndex::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match classify(&child, source, options) {
            Declaration::Type(decl) => index.record_type(&decl.name, decl.embedded),
            Declaration::Method(decl) => index.record_method(&decl.owner, decl.method, &imports),
            Declaration::Other => {}
        }
    }

    tracing::debug!(
        types = index.len(),
        imports = imports.len(),
        "scanned Go module"
    );
    Ok(index)
}

/// Import descriptors of a module: `alias "path"` or `"path"`, in source order.
pub fn collect_imports(root: &Node, source: &str) -> Vec<String> {
    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "import_declaration" {
            collect_import_specs(&child, source, &mut imports);
        }
    }
    imports
}

fn collect_import_specs(node: &Node, source: &str, imports: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                let Some(path) = child.child_by_field_name("path") else {
                    continue;
                };
                let path = node_text(&path, source);
                let spec = match child.child_by_field_name("name") {
                    Some(alias) => format!("{} {}", node_text(&alias, source), path),
                    None => path.to_string(),
                };
                imports.push(spec);
            }
            "import_spec_list" => collect_import_specs(&child, source, imports),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_imports_keeps_aliases_and_order() {
        let source = r#"package p

import "fmt"

import (
	"io"
	str "strings"
	_ "embed"
	. "math"
	"io"
)
"#;
        let tree = parse_go(source).unwrap();
        let imports = collect_imports(&tree.root_node(), source);
        assert_eq!(
            imports,
            vec![
                r#""fmt""#,
                r#""io""#,
                r#"str "strings""#,
                r#"_ "embed""#,
                r#". "math""#,
                r#""io""#,
            ]
        );
    }

    #[test]
    fn test_scan_bytes_rejects_invalid_utf8() {
        let err = scan_bytes(b"package p\n\xff\n", &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::Encoding(_)));
    }

    #[test]
    fn test_options_new_collects_excludes() {
        let options = ScanOptions::new(false, ["String"]);
        assert!(!options.copy_docs);
        assert!(options.excludes.contains("String"));
    }
}
