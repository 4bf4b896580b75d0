//! Rendering of Go parameter and result lists.
//!
//! A field list is a sequence of groups, each with zero or more names sharing
//! one type (`a, b int` is a single group). Groups render in order; whether the
//! joined result needs parentheses is tracked alongside.

use crate::treesitter::node_text;
use tree_sitter::Node;

/// One `names type` group of a parameter or result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub names: Vec<String>,
    pub ty: String,
}

impl FieldGroup {
    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self {
            names: Vec::new(),
            ty: ty.into(),
        }
    }

    pub fn named<I, S>(names: I, ty: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty: ty.into(),
        }
    }

    /// `a, b int` for named groups, the bare type otherwise.
    pub fn render(&self) -> String {
        if self.names.is_empty() {
            self.ty.clone()
        } else {
            format!("{} {}", self.names.join(", "), self.ty)
        }
    }

    /// Number of bindings the group introduces; an unnamed group counts once.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// Rendered fragments of a field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFields {
    pub parts: Vec<String>,
    /// Set when the joined fragments must be parenthesised to stay
    /// unambiguous as a result list.
    pub merged: bool,
}

impl RenderedFields {
    pub fn joined(&self) -> String {
        self.parts.join(", ")
    }

    /// Result-list form: wrapped in parentheses only when merged.
    pub fn as_results(&self) -> String {
        if self.merged {
            format!("({})", self.joined())
        } else {
            self.joined()
        }
    }
}

/// Render groups in order and decide whether they need parentheses.
pub fn render_fields(groups: &[FieldGroup]) -> RenderedFields {
    let parts: Vec<String> = groups.iter().map(FieldGroup::render).collect();
    let merged = groups.len() > 1 || groups.iter().any(|g| !g.names.is_empty());
    RenderedFields { parts, merged }
}

/// Read the groups of a `parameter_list` node. A bare result type (`error` in
/// `func F() error`) yields one unnamed group; an absent list yields none.
pub fn field_groups(list: Option<Node>, source: &str) -> Vec<FieldGroup> {
    let Some(list) = list else {
        return Vec::new();
    };
    if list.kind() != "parameter_list" {
        return vec![FieldGroup::unnamed(node_text(&list, source))];
    }

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|decl| parameter_group(&decl, source))
        .collect()
}

fn parameter_group(decl: &Node, source: &str) -> Option<FieldGroup> {
    let variadic = match decl.kind() {
        "parameter_declaration" => false,
        "variadic_parameter_declaration" => true,
        _ => return None,
    };
    let ty = decl.child_by_field_name("type")?;
    let mut cursor = decl.walk();
    let names: Vec<String> = decl
        .children_by_field_name("name", &mut cursor)
        .map(|n| node_text(&n, source).to_string())
        .collect();

    let ty = node_text(&ty, source);
    let ty = if variadic {
        format!("...{}", ty)
    } else {
        ty.to_string()
    };
    Some(FieldGroup { names, ty })
}

/// Read and render a field list in one step.
pub fn extract_fields(list: Option<Node>, source: &str) -> RenderedFields {
    render_fields(&field_groups(list, source))
}

/// `Name(params) results`, with no trailing space when there are no results.
pub fn render_signature(name: &str, params: &RenderedFields, results: &RenderedFields) -> String {
    let results = results.as_results();
    if results.is_empty() {
        format!("{}({})", name, params.joined())
    } else {
        format!("{}({}) {}", name, params.joined(), results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_not_merged() {
        let r = render_fields(&[]);
        assert!(r.parts.is_empty());
        assert!(!r.merged);
        assert_eq!(r.as_results(), "");
    }

    #[test]
    fn test_single_unnamed_stays_bare() {
        let r = render_fields(&[FieldGroup::unnamed("error")]);
        assert_eq!(r.parts, vec!["error"]);
        assert!(!r.merged);
        assert_eq!(r.as_results(), "error");
    }

    #[test]
    fn test_single_named_is_merged() {
        let r = render_fields(&[FieldGroup::named(["err"], "error")]);
        assert!(r.merged);
        assert_eq!(r.as_results(), "(err error)");
    }

    #[test]
    fn test_multi_name_group() {
        let r = render_fields(&[FieldGroup::named(["x", "y"], "float64")]);
        assert_eq!(r.parts, vec!["x, y float64"]);
        assert!(r.merged);
    }

    #[test]
    fn test_two_unnamed_groups_merged() {
        let r = render_fields(&[FieldGroup::unnamed("int"), FieldGroup::unnamed("error")]);
        assert_eq!(r.as_results(), "(int, error)");
    }

    #[test]
    fn test_render_signature_without_results() {
        let params = render_fields(&[FieldGroup::named(["ctx"], "context.Context")]);
        let sig = render_signature("Close", &params, &RenderedFields::default());
        assert_eq!(sig, "Close(ctx context.Context)");
    }

    #[test]
    fn test_arity_counts_unnamed_once() {
        assert_eq!(FieldGroup::unnamed("Box").arity(), 1);
        assert_eq!(FieldGroup::named(["a", "b"], "Box").arity(), 2);
    }
}
