//! Data model for extracted method signatures.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single extracted method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Rendered `Name(params) results` text.
    pub code: String,
    /// Verbatim doc comment lines, including their `//` or `/*` markers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl Method {
    pub fn new(code: impl Into<String>, docs: Vec<String>) -> Self {
        Self {
            code: code.into(),
            docs,
        }
    }

    /// Doc lines followed by the signature, ready to drop into an interface body.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.docs.len() + 1);
        lines.extend(self.docs.iter().cloned());
        lines.push(self.code.clone());
        lines
    }
}

/// Aggregated metadata for one owning type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructData {
    /// Embedded member type names, in declaration order. Duplicates are kept.
    pub embedded: Vec<String>,
    /// Methods in the order they were encountered.
    pub methods: Vec<Method>,
    /// Import descriptors of the module the methods came from.
    pub imports: Vec<String>,
}

impl StructData {
    /// All method lines (docs and signatures) in order.
    pub fn method_lines(&self) -> Vec<String> {
        self.methods.iter().flat_map(Method::lines).collect()
    }
}

/// Method names that are never aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
