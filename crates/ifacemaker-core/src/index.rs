//! Aggregation of classified declarations into per-type metadata.
//!
//! A [`StructIndex`] is owned by a single scan. Entries are created lazily on
//! first reference, whether that reference is a type declaration or a method
//! receiver, and are only ever appended to.

use crate::model::{Method, StructData};
use serde::Serialize;
use std::collections::BTreeMap;

/// Owning-type name -> aggregated metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StructIndex {
    types: BTreeMap<String, StructData>,
}

impl StructIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `name`, default-constructing it on first reference.
    pub fn entry(&mut self, name: &str) -> &mut StructData {
        self.types.entry(name.to_string()).or_default()
    }

    /// Append embedded member names from a type declaration.
    pub fn record_type<I>(&mut self, name: &str, embedded: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entry(name).embedded.extend(embedded);
    }

    /// Append a method and overwrite the entry's imports with the module snapshot.
    pub fn record_method(&mut self, owner: &str, method: Method, imports: &[String]) {
        let data = self.entry(owner);
        data.methods.push(method);
        data.imports = imports.to_vec();
    }

    pub fn get(&self, name: &str) -> Option<&StructData> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructData)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Take ownership of one entry.
    pub fn remove(&mut self, name: &str) -> Option<StructData> {
        self.types.remove(name)
    }
}
