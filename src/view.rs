//! Typed read-only views over [`Node`]s.
//!
//! Each accessor succeeds only for the matching structural kind and never
//! records anything; callers decide what a mismatch means.

use crate::node::{Node, NodeKind, ScalarTag};
use std::collections::HashMap;

/// A mapping node projected into field lookups.
///
/// Duplicate keys resolve silently: the field keeps the position of its first
/// declaration, with the value and key line of its last one.
#[derive(Debug)]
pub struct MappingView<'a> {
    fields: Vec<Field<'a>>,
    index: HashMap<&'a str, usize>,
}

#[derive(Clone, Copy, Debug)]
struct Field<'a> {
    key: &'a str,
    key_line: usize,
    value: &'a Node,
}

impl<'a> MappingView<'a> {
    /// The value node of `key`, if declared.
    pub fn get(&self, key: &str) -> Option<&'a Node> {
        self.index.get(key).map(|&i| self.fields[i].value)
    }

    /// Line on which `key` was declared.
    pub fn key_line(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&i| self.fields[i].key_line)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Node)> + '_ {
        self.fields.iter().map(|f| (f.key, f.value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn as_mapping(node: &Node) -> Option<MappingView<'_>> {
    let NodeKind::Mapping(entries) = &node.kind else {
        return None;
    };
    let mut fields: Vec<Field<'_>> = Vec::with_capacity(entries.len());
    let mut index = HashMap::with_capacity(entries.len());
    for entry in entries {
        let field = Field {
            key: entry.key.as_str(),
            key_line: entry.key_line,
            value: &entry.value,
        };
        match index.get(entry.key.as_str()).copied() {
            Some(i) => fields[i] = field,
            None => {
                index.insert(entry.key.as_str(), fields.len());
                fields.push(field);
            }
        }
    }
    Some(MappingView { fields, index })
}

pub fn as_sequence(node: &Node) -> Option<&[Node]> {
    match &node.kind {
        NodeKind::Sequence(items) => Some(items),
        _ => None,
    }
}

/// Raw text of a scalar, whatever its source type: `"42"` and `42` both
/// yield `"42"`.
pub fn as_scalar_str(node: &Node) -> Option<&str> {
    match &node.kind {
        NodeKind::Scalar(s) => Some(s.value.as_str()),
        _ => None,
    }
}

/// Text of a scalar written as an integer in the source. Quoted numerals and
/// every other scalar type yield `None`.
pub fn as_tagged_int(node: &Node) -> Option<&str> {
    match &node.kind {
        NodeKind::Scalar(s) if s.tag == ScalarTag::Int => Some(s.value.as_str()),
        _ => None,
    }
}
