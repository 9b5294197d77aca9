//! Line-annotated document tree produced by [`crate::parse`].
//!
//! The tree is owned by the parser's caller and is only ever read by the
//! validator. Every node carries the 1-based line it starts on.

/// A parsed document. `root` is `None` when the input holds no document at all
/// (empty stream, comments only).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Option<Node>,
}

/// A node in the parsed tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub line: usize,
}

/// Structural kind of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Mapping(Vec<Entry>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// One `key: value` pair of a mapping, in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: String,
    pub key_line: usize,
    pub value: Node,
}

/// Raw scalar text plus the type it resolved to in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    pub value: String,
    pub tag: ScalarTag,
}

/// Source-level type of a scalar.
///
/// Plain scalars resolve through the YAML 1.2 core schema; quoted and block
/// scalars are always [`ScalarTag::Str`] unless an explicit tag says otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

impl Node {
    pub fn mapping(entries: Vec<Entry>, line: usize) -> Self {
        Self {
            kind: NodeKind::Mapping(entries),
            line,
        }
    }

    pub fn sequence(items: Vec<Node>, line: usize) -> Self {
        Self {
            kind: NodeKind::Sequence(items),
            line,
        }
    }

    pub fn scalar(value: impl Into<String>, tag: ScalarTag, line: usize) -> Self {
        Self {
            kind: NodeKind::Scalar(Scalar {
                value: value.into(),
                tag,
            }),
            line,
        }
    }

    /// Short name of the node's kind, used in log output and for rendering
    /// non-scalar mapping keys.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Mapping(_) => "mapping",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Scalar(_) => "scalar",
        }
    }
}
