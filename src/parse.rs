//! YAML → [`Document`] with per-node source lines and scalar type tags.
//!
//! Built on the `yaml-rust2` event stream. Only the first document of a
//! stream is read; later documents are ignored.

use crate::error::ParseError;
use crate::node::{Document, Entry, Node, NodeKind, ScalarTag};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

// ─── Core schema resolution ─────────────────────────────────────────────────

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").unwrap());

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .unwrap()
});

/// Handles the parser may report for the standard `!!` tag shorthand.
const CORE_TAG_HANDLES: [&str; 2] = ["tag:yaml.org,2002:", "!!"];

/// Upper bound on nodes materialized by alias expansion across one document.
pub const MAX_ALIAS_NODES: usize = 10_000;

/// Parse a YAML string into a line-annotated [`Document`].
///
/// An input without any document (empty, whitespace or comments only) is not
/// an error: it yields a document with no root.
///
/// # Errors
///
/// Returns [`ParseError`] with line and column when the input is not
/// well-formed YAML, and with a line when aliases would expand to more than
/// [`MAX_ALIAS_NODES`] nodes.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let lines = LineIndex::new(input);
    let mut builder = TreeBuilder::new(&lines, input);
    let mut parser = Parser::new_from_str(input);

    parser
        .load(&mut builder, false)
        .map_err(|e| scan_error(&lines, &e))?;

    if let Some(err) = builder.error {
        return Err(err);
    }
    Ok(Document {
        root: builder.root,
    })
}

fn scan_error(lines: &LineIndex, err: &ScanError) -> ParseError {
    let marker = err.marker();
    ParseError {
        message: err.info().to_string(),
        line: Some(lines.line_of(marker.index())),
        column: Some(marker.col() + 1),
    }
}

/// Resolve the source-level type of a scalar.
pub fn resolve_scalar_tag(value: &str, plain: bool, tag: Option<&Tag>) -> ScalarTag {
    if let Some(tag) = tag {
        if !CORE_TAG_HANDLES.contains(&tag.handle.as_str()) {
            return ScalarTag::Str;
        }
        return match tag.suffix.as_str() {
            "int" => ScalarTag::Int,
            "float" => ScalarTag::Float,
            "bool" => ScalarTag::Bool,
            "null" => ScalarTag::Null,
            _ => ScalarTag::Str,
        };
    }
    if !plain {
        return ScalarTag::Str;
    }
    match value {
        "" | "~" | "null" | "Null" | "NULL" => ScalarTag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => ScalarTag::Bool,
        _ if INT_RE.is_match(value) => ScalarTag::Int,
        _ if FLOAT_RE.is_match(value) => ScalarTag::Float,
        _ => ScalarTag::Str,
    }
}

// ─── Line index ─────────────────────────────────────────────────────────────

/// Maps the parser's character offsets to 1-based line numbers.
struct LineIndex {
    /// Character offsets of every `\n` in the source.
    breaks: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let breaks = source
            .chars()
            .enumerate()
            .filter_map(|(i, ch)| (ch == '\n').then_some(i))
            .collect();
        Self { breaks }
    }

    fn line_of(&self, char_offset: usize) -> usize {
        // A newline belongs to the line it terminates.
        match self.breaks.binary_search(&char_offset) {
            Ok(i) | Err(i) => i + 1,
        }
    }
}

// ─── Tree builder ───────────────────────────────────────────────────────────

struct TreeBuilder<'a> {
    lines: &'a LineIndex,
    /// Source characters, indexed by the parser's char offsets.
    chars: Vec<char>,
    stack: Vec<Frame>,
    /// Anchored node and its node count.
    anchors: HashMap<usize, (Node, usize)>,
    root: Option<Node>,
    /// Nodes materialized by aliases so far.
    expanded: usize,
    error: Option<ParseError>,
    /// Set once the first document is complete or an error is recorded;
    /// later events are ignored.
    done: bool,
}

enum Frame {
    Sequence {
        line: usize,
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        line: usize,
        anchor: usize,
        entries: Vec<Entry>,
        key: Option<(String, usize)>,
    },
}

impl<'a> TreeBuilder<'a> {
    fn new(lines: &'a LineIndex, source: &str) -> Self {
        Self {
            lines,
            chars: source.chars().collect(),
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            expanded: 0,
            error: None,
            done: false,
        }
    }

    /// Line of a scalar event. An empty plain value (`key:` with nothing
    /// after it) is reported by the parser at the following token, so it takes
    /// the line of its pending key instead.
    fn scalar_line(&self, value: &str, plain: bool, offset: usize) -> (usize, bool) {
        let line = self.lines.line_of(offset);
        let written = value
            .chars()
            .next()
            .is_some_and(|first| self.chars.get(offset) == Some(&first));
        if !plain || written {
            return (line, false);
        }
        match self.stack.last() {
            Some(Frame::Mapping {
                key: Some((_, key_line)),
                ..
            }) => (*key_line, true),
            _ => (line, true),
        }
    }

    fn alias(&mut self, id: usize, line: usize) -> Option<Node> {
        let Some((anchored, size)) = self.anchors.get(&id) else {
            return Some(Node::scalar("", ScalarTag::Null, line));
        };
        self.expanded += *size;
        if self.expanded > MAX_ALIAS_NODES {
            return None;
        }
        Some(Node {
            kind: anchored.kind.clone(),
            line,
        })
    }

    fn finish(&mut self, node: Node, anchor: usize) {
        if anchor != 0 {
            let size = count_nodes(&node);
            self.anchors.insert(anchor, (node.clone(), size));
        }
        match self.stack.last_mut() {
            None => {
                self.root = Some(node);
                self.done = true;
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                Some((key, key_line)) => entries.push(Entry {
                    key,
                    key_line,
                    value: node,
                }),
                None => {
                    let text = match &node.kind {
                        NodeKind::Scalar(s) => s.value.clone(),
                        _ => node.kind_name().to_string(),
                    };
                    *key = Some((text, node.line));
                }
            },
        }
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.done {
            return;
        }
        let line = self.lines.line_of(marker.index());
        match ev {
            Event::Scalar(value, style, anchor, tag) => {
                let plain = matches!(style, TScalarStyle::Plain);
                let (line, empty) = self.scalar_line(&value, plain, marker.index());
                let value = if empty { String::new() } else { value };
                let tag = resolve_scalar_tag(&value, plain, tag.as_ref());
                self.finish(Node::scalar(value, tag, line), anchor);
            }
            Event::SequenceStart(anchor, _) => self.stack.push(Frame::Sequence {
                line,
                anchor,
                items: Vec::new(),
            }),
            Event::MappingStart(anchor, _) => self.stack.push(Frame::Mapping {
                line,
                anchor,
                entries: Vec::new(),
                key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence {
                        line,
                        anchor,
                        items,
                    }) => (Node::sequence(items, line), anchor),
                    Some(Frame::Mapping {
                        line,
                        anchor,
                        entries,
                        ..
                    }) => (Node::mapping(entries, line), anchor),
                    None => return,
                };
                self.finish(node, anchor);
            }
            Event::Alias(id) => match self.alias(id, line) {
                // An alias is a copy of its anchored node, placed at the alias.
                Some(node) => self.finish(node, 0),
                None => {
                    self.error = Some(ParseError {
                        message: format!(
                            "aliases expand to more than {} nodes",
                            MAX_ALIAS_NODES
                        ),
                        line: Some(line),
                        column: None,
                    });
                    self.done = true;
                }
            },
            _ => {}
        }
    }
}

fn count_nodes(node: &Node) -> usize {
    1 + match &node.kind {
        NodeKind::Mapping(entries) => entries.iter().map(|e| count_nodes(&e.value)).sum(),
        NodeKind::Sequence(items) => items.iter().map(count_nodes).sum(),
        NodeKind::Scalar(_) => 0,
    }
}
