//! Diagnostic accumulation and rendering.
//!
//! A [`ValidationContext`] lives for exactly one validation run. Diagnostics
//! are kept in the order they were recorded, which is the depth-first order
//! of the schema walk, and are flushed in that order.

use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One rule violation. `line` is absent for missing required fields, since
/// there is no node to point at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

/// How diagnostics are written on flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `<file>:<line> <message>`, or the bare message when there is no line.
    #[default]
    Text,
    /// A JSON array of `{ "file", "line", "message" }` objects.
    Json,
}

/// Per-run validation state: the display name of the subject and every
/// diagnostic recorded so far.
#[derive(Clone, Debug)]
pub struct ValidationContext {
    filename: String,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    message: &'a str,
}

impl ValidationContext {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn record(&mut self, line: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(?line, %message, "diagnostic");
        self.diagnostics.push(Diagnostic { line, message });
    }

    /// Record a violation positioned at `node`.
    pub fn at(&mut self, node: &Node, message: impl Into<String>) {
        self.record(Some(node.line), message);
    }

    /// Record `"<field> is required"`, without a position.
    pub fn required(&mut self, field: &str) {
        self.record(None, format!("{} is required", field));
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Render one diagnostic in the text format.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        match diagnostic.line {
            Some(line) => format!("{}:{} {}", self.filename, line, diagnostic.message),
            None => diagnostic.message.clone(),
        }
    }

    /// Write every diagnostic to `sink` in recording order.
    pub fn flush<W: Write>(&self, sink: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                for diagnostic in &self.diagnostics {
                    writeln!(sink, "{}", self.render(diagnostic))?;
                }
            }
            OutputFormat::Json => {
                let items: Vec<JsonDiagnostic<'_>> = self
                    .diagnostics
                    .iter()
                    .map(|d| JsonDiagnostic {
                        file: &self.filename,
                        line: d.line,
                        message: &d.message,
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *sink, &items)?;
                writeln!(sink)?;
            }
        }
        sink.flush()
    }
}
