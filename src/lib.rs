//! Schema validation for Pod deployment manifests with line-accurate
//! diagnostics.
//!
//! Validation never stops at the first problem: every violation in the
//! document is collected, in schema traversal order, and reported at once.
//!
//! ```text
//! parse(yaml) → Document → validate(ctx, doc) → ValidationContext → flush
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! apiVersion: v2
//! kind: Pod
//! metadata:
//!   name: web
//! spec:
//!   containers:
//!     - name: web
//!       image: registry.bigbrother.io/web:1.0
//!       resources:
//!         requests:
//!           cpu: 1
//! "#;
//!
//! let ctx = podcheck::check(yaml, "pod.yaml").expect("well-formed YAML");
//! let lines: Vec<String> = ctx.diagnostics().iter().map(|d| ctx.render(d)).collect();
//! assert_eq!(lines, ["pod.yaml:2 apiVersion has unsupported value 'v2'"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod parse;
pub mod predicates;
pub mod report;
pub mod validate;
pub mod view;

pub use error::*;
pub use node::*;
pub use report::{Diagnostic, OutputFormat, ValidationContext};

pub use parse::parse;
pub use validate::validate;

/// Parse `input` and validate it in a context named `filename`.
///
/// # Errors
///
/// Returns [`ParseError`] when `input` is not well-formed YAML; schema
/// violations are never errors, they are the context's diagnostics.
pub fn check(input: &str, filename: &str) -> Result<ValidationContext, ParseError> {
    let doc = parse::parse(input)?;
    Ok(validate::validate_document(&doc, filename))
}
