//! Pod manifest validation.
//!
//! One routine per schema node, walked depth-first in field-declaration
//! order. Every violation is recorded in the [`ValidationContext`]; a routine
//! only stops early when the node it was handed cannot be traversed (wrong
//! kind, or a missing field everything below depends on). Sibling subtrees are
//! always visited.

use crate::node::{Document, Node, NodeKind};
use crate::predicates::*;
use crate::report::ValidationContext;
use crate::view::{MappingView, as_mapping, as_scalar_str, as_sequence, as_tagged_int};
use std::ops::ControlFlow;

/// Validate a parsed document, recording every violation into `ctx`.
pub fn validate(ctx: &mut ValidationContext, doc: &Document) {
    tracing::debug!(file = ctx.filename(), "validating document");
    match &doc.root {
        Some(root) => validate_top(ctx, root),
        None => ctx.required("document"),
    }
}

/// Validate `doc` in a fresh context named `filename`.
pub fn validate_document(doc: &Document, filename: &str) -> ValidationContext {
    let mut ctx = ValidationContext::new(filename);
    validate(&mut ctx, doc);
    ctx
}

// ─── Shared field checks ────────────────────────────────────────────────────

/// A required scalar-string field. Returns the node and its text when both
/// checks pass.
fn required_string<'a>(
    ctx: &mut ValidationContext,
    view: &MappingView<'a>,
    key: &str,
    label: &str,
) -> Option<(&'a Node, &'a str)> {
    let Some(node) = view.get(key) else {
        ctx.required(label);
        return None;
    };
    string_value(ctx, node, label).map(|s| (node, s))
}

/// An optional scalar-string field.
fn optional_string<'a>(
    ctx: &mut ValidationContext,
    view: &MappingView<'a>,
    key: &str,
    label: &str,
) -> Option<(&'a Node, &'a str)> {
    let node = view.get(key)?;
    string_value(ctx, node, label).map(|s| (node, s))
}

fn string_value<'a>(ctx: &mut ValidationContext, node: &'a Node, label: &str) -> Option<&'a str> {
    let value = as_scalar_str(node);
    if value.is_none() {
        ctx.at(node, format!("{} must be string", label));
    }
    value
}

/// Check a port number. Breaks when the node is not a scalar at all.
fn check_port(ctx: &mut ValidationContext, node: &Node, label: &str) -> ControlFlow<()> {
    let Some(text) = as_scalar_str(node) else {
        ctx.at(node, format!("{} must be int", label));
        return ControlFlow::Break(());
    };
    match parse_int(text) {
        None => ctx.at(node, format!("{} must be int", label)),
        Some(port) if !port_in_range(port) => {
            ctx.at(node, format!("{} value out of range", label))
        }
        Some(_) => {}
    }
    ControlFlow::Continue(())
}

fn unsupported(ctx: &mut ValidationContext, node: &Node, label: &str, value: &str) {
    ctx.at(node, format!("{} has unsupported value '{}'", label, value));
}

fn invalid_format(ctx: &mut ValidationContext, node: &Node, label: &str, value: &str) {
    ctx.at(node, format!("{} has invalid format '{}'", label, value));
}

// ─── Document ───────────────────────────────────────────────────────────────

fn validate_top(ctx: &mut ValidationContext, root: &Node) {
    let Some(view) = as_mapping(root) else {
        ctx.at(root, "document must be mapping");
        return;
    };

    if let Some((node, value)) = required_string(ctx, &view, "apiVersion", "apiVersion")
        && value != SUPPORTED_API_VERSION
    {
        unsupported(ctx, node, "apiVersion", value);
    }

    if let Some((node, value)) = required_string(ctx, &view, "kind", "kind")
        && value != SUPPORTED_KIND
    {
        unsupported(ctx, node, "kind", value);
    }

    match view.get("metadata") {
        Some(meta) => validate_object_meta(ctx, meta),
        None => ctx.required("metadata"),
    }

    match view.get("spec") {
        Some(spec) => validate_pod_spec(ctx, spec),
        None => ctx.required("spec"),
    }
}

// ─── ObjectMeta ─────────────────────────────────────────────────────────────

fn validate_object_meta(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "metadata must be object");
        return;
    };

    // Any string is a valid name.
    required_string(ctx, &view, "name", "metadata.name");
    optional_string(ctx, &view, "namespace", "metadata.namespace");

    if let Some(labels) = view.get("labels") {
        match as_mapping(labels) {
            Some(labels) => {
                for (key, value) in labels.iter() {
                    if as_scalar_str(value).is_none() {
                        ctx.at(value, format!("metadata.labels.{} must be string", key));
                    }
                }
            }
            None => ctx.at(labels, "metadata.labels must be object"),
        }
    }
}

// ─── PodSpec ────────────────────────────────────────────────────────────────

/// The two accepted shapes of `spec.os`.
enum OsForm<'a> {
    Name(&'a str),
    Object(MappingView<'a>),
    Invalid,
}

impl<'a> OsForm<'a> {
    fn of(node: &'a Node) -> Self {
        match &node.kind {
            NodeKind::Scalar(s) => OsForm::Name(&s.value),
            NodeKind::Mapping(_) => as_mapping(node).map_or(OsForm::Invalid, OsForm::Object),
            NodeKind::Sequence(_) => OsForm::Invalid,
        }
    }
}

fn validate_pod_spec(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "spec must be object");
        return;
    };

    if let Some(os) = view.get("os") {
        match OsForm::of(os) {
            OsForm::Name(name) => {
                if !is_supported_os(name) {
                    unsupported(ctx, os, "os", name);
                }
            }
            OsForm::Object(os_view) => {
                if let Some((name_node, name)) = required_string(ctx, &os_view, "name", "name")
                    && !is_supported_os(name)
                {
                    unsupported(ctx, name_node, "name", name);
                }
            }
            OsForm::Invalid => ctx.at(os, "os must be string or object"),
        }
    }

    let Some(containers) = view.get("containers") else {
        ctx.required("spec.containers");
        return;
    };
    let Some(items) = as_sequence(containers) else {
        ctx.at(containers, "spec.containers must be array");
        return;
    };
    if items.is_empty() {
        ctx.at(containers, "spec.containers must not be empty");
    }
    for item in items {
        validate_container(ctx, item);
    }
}

// ─── Container ──────────────────────────────────────────────────────────────

fn validate_container(ctx: &mut ValidationContext, node: &Node) {
    tracing::debug!(line = node.line, "validating container");
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "containers[] must be object");
        return;
    };

    if let Some((name_node, name)) = required_string(ctx, &view, "name", "containers.name")
        && !is_snake_case(name)
    {
        invalid_format(ctx, name_node, "containers.name", name);
    }

    if let Some((image_node, image)) = required_string(ctx, &view, "image", "containers.image")
        && !is_registry_image(image)
    {
        invalid_format(ctx, image_node, "containers.image", image);
    }

    if let Some(ports) = view.get("ports") {
        match as_sequence(ports) {
            Some(items) => {
                for item in items {
                    validate_container_port(ctx, item);
                }
            }
            None => ctx.at(ports, "ports must be array"),
        }
    }

    if let Some(probe) = view.get("readinessProbe") {
        validate_probe(ctx, probe);
    }
    if let Some(probe) = view.get("livenessProbe") {
        validate_probe(ctx, probe);
    }

    match view.get("resources") {
        Some(resources) => validate_resources(ctx, resources),
        None => ctx.required("containers.resources"),
    }
}

fn validate_container_port(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "ports must be object");
        return;
    };

    let Some(port) = view.get("containerPort") else {
        ctx.required("containerPort");
        return;
    };
    if check_port(ctx, port, "containerPort").is_break() {
        return;
    }

    if let Some((proto_node, proto)) = optional_string(ctx, &view, "protocol", "protocol")
        && !is_supported_protocol(proto)
    {
        unsupported(ctx, proto_node, "protocol", proto);
    }
}

// ─── Probe ──────────────────────────────────────────────────────────────────

fn validate_probe(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "probe must be object");
        return;
    };
    match view.get("httpGet") {
        Some(http_get) => validate_http_get(ctx, http_get),
        None => ctx.required("httpGet"),
    }
}

fn validate_http_get(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "httpGet must be object");
        return;
    };

    if let Some((path_node, path)) = required_string(ctx, &view, "path", "path")
        && !is_absolute_path(path)
    {
        invalid_format(ctx, path_node, "path", path);
    }

    let Some(port) = view.get("port") else {
        ctx.required("port");
        return;
    };
    if check_port(ctx, port, "port").is_break() {
        return;
    }
}

// ─── ResourceRequirements ───────────────────────────────────────────────────

fn validate_resources(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "resources must be object");
        return;
    };
    if let Some(requests) = view.get("requests") {
        validate_resource_set(ctx, requests);
    }
    if let Some(limits) = view.get("limits") {
        validate_resource_set(ctx, limits);
    }
}

fn validate_resource_set(ctx: &mut ValidationContext, node: &Node) {
    let Some(view) = as_mapping(node) else {
        ctx.at(node, "resources set must be object");
        return;
    };
    for (key, value) in view.iter() {
        match key {
            "cpu" => {
                // Must be written as an integer; a quoted numeral is a string.
                if as_tagged_int(value).and_then(parse_int).is_none() {
                    ctx.at(value, "cpu must be int");
                }
            }
            "memory" => {
                if let Some(quantity) = string_value(ctx, value, "memory")
                    && !is_memory_quantity(quantity)
                {
                    invalid_format(ctx, value, "memory", quantity);
                }
            }
            // Other resource names are accepted as-is.
            _ => {}
        }
    }
}
