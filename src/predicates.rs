//! Format and value predicates used by the schema rules.

use regex::Regex;
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static SNAKE_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap());

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^registry\.bigbrother\.io/[a-z0-9._/-]+:[A-Za-z0-9._-]+$").unwrap()
});

static MEMORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+(Gi|Mi|Ki)$").unwrap());

static DECIMAL_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

pub const SUPPORTED_API_VERSION: &str = "v1";
pub const SUPPORTED_KIND: &str = "Pod";
pub const SUPPORTED_OS: [&str; 2] = ["linux", "windows"];
pub const SUPPORTED_PROTOCOLS: [&str; 2] = ["TCP", "UDP"];

/// Lowercase alphanumeric segments joined by single underscores.
pub fn is_snake_case(s: &str) -> bool {
    SNAKE_CASE_RE.is_match(s)
}

/// `registry.bigbrother.io/<path>:<tag>`.
pub fn is_registry_image(s: &str) -> bool {
    IMAGE_RE.is_match(s)
}

/// A memory quantity such as `128Mi`, `1Gi` or `512Ki`.
pub fn is_memory_quantity(s: &str) -> bool {
    MEMORY_RE.is_match(s)
}

pub fn is_absolute_path(s: &str) -> bool {
    s.starts_with('/')
}

/// Case-insensitive match against [`SUPPORTED_OS`].
pub fn is_supported_os(s: &str) -> bool {
    let lower = s.to_lowercase();
    SUPPORTED_OS.contains(&lower.as_str())
}

pub fn is_supported_protocol(s: &str) -> bool {
    SUPPORTED_PROTOCOLS.contains(&s)
}

/// Parse optionally signed decimal digits. Anything else, including hex and
/// octal forms or values overflowing `i64`, is `None`.
pub fn parse_int(s: &str) -> Option<i64> {
    if !DECIMAL_INT_RE.is_match(s) {
        return None;
    }
    s.parse().ok()
}

/// Ports are valid in `1..=65535`.
pub fn port_in_range(port: i64) -> bool {
    port > 0 && port < 65536
}
