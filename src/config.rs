//! Tool configuration file.
//!
//! ```yaml
//! format: json      # text | json
//! log: debug        # tracing filter directive
//! ```
//!
//! Every field is optional; command-line flags take precedence.

use crate::report::OutputFormat;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub log: Option<String>,
}

impl Config {
    /// Read and deserialize a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("{}: cannot read config", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("{}: invalid config", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_saphyr::from_str(content)?)
    }
}
