//! Command-line driver: read → parse → validate → flush → exit status.

use crate::config::Config;
use crate::error::CheckError;
use crate::parse::parse;
use crate::report::{OutputFormat, ValidationContext};
use crate::validate::validate_document;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no log directive is configured.
pub const LOG_ENV: &str = "PODCHECK_LOG";

/// Validate a Pod manifest and report every schema violation with its line.
#[derive(Parser, Debug)]
#[command(name = "podcheck", version, about)]
pub struct Cli {
    /// Path to the manifest.
    pub path: PathBuf,

    /// Configuration file (YAML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Diagnostic output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log filter directive, e.g. `debug` or `podcheck=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Effective settings after merging flags over the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub log: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            format: cli.format.or(config.format).unwrap_or_default(),
            log: cli.log.clone().or(config.log),
        }
    }
}

/// Result of one run, mapped onto the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No diagnostics.
    Clean,
    /// At least one schema violation.
    Violations,
    /// The manifest could not be read or parsed, or output failed.
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::Violations | Outcome::Failed => 1,
        }
    }
}

/// Build the log filter: the configured directive, else [`LOG_ENV`], else
/// `warn`. An unparsable directive is reported on `err` and skipped.
pub fn log_filter<E: Write>(directive: Option<&str>, err: &mut E) -> EnvFilter {
    directive
        .and_then(|d| match EnvFilter::try_new(d) {
            Ok(filter) => Some(filter),
            Err(e) => {
                let _ = writeln!(err, "warning: ignoring log filter '{}': {}", d, e);
                None
            }
        })
        .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Name shown in diagnostics: the final path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, parse and validate the manifest at `path`.
pub fn check_file(path: &Path) -> Result<ValidationContext, CheckError> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse(&content).map_err(|source| CheckError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(validate_document(&doc, &display_name(path)))
}

/// Check `path`, writing diagnostics to `out` and fatal errors to `err`.
pub fn run<O: Write, E: Write>(
    path: &Path,
    settings: &Settings,
    out: &mut O,
    err: &mut E,
) -> Outcome {
    tracing::info!(path = %path.display(), "checking manifest");
    let ctx = match check_file(path) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::debug!(error = ?e, "check aborted");
            let _ = writeln!(err, "{}", e);
            return Outcome::Failed;
        }
    };

    if let Err(e) = ctx.flush(out, settings.format) {
        let _ = writeln!(err, "cannot write diagnostics: {}", e);
        return Outcome::Failed;
    }

    let count = ctx.diagnostics().len();
    tracing::info!(diagnostics = count, "check finished");
    if count == 0 {
        Outcome::Clean
    } else {
        Outcome::Violations
    }
}
