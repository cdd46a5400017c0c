//! depsnap configuration (`depsnap.toml`).
//!
//! Defines defaults for the `depsnap` binary: which configuration label to
//! build, which search paths the caller last saw, and how to print output and
//! logs. Command-line flags override anything set here.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "depsnap.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level depsnap configuration.
///
/// Missing fields use defaults. Missing file → all defaults (no error).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepsnapConfig {
    /// Snapshot build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Output formatting.
    #[serde(default)]
    pub output: OutputConfig,

    /// Log formatting.
    #[serde(default)]
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// BuildConfig
// ---------------------------------------------------------------------------

/// Snapshot build settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Configuration label to build (default: `"Debug"`).
    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// Search paths the caller last saw. Compared against the graph's own
    /// search paths to detect dependencies whose kind changed.
    #[serde(default)]
    pub search_paths: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            configuration: default_configuration(),
            search_paths: Vec::new(),
        }
    }
}

fn default_configuration() -> String {
    "Debug".to_owned()
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Snapshot output settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print snapshot JSON (default: `true`).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

const fn default_pretty() -> bool {
    true
}

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

/// Log output settings. Verbosity comes from `DEPSNAP_LOG` / `RUST_LOG`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Event format on stderr.
    #[serde(default)]
    pub format: LogFormat,
}

/// How log events are written to stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Single-line human-readable events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a depsnap configuration file.
#[derive(Debug, Error)]
#[error("{}: {message}", path.as_ref().map_or_else(|| "config error".to_owned(), |p| p.display().to_string()))]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl DepsnapConfig {
    /// Load configuration from a TOML file.
    ///
    /// - File not found → returns [`DepsnapConfig::default()`].
    /// - File exists but is invalid → returns a [`ConfigError`] with
    ///   line-level detail.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
