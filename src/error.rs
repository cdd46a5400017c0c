//! Error types for the edges of the crate.
//!
//! Building a snapshot never fails; these errors come from reading inputs
//! (graph documents) off disk. Configuration errors live in
//! [`crate::config::ConfigError`].

use std::path::PathBuf;

use thiserror::Error;

/// A graph document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read graph document {}: {source}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid graph.
    #[error("invalid graph document{}: line {line}, column {column}: {message}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        /// Path of the document, when it came from a file.
        path: Option<PathBuf>,
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// What was wrong.
        message: String,
    },
}

impl LoadError {
    pub(crate) fn from_json(err: &serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to Display; keep only the cause.
        let full = err.to_string();
        let message = full
            .rsplit_once(" at line ")
            .map_or(full.as_str(), |(cause, _)| cause)
            .to_owned();
        Self::Parse {
            path: None,
            line: err.line(),
            column: err.column(),
            message,
        }
    }

    pub(crate) fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::Parse {
                line,
                column,
                message,
                ..
            } => Self::Parse {
                path: Some(path),
                line,
                column,
                message,
            },
            read @ Self::Read { .. } => read,
        }
    }
}
