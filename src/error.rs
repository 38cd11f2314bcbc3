//! Unified error type for the dependency analyzer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the CLI entry point. Recoverable per-file failures
/// (`IoError`, `ParseWarning`, `InternalError` from spec §7) are logged as
/// diagnostics through `tracing` rather than constructed as this type —
/// only `UsageError` and `PathError` ever reach `main`.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Bad or missing CLI arguments.
    #[error("{0}")]
    UsageError(String),

    /// The root directory does not exist or isn't a directory.
    #[error("root directory does not exist: {0}")]
    PathError(PathBuf),

    /// A source file could not be opened for reading.
    #[error("cannot open {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A recoverable diagnostic emitted during parsing or analysis. These are
/// never returned as `Err` — they're collected and logged on the `debug`
/// sink (spec §7: "logged, processing of the current file stops, other
/// files proceed").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Rule engine saw a malformed or unrecognized construct.
    ParseWarning { file: String, line: u32, message: String },
    /// An invariant was broken (e.g. unmatched `}`); the stack was reset
    /// to root and parsing of the current file stopped.
    InternalError { file: String, line: u32, message: String },
    /// A file could not be opened; it is skipped and maps to an empty
    /// dependency set.
    IoSkipped { file: String, message: String },
    /// A file required lossy UTF-8 conversion to read.
    LossyRead { file: String },
}

impl Diagnostic {
    pub fn file(&self) -> &str {
        match self {
            Diagnostic::ParseWarning { file, .. }
            | Diagnostic::InternalError { file, .. }
            | Diagnostic::IoSkipped { file, .. }
            | Diagnostic::LossyRead { file } => file,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::ParseWarning { file, line, message } => {
                write!(f, "parse warning: {file}:{line}: {message}")
            }
            Diagnostic::InternalError { file, line, message } => {
                write!(f, "internal error: {file}:{line}: {message}")
            }
            Diagnostic::IoSkipped { file, message } => {
                write!(f, "skipped {file}: {message}")
            }
            Diagnostic::LossyRead { file } => {
                write!(f, "{file}: non-UTF8 bytes, read with lossy conversion")
            }
        }
    }
}
