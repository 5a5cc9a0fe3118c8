//! Error types for report rendering.

use std::path::PathBuf;

/// Errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The requested format is not in the registry.
    #[error("unknown format '{format}' (expected one of: {})", .known.join(", "))]
    UnknownFormat {
        /// The format that was requested.
        format: String,
        /// The registered format names.
        known: Vec<String>,
    },

    /// Writing the report failed.
    #[error("failed to write report to {path}: {source}")]
    Io {
        /// The output path, or `-` for stdout.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The graph could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// The HTML template failed to render.
    #[error("template error: {reason}")]
    Template {
        /// Description of the template failure.
        reason: String,
    },
}
