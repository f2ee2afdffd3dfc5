//! Fatal errors of a monitoring run.
//!
//! Every variant aborts the run with exit status 1. Irregular records
//! (wrong field count, unmatched END, repeated START) never become errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("File '{}' not found.", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Error reading log file '{}'", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing log file: line {line}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Error parsing log file: invalid timestamp '{value}' on line {line}: {reason}")]
    MalformedTimestamp {
        line: u64,
        value: String,
        reason: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to write report to '{}'", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MonitorError {
    /// Maps an open/read failure on the log source to the matching variant.
    pub fn from_source_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            MonitorError::SourceNotFound { path }
        } else {
            MonitorError::SourceRead { path, source: err }
        }
    }

    /// Splits CSV reader failures into source I/O errors and content errors.
    pub fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = err.kind() {
            let io = std::io::Error::new(io.kind(), io.to_string());
            return Self::from_source_io(path, io);
        }
        MonitorError::Csv {
            line: err.position().map_or(0, |pos| pos.line()),
            source: err,
        }
    }
}
