//! @ai:module:intent Error and warning types for the report pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Error, Warning, Diagnostics
//! @ai:module:stateless false

use crate::sources::ToolKind;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Fatal errors raised outside the pipeline core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid username {0:?}: must be non-empty and contain no path separators")]
    InvalidTarget(String),
}

/// @ai:intent Recoverable conditions recorded while building a report
#[derive(Error, Debug)]
pub enum Warning {
    #[error("Failed to read {tool} output {path}: {source}")]
    Read {
        tool: ToolKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {tool} output {path}: {source}")]
    MalformedSource {
        tool: ToolKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed {tool} output {path}: expected a JSON object")]
    NotAnObject { tool: ToolKind, path: PathBuf },

    #[error("Skipped malformed line {line} in {path}: {source}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Skipped malformed {tool} record {record}: {message}")]
    MalformedRecord {
        tool: ToolKind,
        record: String,
        message: String,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
}

/// @ai:intent Per-run accumulator of recoverable warnings
/// @ai:effects log
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Log a warning and keep it for the caller
    /// @ai:effects log
    pub fn record(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
