//! Error taxonomy for snapshot comparison
//!
//! Structural failures (bad identity, unreadable snapshots, unresolved explicit
//! baselines) are fatal. A first run with no history is reported through the
//! same type but maps to a successful exit. Missing metrics never reach this
//! type: extraction returns `None` and the comparator skips the pair.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit code for a clean run or a first run without history
pub const EXIT_OK: i32 = 0;
/// Process exit code when a degradation exceeds the hard fail threshold
pub const EXIT_REGRESSION: i32 = 1;
/// Process exit code for invalid caller input
pub const EXIT_CONFIG: i32 = 2;
/// Process exit code for unreadable snapshots or a failed report write
pub const EXIT_IO: i32 = 3;

/// Errors that can occur while locating, comparing or reporting snapshots
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No comparison history for {identity}")]
    NoHistory { identity: String },

    #[error("Baseline snapshot '{name}' not found for {identity}")]
    MissingBaseline { name: String, identity: String },

    #[error("Failed to read snapshot {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;

impl CompareError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the run should still terminate successfully
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoHistory { .. })
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoHistory { .. } => EXIT_OK,
            Self::Configuration(_) | Self::MissingBaseline { .. } => EXIT_CONFIG,
            Self::FileRead { .. }
            | Self::Parse { .. }
            | Self::Serialize(_)
            | Self::ReportWrite { .. } => EXIT_IO,
        }
    }
}
