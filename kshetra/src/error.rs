//! Error types for Kshetra.
//!
//! Every failure inside a single bag's processing surfaces as a
//! [`KshetraError`]. The batch driver logs it and moves on to the next bag.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::io::tables::TablesError;

/// Result type alias
pub type Result<T> = std::result::Result<T, KshetraError>;

/// Kshetra error type
#[derive(Debug, Error)]
pub enum KshetraError {
    /// A required configuration or environment file does not exist.
    #[error("Missing resource: {}", .0.display())]
    MissingResource(PathBuf),

    /// The coverage oracle could not be built from existing inputs.
    #[error("Oracle construction failed: {0}")]
    OracleConstruction(String),

    /// No usable start/stop trigger edge in the mission-control stream.
    #[error("Degenerate experiment window: {0}")]
    DegenerateWindow(String),

    /// A stream required by the pipeline has no samples.
    #[error("Empty stream: {0}")]
    EmptyStream(String),

    /// A namespace/topic pair is absent from the extracted tables.
    #[error("Missing topic: {namespace}/{topic}")]
    MissingTopic {
        /// Namespace (first path component)
        namespace: String,
        /// Topic or field name
        topic: String,
    },

    /// A record has the wrong shape for its topic.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The initial objective value cannot normalize the cost sequence.
    #[error("Degenerate initial cost: {0}")]
    DegenerateCost(f64),

    /// Configuration values that cannot be used together.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// Extracted tables file could not be read or written.
    #[error(transparent)]
    Tables(#[from] TablesError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<postcard::Error> for KshetraError {
    fn from(e: postcard::Error) -> Self {
        KshetraError::Serialize(e.to_string())
    }
}

impl KshetraError {
    /// Shorthand for [`KshetraError::EmptyStream`].
    pub(crate) fn empty(stream: impl Into<String>) -> Self {
        KshetraError::EmptyStream(stream.into())
    }

    /// Shorthand for [`KshetraError::MalformedRecord`].
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        KshetraError::MalformedRecord(msg.into())
    }
}
