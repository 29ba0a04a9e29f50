//! On-disk types for extracted log tables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Magic bytes at start of a tables file.
pub const TABLES_MAGIC: [u8; 4] = *b"KTAB";

/// Current tables file format version.
pub const TABLES_VERSION: u16 = 1;

/// Size of the tables file header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Largest record payload accepted on read.
pub const MAX_RECORD_BYTES: usize = 64 * 1024 * 1024;

/// Tables file header (64 bytes fixed size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesHeader {
    /// Magic bytes: "KTAB"
    pub magic: [u8; 4],
    /// File format version
    pub version: u16,
    /// Feature flags (none defined)
    pub flags: u16,
    /// Earliest record timestamp
    pub first_timestamp: f64,
    /// Latest record timestamp
    pub last_timestamp: f64,
    /// Total number of records in the file
    pub record_count: u64,
    /// Reserved for future use
    pub reserved: [u8; 16],
}

impl TablesHeader {
    /// Create a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: TABLES_MAGIC,
            version: TABLES_VERSION,
            flags: 0,
            first_timestamp: 0.0,
            last_timestamp: 0.0,
            record_count: 0,
            reserved: [0; 16],
        }
    }

    /// Check if magic bytes are valid.
    pub fn is_valid(&self) -> bool {
        self.magic == TABLES_MAGIC
    }
}

impl Default for TablesHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// One extracted sample: `namespace/topic` at `timestamp` carrying a flat
/// numeric array.
///
/// Timestamps are stored in the unit of the source topic (nanoseconds for
/// `mission_control`, seconds for `sim`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// First path component, e.g. `sim`
    pub namespace: String,
    /// Topic or field name within the namespace
    pub topic: String,
    /// Timestamp in the topic's native unit
    pub timestamp: f64,
    /// Flat numeric payload
    pub values: Vec<f64>,
}

impl TableRecord {
    /// Create a record.
    pub fn new(
        namespace: impl Into<String>,
        topic: impl Into<String>,
        timestamp: f64,
        values: Vec<f64>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            topic: topic.into(),
            timestamp,
            values,
        }
    }
}

/// Summary returned after writing a tables file.
#[derive(Debug, Clone)]
pub struct TablesInfo {
    /// Path to the tables file
    pub path: PathBuf,
    /// Total number of records
    pub record_count: u64,
    /// Number of distinct `namespace/topic` pairs
    pub topic_count: usize,
    /// File size in bytes
    pub file_size_bytes: u64,
}

impl TablesInfo {
    /// File size in megabytes.
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / 1_048_576.0
    }
}
