//! Extracted log tables: the hand-off format between message extraction and
//! the analysis pipeline.
//!
//! # File Format
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Header (64 bytes)                                │
//! │ - Magic: "KTAB" (4 bytes)                        │
//! │ - Version: u16                                   │
//! │ - Flags: u16                                     │
//! │ - First / last timestamp: f64                    │
//! │ - Record count: u64                              │
//! ├──────────────────────────────────────────────────┤
//! │ Record Stream                                    │
//! │ [len:u32][postcard TableRecord]...               │
//! └──────────────────────────────────────────────────┘
//! ```

mod log_tables;
mod player;
mod recorder;
mod types;

use thiserror::Error;

pub use log_tables::LogTables;
pub use player::TablesPlayer;
pub use recorder::TablesRecorder;
pub use types::{HEADER_SIZE, TABLES_MAGIC, TABLES_VERSION, TableRecord, TablesHeader, TablesInfo};

/// Tables file read/write error
#[derive(Debug, Error)]
pub enum TablesError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Invalid tables file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<postcard::Error> for TablesError {
    fn from(e: postcard::Error) -> Self {
        TablesError::Serialize(e.to_string())
    }
}

/// Result type for tables file I/O
pub type Result<T> = std::result::Result<T, TablesError>;
