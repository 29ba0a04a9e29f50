//! File formats at the pipeline's edges.
//!
//! - [`tables`]: extracted log tables (input)
//! - [`processed`]: persisted [`ProcessedBag`](crate::pipeline::ProcessedBag) (output)
//! - [`pose_file`]: start-pose side-file
//! - [`export`]: cost CSV

pub mod export;
pub mod pose_file;
pub mod processed;
pub mod tables;

pub use export::{cost_csv_path, write_cost_csv};
pub use pose_file::{pose_file_path, write_pose_file};
pub use processed::{load_processed, processed_path, save_processed, write_processed};
pub use tables::{LogTables, TableRecord, TablesError, TablesPlayer, TablesRecorder};
