//! Per-recording processing and the batch driver.
//!
//! ```text
//! LogTables ──► extract ──► BagProcessor::process ──► ProcessedBag
//!                                                          │
//!                          BagProcessor::process_and_save ─┴─► .processed,
//!                                                              start-pose file,
//!                                                              cost CSV
//! ```

mod bag;
mod batch;
pub mod extract;
mod processor;

pub use bag::ProcessedBag;
pub use batch::{BagSelection, BatchReport, list_bags, run_batch, tables_path};
pub use processor::{BagProcessor, OracleResources};
