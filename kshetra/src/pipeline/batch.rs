//! Batch driver over a directory of recordings.
//!
//! Each recording lives in its own directory holding `<bag>.tables`:
//!
//! ```text
//! bags/
//! ├── run_01/run_01.tables
//! └── run_02/run_02.tables
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::processor::BagProcessor;
use crate::cost::OracleFactory;
use crate::error::{KshetraError, Result};
use crate::io::tables::LogTables;

/// Which recordings of a directory to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BagSelection {
    /// Every recording directory
    All,
    /// Recordings whose name contains the substring
    Matching(String),
    /// Exactly one recording
    Single(String),
}

impl BagSelection {
    fn accepts(&self, name: &str) -> bool {
        match self {
            BagSelection::All => true,
            BagSelection::Matching(s) => name.contains(s.as_str()),
            BagSelection::Single(s) => name == s,
        }
    }
}

/// `<dir>/<bag>/<bag>.tables`
pub fn tables_path(dir: &Path, bag_name: &str) -> PathBuf {
    dir.join(bag_name).join(format!("{}.tables", bag_name))
}

/// Names of selected recordings under `dir`, sorted.
///
/// Directories without a tables file are skipped. A `Single` selection whose
/// tables file is absent is a [`KshetraError::MissingResource`].
pub fn list_bags(dir: &Path, selection: &BagSelection) -> Result<Vec<String>> {
    if let BagSelection::Single(name) = selection {
        let path = tables_path(dir, name);
        return if path.is_file() {
            Ok(vec![name.clone()])
        } else {
            Err(KshetraError::MissingResource(path))
        };
    }

    let mut bags = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Some(name) = recording_name(entry) else {
            continue;
        };
        if !selection.accepts(&name) {
            continue;
        }
        if tables_path(dir, &name).is_file() {
            bags.push(name);
        } else {
            log::debug!("Skipping {}: no {}.tables", name, name);
        }
    }
    bags.sort();
    Ok(bags)
}

/// Directory name of a scanned entry, or `None` with a warning for entries
/// that cannot be read or named.
fn recording_name(entry: std::io::Result<fs::DirEntry>) -> Option<String> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            log::warn!("Skipping unreadable directory entry: {}", e);
            return None;
        }
    };
    let path = entry.path();
    if !path.is_dir() {
        return None;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => Some(name.to_string()),
        None => {
            log::warn!("Skipping {}: name is not valid UTF-8", path.display());
            None
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(bag, processed file)` for every success
    pub processed: Vec<(String, PathBuf)>,
    /// `(bag, error message)` for every failure
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    /// Bags attempted.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    /// True when no bag failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process every selected recording, logging and continuing past failures.
pub fn run_batch<F: OracleFactory>(
    processor: &BagProcessor<F>,
    dir: &Path,
    selection: &BagSelection,
    save_dir: &Path,
) -> Result<BatchReport> {
    let bags = list_bags(dir, selection)?;
    log::info!("Processing {} bags from {}", bags.len(), dir.display());

    let mut report = BatchReport::default();
    for name in bags {
        let outcome = LogTables::load(tables_path(dir, &name))
            .and_then(|tables| processor.process_and_save(&name, &tables, save_dir));
        match outcome {
            Ok(path) => report.processed.push((name, path)),
            Err(e) => {
                log::error!("[{}] Failed: {}", name, e);
                report.failed.push((name, e.to_string()));
            }
        }
    }

    log::info!(
        "Batch complete: {} processed, {} failed",
        report.processed.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_bag(root: &Path, name: &str) {
        fs::create_dir_all(root.join(name)).unwrap();
        fs::write(tables_path(root, name), b"").unwrap();
    }

    #[test]
    fn test_selection() {
        let dir = TempDir::new().unwrap();
        make_bag(dir.path(), "lab_run_2");
        make_bag(dir.path(), "field_run_1");
        make_bag(dir.path(), "lab_run_1");
        fs::create_dir_all(dir.path().join("no_tables")).unwrap();
        fs::write(dir.path().join("stray.txt"), b"x").unwrap();

        assert_eq!(
            list_bags(dir.path(), &BagSelection::All).unwrap(),
            vec!["field_run_1", "lab_run_1", "lab_run_2"]
        );
        assert_eq!(
            list_bags(dir.path(), &BagSelection::Matching("lab".into())).unwrap(),
            vec!["lab_run_1", "lab_run_2"]
        );
        assert_eq!(
            list_bags(dir.path(), &BagSelection::Single("field_run_1".into())).unwrap(),
            vec!["field_run_1"]
        );
    }

    #[test]
    fn test_single_missing() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            list_bags(dir.path(), &BagSelection::Single("ghost".into())),
            Err(KshetraError::MissingResource(_))
        ));
    }

    #[test]
    fn test_recording_name() {
        let dir = TempDir::new().unwrap();
        make_bag(dir.path(), "run_1");
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let mut names: Vec<Option<String>> =
            fs::read_dir(dir.path()).unwrap().map(recording_name).collect();
        names.sort();
        assert_eq!(names, vec![None, Some("run_1".to_string())]);

        let unreadable = Err(std::io::Error::other("permission denied"));
        assert_eq!(recording_name(unreadable), None);
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            processed: vec![("a".into(), PathBuf::from("a.processed"))],
            failed: vec![("b".into(), "boom".into())],
        };
        assert_eq!(report.total(), 2);
        assert!(!report.all_succeeded());
    }
}
