//! Plain-text exports of processed data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pipeline::ProcessedBag;

/// `<save_dir>/<bag>/<bag>_cost.csv`
pub fn cost_csv_path(save_dir: &Path, bag_name: &str) -> PathBuf {
    save_dir.join(bag_name).join(format!("{}_cost.csv", bag_name))
}

/// Write `time_s,normalized_cost` rows for every fine step.
pub fn write_cost_csv(bag: &ProcessedBag, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "time_s,normalized_cost")?;
    for (t, c) in bag.t_fine().iter().zip(bag.normalized_cost()) {
        writeln!(writer, "{:.6},{:.6}", t, c)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DenseMap;
    use tempfile::TempDir;

    #[test]
    fn test_cost_csv() {
        let dir = TempDir::new().unwrap();
        let bag = ProcessedBag::new(
            "b",
            vec![],
            vec![1.0, 0.75],
            DenseMap::unknown(1, 1),
            vec![],
            vec![],
            vec![0.0, 0.5],
        )
        .unwrap();

        let path = dir.path().join("b_cost.csv");
        write_cost_csv(&bag, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "time_s,normalized_cost\n0.000000,1.000000\n0.500000,0.750000\n"
        );
        assert_eq!(
            cost_csv_path(dir.path(), "b"),
            dir.path().join("b").join("b_cost.csv")
        );
    }
}
